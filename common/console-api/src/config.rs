use crate::{endpoint::Endpoint, env::dotdir_override, input::InputMode};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

/// The read buffer used for each receive, in bytes
pub const DEFAULT_READ_BUFFER_SIZE: usize = 256;

/// The delay between shutting down a connection, and closing the socket
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 10;

pub const DEFAULT_OUTPUT_CAPACITY: usize = 256;

/// How long a single send may wait on a stalled engine, before the connection is torn down
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 5000;

/// User-facing config, read from `console.yml` in the dotdir.
/// Every field is optional, and missing fields take the default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: Endpoint,

    #[serde(default)]
    pub mode: InputMode,

    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,

    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,

    #[serde(default = "default_output_capacity")]
    pub output_capacity: usize,

    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
}

impl Config {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            mode: InputMode::default(),
            read_buffer_size: default_read_buffer_size(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
            output_capacity: default_output_capacity(),
            send_timeout_ms: default_send_timeout_ms(),
        }
    }
}

fn default_read_buffer_size() -> usize {
    DEFAULT_READ_BUFFER_SIZE
}

fn default_shutdown_grace_ms() -> u64 {
    DEFAULT_SHUTDOWN_GRACE_MS
}

fn default_output_capacity() -> usize {
    DEFAULT_OUTPUT_CAPACITY
}

fn default_send_timeout_ms() -> u64 {
    DEFAULT_SEND_TIMEOUT_MS
}

pub fn dotdir_path() -> Result<PathBuf> {
    if let Some(dir) = dotdir_override() {
        return Ok(dir);
    }

    let mut dir = dirs::home_dir().ok_or_else(|| anyhow::Error::msg("home_dir not found"))?;

    dir.push(".engine-console");

    Ok(dir)
}

/// Creates the dotdir, so the rest of the console doesn't need to worry about it.
pub fn mkdir() -> Result<()> {
    let path = dotdir_path()?;
    std::fs::create_dir_all(path)?;
    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    let mut path = dotdir_path()?;
    path.push("console.yml");
    Ok(path)
}

pub fn log_path() -> Result<PathBuf> {
    let mut path = dotdir_path()?;
    path.push("console.log");
    Ok(path)
}

/// Parses and returns the config file contents, or returns the default config
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    load_config_from(path.as_path())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.is_file() {
        log::debug!("File {:?} does not exist, using the default config", path);
        return Ok(Config::default());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_yaml::from_reader(reader)?;

    Ok(config)
}
