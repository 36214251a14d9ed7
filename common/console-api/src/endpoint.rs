use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 10001;

/// The address of a running engine's console server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Endpoint {
    pub fn new<T: Into<String>>(host: T, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The host, without the brackets used to write IPv6 literals.
    pub fn host(&self) -> &str {
        self.host.trim_start_matches('[').trim_end_matches(']')
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(default_host(), default_port())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = self.host();
        if host.contains(':') {
            write!(f, "[{}]:{}", host, self.port)
        } else {
            write!(f, "{}:{}", host, self.port)
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EndpointParseError {
    #[error("endpoint `{0}` is missing a port, expected `host:port`")]
    MissingPort(String),

    #[error("endpoint `{0}` is missing a host, expected `host:port`")]
    MissingHost(String),

    #[error("endpoint `{0}` has an invalid port: {1}")]
    InvalidPort(String, ParseIntError),
}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| EndpointParseError::MissingPort(s.to_string()))?;

        if host.is_empty() {
            return Err(EndpointParseError::MissingHost(s.to_string()));
        }

        let port = port
            .parse()
            .map_err(|err| EndpointParseError::InvalidPort(s.to_string(), err))?;

        Ok(Self::new(host, port))
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
