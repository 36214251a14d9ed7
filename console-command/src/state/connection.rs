use console_api::{config::Config, endpoint::Endpoint};
use lifeline::impl_storage_clone;
use std::{fmt, time::Duration};

/// Identifies a single connection attempt.
/// Completions tagged with an older session are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        SessionId(self.0 + 1)
    }
}

/// Why the connection is (or went) down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// No connection has been attempted yet
    Initial,
    /// The user disconnected, or cancelled a connection attempt
    Requested,
    /// The engine closed the connection
    RemoteClosed,
    ReceiveFailed(String),
    SendFailed(String),
    ConnectFailed(String),
    /// Output could no longer be displayed
    OutputClosed,
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisconnectReason::Initial => f.write_str("not yet connected"),
            DisconnectReason::Requested => f.write_str("disconnected"),
            DisconnectReason::RemoteClosed => f.write_str("connection closed by the engine"),
            DisconnectReason::ReceiveFailed(e) => write!(f, "receive failed: {}", e),
            DisconnectReason::SendFailed(e) => write!(f, "send failed: {}", e),
            DisconnectReason::ConnectFailed(e) => write!(f, "connect failed: {}", e),
            DisconnectReason::OutputClosed => f.write_str("display output closed"),
        }
    }
}

/// The connection lifecycle, published on the bus after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected(DisconnectReason),
    Connecting(Endpoint),
    Connected(Endpoint),
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected(_))
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting(_))
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self, ConnectionState::Disconnected(_))
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        match self {
            ConnectionState::Connecting(endpoint) | ConnectionState::Connected(endpoint) => {
                Some(endpoint)
            }
            ConnectionState::Disconnected(_) => None,
        }
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Disconnected(DisconnectReason::Initial)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected(reason) => write!(f, "Disconnected ({})", reason),
            ConnectionState::Connecting(endpoint) => write!(f, "Connecting to {}", endpoint),
            ConnectionState::Connected(endpoint) => write!(f, "Connected to {}", endpoint),
        }
    }
}

/// The console config, shared with services through the bus
#[derive(Debug, Clone, Default)]
pub struct ConfigResource(pub Config);

impl_storage_clone!(ConfigResource);

/// The settings the connection service needs from the console config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub read_buffer_size: usize,
    pub shutdown_grace: Duration,
    pub send_timeout: Duration,
}

impl From<&Config> for ConnectionConfig {
    fn from(config: &Config) -> Self {
        Self {
            read_buffer_size: config.read_buffer_size,
            shutdown_grace: config.shutdown_grace(),
            send_timeout: config.send_timeout(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}
