use crate::endpoint::Endpoint;
use thiserror::Error;

/// Failures reported by the console client.
/// All of them are recovered locally: the connection returns to `Disconnected`, and the process continues.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("unable to connect to {endpoint}: {source}")]
    ConnectFailed {
        endpoint: Endpoint,
        source: std::io::Error,
    },

    #[error("a connection attempt is already in progress")]
    ConnectInProgress,

    #[error("the connection attempt was cancelled")]
    ConnectCancelled,

    #[error("not connected to the engine")]
    NotConnected,

    #[error(
        "command input must be `<command> <resource_type> <resource_name>`, found {tokens} token(s)"
    )]
    MalformedCommandInput { tokens: usize },

    #[error("failed to send to the engine: {0}")]
    SendFailed(#[source] std::io::Error),

    #[error("the connection service has stopped")]
    ServiceStopped,
}

impl ConsoleError {
    pub fn is_not_connected(&self) -> bool {
        matches!(self, ConsoleError::NotConnected)
    }
}
