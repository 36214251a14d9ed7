use crate::state::connection::SessionId;
use console_api::{endpoint::Endpoint, error::ConsoleError};
use console_stream::ReceiveOutcome;
use tokio::{net::TcpStream, sync::oneshot};

pub type Reply<T> = oneshot::Sender<Result<T, ConsoleError>>;

/// Requests and completions handled by the ConnectionService.
#[derive(Debug)]
pub enum ConnectionRecv {
    /// Opens a connection to the endpoint, closing the current connection first
    Connect { endpoint: Endpoint, reply: Reply<()> },
    /// Writes the payload to the open connection
    Send { payload: Vec<u8>, reply: Reply<()> },
    /// Closes the connection, or cancels the connection attempt
    Disconnect { reply: oneshot::Sender<()> },
    /// The handshake for a session has completed
    Established {
        session: SessionId,
        endpoint: Endpoint,
        result: std::io::Result<TcpStream>,
    },
    /// The receive loop for a session has stopped
    Closed {
        session: SessionId,
        outcome: ReceiveOutcome,
    },
}
