use console_api::endpoint::Endpoint;
use log::debug;
use tokio::net::TcpStream;

/// Opens a stream to the engine.
/// No timeout is applied beyond the operating system's own connect timeout.
pub async fn connect(endpoint: &Endpoint) -> std::io::Result<TcpStream> {
    debug!("connecting to {}", endpoint);

    let stream = TcpStream::connect((endpoint.host(), endpoint.port)).await?;

    debug!("connected to {}", endpoint);
    Ok(stream)
}
