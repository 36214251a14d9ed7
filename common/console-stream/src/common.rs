use log::debug;
use std::{io::ErrorKind, time::Duration};
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    time,
};

/// Writes the full payload, and flushes it to the transport.
pub async fn write_payload<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> std::io::Result<()> {
    writer.write_all(payload).await?;
    writer.flush().await
}

/// Shuts down the stream, waits for the grace period, and then closes the handle.
pub async fn shutdown<W: AsyncWrite + Unpin>(mut writer: W, grace: Duration) {
    if let Err(e) = writer.shutdown().await {
        match e.kind() {
            ErrorKind::NotConnected | ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {}
            _ => debug!("failed to shut down stream: {}", e),
        }
    }

    time::sleep(grace).await;
    drop(writer);
}
