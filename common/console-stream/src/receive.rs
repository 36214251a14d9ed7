use console_api::chunk::InboundChunk;
use log::{debug, trace};
use postage::sink::Sink;
use std::io::ErrorKind;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Why a receive loop stopped
#[derive(Debug)]
pub enum ReceiveOutcome {
    /// A read returned zero bytes: the engine closed the connection.
    RemoteClosed,
    /// A read failed.
    Failed(std::io::Error),
    /// The chunk receiver was dropped, so there was nowhere to forward output.
    OutputClosed,
}

/// Drains the reader into `tx`, one read at a time, until the stream ends.
///
/// A single buffer of `buffer_size` bytes is reused for every read, and the next read
/// is only issued after the previous chunk has been forwarded.
/// Chunks are forwarded in the order they were read, and never merged.
pub async fn receive_loop<R, S>(mut reader: R, buffer_size: usize, mut tx: S) -> ReceiveOutcome
where
    R: AsyncRead + Unpin,
    S: Sink<Item = InboundChunk> + Unpin,
{
    let mut buffer = vec![0u8; buffer_size.max(1)];

    loop {
        let read = match reader.read(buffer.as_mut_slice()).await {
            Ok(0) => {
                debug!("terminating - remote closed the stream");
                return ReceiveOutcome::RemoteClosed;
            }
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("terminating - read failed: {}", e);
                return ReceiveOutcome::Failed(e);
            }
        };

        trace!("inbound chunk of len {}", read);
        let chunk = InboundChunk::from(&buffer[0..read]);

        if tx.send(chunk).await.is_err() {
            debug!("terminating - chunk receiver disconnected");
            return ReceiveOutcome::OutputClosed;
        }
    }
}
