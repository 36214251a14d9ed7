use crate::{
    display::DisplayResource,
    prelude::*,
    state::connection::{ConnectionState, DisconnectReason},
};
use console_api::chunk::InboundChunk;
use tokio::sync::oneshot;

/// Appends engine output to the display sink, and reports connection changes to the user.
pub struct DisplayService {
    _output: Lifeline,
    _status: Lifeline,
    rx_drained: oneshot::Receiver<()>,
}

impl DisplayService {
    /// Completes once the output channel has closed, and every chunk sent before that was displayed.
    pub async fn drained(&mut self) {
        (&mut self.rx_drained).await.ok();
    }
}

impl Service for DisplayService {
    type Bus = MainBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &MainBus) -> Self::Lifeline {
        let DisplayResource(mut sink) = bus.resource::<DisplayResource>()?;
        let mut rx_output = bus.rx::<InboundChunk>()?;
        let (tx_drained, rx_drained) = oneshot::channel();

        let _output = Self::task("output", async move {
            while let Some(chunk) = rx_output.recv().await {
                if chunk.is_empty() {
                    continue;
                }

                trace!("displaying chunk of len {}", chunk.len());
                if let Err(e) = sink.append(chunk.text().as_ref()) {
                    error!("failed to display engine output: {}", e);
                }
            }

            debug!("output channel closed");
            tx_drained.send(()).ok();
        });

        let mut rx_state = bus.rx::<ConnectionState>()?;
        let _status = Self::task("status", async move {
            let mut last: Option<ConnectionState> = None;

            while let Some(state) = rx_state.recv().await {
                if last.as_ref() == Some(&state) {
                    continue;
                }

                if let Some(notice) = notice(&state) {
                    eprintln!("{}", notice);
                }

                last = Some(state);
            }
        });

        Ok(Self {
            _output,
            _status,
            rx_drained,
        })
    }
}

/// The message shown to the user when the connection state changes
fn notice(state: &ConnectionState) -> Option<String> {
    match state {
        ConnectionState::Disconnected(DisconnectReason::Initial) => None,
        ConnectionState::Disconnected(DisconnectReason::Requested) => {
            Some("Disconnected.".to_string())
        }
        ConnectionState::Disconnected(reason) => Some(format!("Disconnected: {}.", reason)),
        ConnectionState::Connecting(endpoint) => Some(format!("Connecting to {}...", endpoint)),
        ConnectionState::Connected(endpoint) => Some(format!("Connected to {}.", endpoint)),
    }
}
