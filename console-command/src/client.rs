use crate::{
    bus::MainBus,
    message::connection::ConnectionRecv,
    state::connection::ConnectionState,
};
use console_api::{
    endpoint::Endpoint, error::ConsoleError, input::InputMode, message::OutboundMessage,
};
use lifeline::Bus;
use postage::{mpsc, sink::Sink, stream::Stream, watch};
use tokio::sync::oneshot;

/// A handle to the connection service.
///
/// Every request is serialized through the service's inbox, and completes after the service has
/// handled it.  Handles are cheap to create, and any number may be used at once.
pub struct ConsoleClient {
    tx: mpsc::Sender<ConnectionRecv>,
    rx_state: watch::Receiver<ConnectionState>,
}

impl ConsoleClient {
    pub fn new(tx: mpsc::Sender<ConnectionRecv>, rx_state: watch::Receiver<ConnectionState>) -> Self {
        Self { tx, rx_state }
    }

    pub fn from_bus(bus: &MainBus) -> anyhow::Result<Self> {
        let tx = bus.tx::<ConnectionRecv>()?;
        let rx_state = bus.rx::<ConnectionState>()?;
        Ok(Self::new(tx, rx_state))
    }

    /// Connects to the endpoint, closing the current connection first.
    /// Completes when the connection is established, fails, or is cancelled.
    pub async fn connect(&mut self, endpoint: Endpoint) -> Result<(), ConsoleError> {
        let (reply, rx) = oneshot::channel();
        self.request(ConnectionRecv::Connect { endpoint, reply }).await?;
        rx.await.map_err(|_| ConsoleError::ServiceStopped)?
    }

    pub async fn send(&mut self, message: &OutboundMessage) -> Result<(), ConsoleError> {
        self.send_bytes(message.encode()).await
    }

    /// Sends a raw payload.  The bytes are written as-is, without framing.
    pub async fn send_bytes(&mut self, payload: Vec<u8>) -> Result<(), ConsoleError> {
        let (reply, rx) = oneshot::channel();
        self.request(ConnectionRecv::Send { payload, reply }).await?;
        rx.await.map_err(|_| ConsoleError::ServiceStopped)?
    }

    /// Builds the message for an input line, and sends it.
    /// Malformed command input is rejected before anything is written.
    pub async fn submit(
        &mut self,
        text: &str,
        mode: InputMode,
    ) -> Result<OutboundMessage, ConsoleError> {
        let message = OutboundMessage::from_input(text, mode)?;
        self.send(&message).await?;
        Ok(message)
    }

    /// Closes the connection, or cancels a connection attempt.  Does nothing when disconnected.
    pub async fn disconnect(&mut self) -> Result<(), ConsoleError> {
        let (reply, rx) = oneshot::channel();
        self.request(ConnectionRecv::Disconnect { reply }).await?;
        rx.await.map_err(|_| ConsoleError::ServiceStopped)
    }

    pub fn state(&self) -> ConnectionState {
        (*self.rx_state.borrow()).clone()
    }

    /// Waits until the connection state satisfies the condition, and returns it.
    /// Returns None if the connection service stops first.
    pub async fn wait_for<F>(&mut self, mut condition: F) -> Option<ConnectionState>
    where
        F: FnMut(&ConnectionState) -> bool,
    {
        let current = self.state();
        if condition(&current) {
            return Some(current);
        }

        while let Some(update) = self.rx_state.recv().await {
            if condition(&update) {
                return Some(update);
            }
        }

        None
    }

    async fn request(&mut self, msg: ConnectionRecv) -> Result<(), ConsoleError> {
        self.tx
            .send(msg)
            .await
            .map_err(|_| ConsoleError::ServiceStopped)
    }
}

impl Clone for ConsoleClient {
    fn clone(&self) -> Self {
        Self::new(self.tx.clone(), self.rx_state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleClient;
    use crate::{
        message::connection::ConnectionRecv,
        state::connection::{ConnectionState, DisconnectReason},
    };
    use console_api::{error::ConsoleError, input::InputMode};
    use postage::{mpsc, sink::Sink, stream::Stream, watch};

    #[tokio::test]
    async fn malformed_input_is_not_sent() {
        let (tx, mut rx) = mpsc::channel(4);
        let (_tx_state, rx_state) = watch::channel();
        let mut client = ConsoleClient::new(tx, rx_state);

        let result = client.submit("spawn unit", InputMode::Command).await;

        assert!(matches!(
            result,
            Err(ConsoleError::MalformedCommandInput { tokens: 2 })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn stopped_service() {
        let (tx, rx) = mpsc::channel(4);
        let (_tx_state, rx_state) = watch::channel();
        let mut client = ConsoleClient::new(tx, rx_state);
        drop(rx);

        let result = client.disconnect().await;
        assert!(matches!(result, Err(ConsoleError::ServiceStopped)));
    }

    #[tokio::test]
    async fn send_forwards_reply() -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel(4);
        let (_tx_state, rx_state) = watch::channel();
        let mut client = ConsoleClient::new(tx, rx_state);

        let service = tokio::spawn(async move {
            if let Some(ConnectionRecv::Send { payload, reply }) = rx.recv().await {
                reply.send(Err(ConsoleError::NotConnected)).ok();
                return payload;
            }

            Vec::new()
        });

        let result = client.submit("print(1)", InputMode::Script).await;
        assert!(matches!(result, Err(ConsoleError::NotConnected)));
        assert_eq!(
            br#"{"type":"script","script":"print(1)"}"#.to_vec(),
            service.await?
        );
        Ok(())
    }

    #[tokio::test]
    async fn wait_for_state() -> anyhow::Result<()> {
        let (tx, _rx) = mpsc::channel(4);
        let (mut tx_state, rx_state) = watch::channel();
        let mut client = ConsoleClient::new(tx, rx_state);

        assert_eq!(ConnectionState::default(), client.state());

        tx_state
            .send(ConnectionState::Disconnected(DisconnectReason::RemoteClosed))
            .await?;

        let state = client.wait_for(|state| *state != ConnectionState::default()).await;
        assert_eq!(
            Some(ConnectionState::Disconnected(DisconnectReason::RemoteClosed)),
            state
        );
        Ok(())
    }
}
