use crate::{
    message::connection::{ConnectionRecv, Reply},
    prelude::*,
    state::connection::{
        ConfigResource, ConnectionConfig, ConnectionState, DisconnectReason, SessionId,
    },
};
use console_api::{chunk::InboundChunk, endpoint::Endpoint, error::ConsoleError};
use console_stream::{receive_loop, shutdown, write_payload, ReceiveOutcome};
use postage::{mpsc, watch};
use std::io::{self, ErrorKind};
use tokio::{
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream,
    },
    time,
};

/// Owns the engine connection, and serializes every transition through the ConnectionRecv inbox.
pub struct ConnectionService {
    _run: Lifeline,
}

impl Service for ConnectionService {
    type Bus = MainBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &MainBus) -> anyhow::Result<Self> {
        let mut rx = bus.rx::<ConnectionRecv>()?;
        let tx_self = bus.tx::<ConnectionRecv>()?;
        let tx_state = bus.tx::<ConnectionState>()?;
        let tx_output = bus.tx::<InboundChunk>()?;
        let ConfigResource(config) = bus.resource::<ConfigResource>()?;

        let mut manager =
            ConnectionManager::new(ConnectionConfig::from(&config), tx_self, tx_state, tx_output);

        let _run = Self::task("run", async move {
            while let Some(msg) = rx.recv().await {
                manager.recv(msg).await;
            }

            manager.disconnect().await;
        });

        Ok(Self { _run })
    }
}

/// The socket halves of an established connection.
/// The read half is owned by the receive task.
struct ActiveSession {
    writer: OwnedWriteHalf,
    receive: Lifeline,
}

/// The connection state machine: `Disconnected -> Connecting -> Connected -> Disconnected`.
///
/// The handshake and the receive loop run in their own tasks, and report back through the inbox,
/// tagged with the session that started them.  Reports from older sessions are discarded.
pub(crate) struct ConnectionManager {
    config: ConnectionConfig,
    state: ConnectionState,
    session: SessionId,
    pending: Option<Reply<()>>,
    handshake: Option<Lifeline>,
    active: Option<ActiveSession>,
    tx_self: mpsc::Sender<ConnectionRecv>,
    tx_state: watch::Sender<ConnectionState>,
    tx_output: mpsc::Sender<InboundChunk>,
}

impl ConnectionManager {
    pub fn new(
        config: ConnectionConfig,
        tx_self: mpsc::Sender<ConnectionRecv>,
        tx_state: watch::Sender<ConnectionState>,
        tx_output: mpsc::Sender<InboundChunk>,
    ) -> Self {
        Self {
            config,
            state: ConnectionState::default(),
            session: SessionId::default(),
            pending: None,
            handshake: None,
            active: None,
            tx_self,
            tx_state,
            tx_output,
        }
    }

    pub async fn recv(&mut self, msg: ConnectionRecv) {
        match msg {
            ConnectionRecv::Connect { endpoint, reply } => self.connect(endpoint, reply).await,
            ConnectionRecv::Send { payload, reply } => {
                let result = self.send(payload.as_slice()).await;
                reply.send(result).ok();
            }
            ConnectionRecv::Disconnect { reply } => {
                self.disconnect().await;
                reply.send(()).ok();
            }
            ConnectionRecv::Established {
                session,
                endpoint,
                result,
            } => self.established(session, endpoint, result).await,
            ConnectionRecv::Closed { session, outcome } => self.closed(session, outcome).await,
        }
    }

    async fn connect(&mut self, endpoint: Endpoint, reply: Reply<()>) {
        if let ConnectionState::Connecting(ref current) = self.state {
            debug!(
                "rejecting connect to {}, already connecting to {}",
                endpoint, current
            );
            reply.send(Err(ConsoleError::ConnectInProgress)).ok();
            return;
        }

        if self.active.is_some() {
            info!("closing the current connection before connecting to {}", endpoint);
            self.teardown().await;
        }

        self.session = self.session.next();
        let session = self.session;

        let mut tx = self.tx_self.clone();
        let target = endpoint.clone();
        self.handshake = Some(Self::task("handshake", async move {
            let result = console_stream::connect(&target).await;
            tx.send(ConnectionRecv::Established {
                session,
                endpoint: target,
                result,
            })
            .await
            .ok();
        }));

        self.pending = Some(reply);
        self.set_state(ConnectionState::Connecting(endpoint)).await;
    }

    async fn established(
        &mut self,
        session: SessionId,
        endpoint: Endpoint,
        result: io::Result<TcpStream>,
    ) {
        if session != self.session || !self.state.is_connecting() {
            debug!("discarding handshake result for stale session {:?}", session);
            return;
        }

        self.handshake = None;
        let reply = self.pending.take();

        let result = match result {
            Ok(stream) => {
                let (reader, writer) = stream.into_split();
                let receive = self.spawn_receive(session, reader);
                self.active = Some(ActiveSession { writer, receive });

                info!("connected to {}", endpoint);
                self.set_state(ConnectionState::Connected(endpoint)).await;
                Ok(())
            }
            Err(source) => {
                warn!("unable to connect to {}: {}", endpoint, source);
                let reason = DisconnectReason::ConnectFailed(source.to_string());
                self.set_state(ConnectionState::Disconnected(reason)).await;
                Err(ConsoleError::ConnectFailed { endpoint, source })
            }
        };

        if let Some(reply) = reply {
            reply.send(result).ok();
        }
    }

    fn spawn_receive(&self, session: SessionId, reader: OwnedReadHalf) -> Lifeline {
        let tx_output = self.tx_output.clone();
        let mut tx = self.tx_self.clone();
        let buffer_size = self.config.read_buffer_size;

        Self::task("receive", async move {
            let outcome = receive_loop(reader, buffer_size, tx_output).await;
            tx.send(ConnectionRecv::Closed { session, outcome })
                .await
                .ok();
        })
    }

    async fn send(&mut self, payload: &[u8]) -> Result<(), ConsoleError> {
        let active = match self.active.as_mut() {
            Some(active) => active,
            None => {
                debug!("rejecting send, state is {}", self.state);
                return Err(ConsoleError::NotConnected);
            }
        };

        // a stalled engine must not hold the inbox, so queued disconnects are still handled
        trace!("sending payload of len {}", payload.len());
        let write = write_payload(&mut active.writer, payload);
        let result = match time::timeout(self.config.send_timeout, write).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                ErrorKind::TimedOut,
                "the engine stopped reading input",
            )),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("send failed: {}", e);
                let reason = DisconnectReason::SendFailed(e.to_string());
                self.teardown().await;
                self.set_state(ConnectionState::Disconnected(reason)).await;
                Err(ConsoleError::SendFailed(e))
            }
        }
    }

    async fn closed(&mut self, session: SessionId, outcome: ReceiveOutcome) {
        if session != self.session || self.active.is_none() {
            debug!("discarding receive outcome for stale session {:?}", session);
            return;
        }

        let reason = match outcome {
            ReceiveOutcome::RemoteClosed => {
                info!("the engine closed the connection");
                DisconnectReason::RemoteClosed
            }
            ReceiveOutcome::Failed(e) => {
                error!("receive failed: {}", e);
                DisconnectReason::ReceiveFailed(e.to_string())
            }
            ReceiveOutcome::OutputClosed => {
                warn!("display output closed, disconnecting");
                DisconnectReason::OutputClosed
            }
        };

        self.teardown().await;
        self.set_state(ConnectionState::Disconnected(reason)).await;
    }

    /// Closes the connection, or cancels the connection attempt.  Does nothing when disconnected.
    pub async fn disconnect(&mut self) {
        match self.state {
            ConnectionState::Connected(ref endpoint) => {
                info!("disconnecting from {}", endpoint);
                self.teardown().await;
            }
            ConnectionState::Connecting(ref endpoint) => {
                info!("cancelling the connection attempt to {}", endpoint);
                self.handshake = None;
                if let Some(reply) = self.pending.take() {
                    reply.send(Err(ConsoleError::ConnectCancelled)).ok();
                }
            }
            ConnectionState::Disconnected(_) => {
                debug!("ignoring disconnect, state is {}", self.state);
                return;
            }
        }

        self.set_state(ConnectionState::Disconnected(DisconnectReason::Requested))
            .await;
    }

    /// Cancels the outstanding read, then shuts the stream down.
    async fn teardown(&mut self) {
        if let Some(ActiveSession { writer, receive }) = self.active.take() {
            drop(receive);
            shutdown(writer, self.config.shutdown_grace).await;
        }
    }

    async fn set_state(&mut self, state: ConnectionState) {
        debug!("connection state: {}", state);
        self.state = state.clone();
        self.tx_state.send(state).await.ok();
    }
}
