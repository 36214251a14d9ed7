use crate::{
    client::ConsoleClient,
    input::ConsoleInput,
    message::main::MainShutdown,
    prelude::*,
    state::connection::ConfigResource,
};
use console_api::{
    config::Config,
    endpoint::Endpoint,
    error::ConsoleError,
    input::{sanitize, InputMode},
    vocabulary::complete,
};
use postage::mpsc;
use std::io::ErrorKind;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Reads console input from stdin, one line at a time, and submits it to the connection service.
pub struct InputService {
    _input: Lifeline,
}

impl Service for InputService {
    type Bus = MainBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &MainBus) -> Self::Lifeline {
        let ConfigResource(config) = bus.resource::<ConfigResource>()?;
        let client = ConsoleClient::from_bus(bus)?;
        let tx_shutdown = bus.tx::<MainShutdown>()?;

        let _input = Self::try_task(
            "stdin",
            read_input(tokio::io::stdin(), client, config, tx_shutdown),
        );

        Ok(Self { _input })
    }
}

/// Connects to the configured endpoint, then handles input lines until the reader ends,
/// or the user quits.  Shutdown is requested on every exit path.
pub async fn read_input<R>(
    reader: R,
    client: ConsoleClient,
    config: Config,
    mut tx_shutdown: mpsc::Sender<MainShutdown>,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut console = InputState::new(client, config);
    console.connect(None);

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                error!("failed to read input: {}", e);
                break;
            }
        }

        let line = match std::str::from_utf8(buf.as_slice()) {
            Ok(line) => line.trim_end_matches(&['\r', '\n'][..]),
            Err(e) => {
                warn!("ignoring input line: {}", e);
                eprintln!("Input is not valid UTF-8, the line was ignored.");
                continue;
            }
        };

        if !console.handle(line).await {
            break;
        }
    }

    debug!("input closed, requesting shutdown");
    tx_shutdown.send(MainShutdown {}).await.ok();

    Ok(())
}

struct InputState {
    client: ConsoleClient,
    config: Config,
    mode: InputMode,
    connecting: Option<Lifeline>,
}

impl InputState {
    fn new(client: ConsoleClient, config: Config) -> Self {
        Self {
            client,
            mode: config.mode,
            config,
            connecting: None,
        }
    }

    /// Handles a single line.  Returns false when input should stop.
    async fn handle(&mut self, line: &str) -> bool {
        let input = match line.parse::<ConsoleInput>() {
            Ok(input) => input,
            Err(e) => {
                eprintln!("{}", e);
                return true;
            }
        };

        match input {
            ConsoleInput::Empty => {}
            ConsoleInput::Submit(line) => {
                let text = sanitize(line.as_str());
                match self.client.submit(text.as_str(), self.mode).await {
                    Ok(message) => debug!("submitted {:?}", message),
                    Err(ConsoleError::ServiceStopped) => return false,
                    Err(e) => {
                        warn!("input was not sent: {}", e);
                        eprintln!("{}", e);
                    }
                }
            }
            ConsoleInput::SetMode(mode) => {
                info!("input mode: {}", mode);
                self.mode = mode;
                eprintln!("Input mode: {}", mode);
            }
            ConsoleInput::Connect(endpoint) => self.connect(endpoint),
            ConsoleInput::Disconnect => {
                if self.client.disconnect().await.is_err() {
                    return false;
                }
            }
            ConsoleInput::Complete(prefix) => {
                for entry in complete(prefix.as_str()) {
                    eprintln!("{}", entry);
                }
            }
            ConsoleInput::Quit => return false,
        }

        true
    }

    /// Connects in the background, so `:disconnect` and `:quit` are read while the handshake is pending.
    fn connect(&mut self, endpoint: Option<Endpoint>) {
        let endpoint = endpoint.unwrap_or_else(|| self.config.endpoint.clone());
        let mut client = self.client.clone();

        self.connecting = Some(InputService::task("connect", async move {
            match client.connect(endpoint).await {
                Ok(()) => {}
                // the failure itself is reported as a connection state change
                Err(ConsoleError::ConnectFailed { .. }) => {
                    eprintln!("Use `:connect [host:port]` to try again.");
                }
                Err(ConsoleError::ConnectCancelled) => debug!("connection attempt cancelled"),
                Err(e) => eprintln!("{}", e),
            }
        }));
    }
}
