use console_api::{config::Config, endpoint::Endpoint};
use console_command::{
    client::ConsoleClient,
    new_bus,
    service::{connection::ConnectionService, display::DisplayService},
    MainBus,
};
use lifeline::Service;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::net::{TcpListener, TcpStream};

/// A stand-in for the engine's console server, listening on an ephemeral local port
pub struct FakeEngine {
    listener: TcpListener,
    pub endpoint: Endpoint,
}

impl FakeEngine {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            listener,
            endpoint: Endpoint::new("127.0.0.1", port),
        })
    }

    pub async fn accept(&self) -> anyhow::Result<TcpStream> {
        let (stream, _) = self.listener.accept().await?;
        Ok(stream)
    }
}

/// An endpoint with nothing listening on it
pub async fn refused_endpoint() -> anyhow::Result<Endpoint> {
    let engine = FakeEngine::bind().await?;
    Ok(engine.endpoint.clone())
}

/// The console runtime, without the stdin input service.  Engine output is captured.
pub struct TestConsole {
    pub client: ConsoleClient,
    output: Arc<Mutex<String>>,
    _bus: MainBus,
    _connection: ConnectionService,
    _display: DisplayService,
}

impl TestConsole {
    pub fn spawn() -> anyhow::Result<Self> {
        let output = Arc::new(Mutex::new(String::new()));
        let captured = output.clone();
        let sink = move |text: &str| -> anyhow::Result<()> {
            captured.lock().unwrap().push_str(text);
            Ok(())
        };

        let bus = new_bus(&Config::default(), sink)?;
        let _connection = ConnectionService::spawn(&bus)?;
        let _display = DisplayService::spawn(&bus)?;
        let client = ConsoleClient::from_bus(&bus)?;

        Ok(Self {
            client,
            output,
            _bus: bus,
            _connection,
            _display,
        })
    }

    pub fn output(&self) -> String {
        self.output.lock().unwrap().clone()
    }

    /// Waits until the captured output has the expected length
    pub async fn await_output(&self, len: usize) -> String {
        loop {
            let output = self.output();
            if output.len() >= len {
                return output;
            }

            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}
