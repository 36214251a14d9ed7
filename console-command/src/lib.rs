//! The engine console client runtime.
//!
//! The [ConnectionService](service::connection::ConnectionService) owns the engine connection.
//! Other services and embedders talk to it through a [ConsoleClient](client::ConsoleClient).
use clap::ArgMatches;

use crate::prelude::*;
use console_api::{
    chunk::InboundChunk,
    config::{load_config, log_path, Config},
    input::InputMode,
};
use display::{DisplayResource, DisplaySink, StdoutSink};
use lifeline::dyn_bus::DynBus;
use message::main::MainShutdown;
use service::main::MainService;
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};
use state::connection::ConfigResource;
use std::{str::FromStr, time::Duration};
use tokio::{select, signal::ctrl_c, time};

mod bus;
pub mod client;
pub mod display;
pub mod input;
pub mod message;
mod prelude;
pub mod service;
pub mod state;

pub use bus::MainBus;

const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

pub fn command_main(args: ArgMatches) -> anyhow::Result<()> {
    let config = config_from_args(&args)?;
    init_logger(args.value_of("LOG"))?;

    info!("engine-console runtime starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_io()
        .enable_time()
        .build()?;

    let result = runtime.block_on(async { main_async(config).await });

    // stdin is read on a blocking thread, which never completes on its own
    runtime.shutdown_timeout(Duration::from_millis(25));

    result?;

    info!("engine-console runtime stopped");

    Ok(())
}

/// Loads the config file, and applies the command line overrides
fn config_from_args(args: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = load_config()?;

    if let Some(host) = args.value_of("HOST") {
        config.endpoint.host = host.to_string();
    }

    if let Some(port) = args.value_of("PORT") {
        config.endpoint.port = port.parse()?;
    }

    if let Some(mode) = args.value_of("MODE") {
        config.mode = InputMode::from_str(mode)?;
    }

    Ok(config)
}

/// Logs to stderr, and to the console log file.
/// Without `--log`, the terminal only shows warnings, and the file records info and above.
fn init_logger(level: Option<&str>) -> anyhow::Result<()> {
    let level = level.map(LevelFilter::from_str).transpose()?;
    let log_file = log_path()?;

    let config = simplelog::ConfigBuilder::new()
        .set_time_format_str("%H:%M:%S%.3f CON")
        .build();

    CombinedLogger::init(vec![
        TermLogger::new(
            level.unwrap_or(LevelFilter::Warn),
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(
            level.unwrap_or(LevelFilter::Info),
            config,
            std::fs::File::create(log_file)?,
        ),
    ])?;

    log_panics::init();

    Ok(())
}

async fn main_async(config: Config) -> anyhow::Result<()> {
    let bus = new_bus(&config, StdoutSink::default())?;

    info!("Launching MainService");
    let service = MainService::spawn(&bus)?;

    let mut client = client::ConsoleClient::from_bus(&bus)?;
    let rx_shutdown = bus.rx::<MainShutdown>()?;

    wait_for_shutdown(rx_shutdown).await;

    // no read is issued after the disconnect completes
    client.disconnect().await?;
    drop(client);

    // closes every output sender, so the display drains what was already received
    let mut display = service.into_display();
    drop(bus);

    if time::timeout(OUTPUT_DRAIN_TIMEOUT, display.drained())
        .await
        .is_err()
    {
        warn!("engine output did not drain before shutdown");
    }

    Ok(())
}

/// Creates a bus with the console config, and the display sink for engine output.
/// Channel capacities are taken from the config.
pub fn new_bus<S: DisplaySink>(config: &Config, sink: S) -> anyhow::Result<MainBus> {
    let bus = MainBus::default();
    bus.capacity::<InboundChunk>(config.output_capacity)?;

    bus.store_resource(ConfigResource(config.clone()));
    bus.store_resource(DisplayResource::new(sink));

    Ok(bus)
}

/// Waits for ctrl-c, or a MainShutdown message
async fn wait_for_shutdown<R>(mut receiver: R)
where
    R: Stream<Item = MainShutdown> + Unpin,
{
    info!("Waiting for termination");

    select! {
        _ = ctrl_c() => {},
        _ = receiver.recv() => {}
    }

    info!("Complete.  Shutting down");
}
