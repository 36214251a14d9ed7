use super::{connection::ConnectionService, display::DisplayService, input::InputService};
use crate::prelude::*;

/// Launches the console client: the connection, display, and input services.
pub struct MainService {
    _connection: ConnectionService,
    _display: DisplayService,
    _input: InputService,
}

impl MainService {
    /// Stops the connection and input services.
    /// The display service is returned, so output that is still queued can be drained.
    pub fn into_display(self) -> DisplayService {
        let Self { _display, .. } = self;
        _display
    }
}

impl Service for MainService {
    type Bus = MainBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &MainBus) -> Self::Lifeline {
        let _connection = ConnectionService::spawn(bus)?;
        let _display = DisplayService::spawn(bus)?;
        let _input = InputService::spawn(bus)?;

        Ok(Self {
            _connection,
            _display,
            _input,
        })
    }
}
