pub use crate::bus::MainBus;
pub use lifeline::prelude::*;
pub use log::*;
pub use postage::{sink::Sink, stream::Stream};
