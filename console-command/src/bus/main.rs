use crate::{
    display::DisplayResource,
    message::{connection::ConnectionRecv, main::MainShutdown},
    state::connection::{ConfigResource, ConnectionState},
};
use console_api::chunk::InboundChunk;
use lifeline::prelude::*;
use postage::{mpsc, watch};

lifeline_bus!(pub struct MainBus);

impl Message<MainBus> for MainShutdown {
    type Channel = mpsc::Sender<Self>;
}

/// The connection inbox.  Every connection state transition is serialized through this channel.
impl Message<MainBus> for ConnectionRecv {
    type Channel = mpsc::Sender<Self>;
}

impl Message<MainBus> for ConnectionState {
    type Channel = watch::Sender<Self>;
}

/// Output needs to be mpsc, so chunks are displayed exactly once, in receive order.
impl Message<MainBus> for InboundChunk {
    type Channel = mpsc::Sender<Self>;
}

impl Resource<MainBus> for ConfigResource {}
impl Resource<MainBus> for DisplayResource {}
