mod main;

pub use main::MainBus;
