#[derive(Debug, Clone, Default)]
pub struct MainShutdown {}
