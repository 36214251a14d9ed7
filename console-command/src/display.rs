use lifeline::impl_storage_take;
use std::{
    fmt,
    io::{self, Write},
};

/// Where engine output is appended, in the order it was received.
///
/// The sink is owned by the display service, and is only ever called from that task.
pub trait DisplaySink: Send + 'static {
    fn append(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Writes engine output to stdout, as it arrives
#[derive(Debug, Default)]
pub struct StdoutSink {}

impl DisplaySink for StdoutSink {
    fn append(&mut self, text: &str) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        lock.write_all(text.as_bytes())?;
        lock.flush()?;
        Ok(())
    }
}

impl<F> DisplaySink for F
where
    F: FnMut(&str) -> anyhow::Result<()> + Send + 'static,
{
    fn append(&mut self, text: &str) -> anyhow::Result<()> {
        self(text)
    }
}

/// The display sink, handed to the display service through the bus.
pub struct DisplayResource(pub Box<dyn DisplaySink>);

impl DisplayResource {
    pub fn new<S: DisplaySink>(sink: S) -> Self {
        Self(Box::new(sink))
    }
}

impl fmt::Debug for DisplayResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DisplayResource")
    }
}

impl_storage_take!(DisplayResource);

#[cfg(test)]
mod tests {
    use super::{DisplayResource, DisplaySink};
    use std::sync::{Arc, Mutex};

    #[test]
    fn closure_sink() -> anyhow::Result<()> {
        let output = Arc::new(Mutex::new(String::new()));
        let captured = output.clone();
        let mut sink = move |text: &str| -> anyhow::Result<()> {
            captured.lock().unwrap().push_str(text);
            Ok(())
        };

        DisplaySink::append(&mut sink, "AB")?;
        DisplaySink::append(&mut sink, "CD")?;

        assert_eq!("ABCD", output.lock().unwrap().as_str());
        Ok(())
    }

    #[test]
    fn resource_debug() {
        let resource = DisplayResource::new(|_: &str| -> anyhow::Result<()> { Ok(()) });
        assert_eq!("DisplayResource", format!("{:?}", resource));
    }
}
