use std::borrow::Cow;

/// The bytes produced by a single read from the engine.
/// The protocol has no inbound framing, so a chunk may hold a partial message, or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundChunk {
    pub data: Vec<u8>,
}

impl InboundChunk {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decodes the chunk for display.  Invalid UTF-8 sequences are replaced, never dropped.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.data.as_slice())
    }
}

impl From<&[u8]> for InboundChunk {
    fn from(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}
