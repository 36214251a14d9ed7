use crate::{error::ConsoleError, input::InputMode};

/// A single user intent, sent to the engine as one JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Script source, evaluated by the engine.  Not interpreted locally.
    Script { text: String },
    /// A resource command, parsed from `<command> <resource_type> <resource_name>`
    Command {
        verb: String,
        resource_type: String,
        resource_name: String,
    },
}

impl OutboundMessage {
    pub fn script<T: Into<String>>(text: T) -> Self {
        Self::Script { text: text.into() }
    }

    pub fn command<T: Into<String>>(verb: T, resource_type: T, resource_name: T) -> Self {
        Self::Command {
            verb: verb.into(),
            resource_type: resource_type.into(),
            resource_name: resource_name.into(),
        }
    }

    /// Builds the message for an input line, according to the input mode.
    pub fn from_input(text: &str, mode: InputMode) -> Result<Self, ConsoleError> {
        match mode {
            InputMode::Script => Ok(Self::script(text)),
            InputMode::Command => Self::parse_command(text),
        }
    }

    /// Splits a command line into exactly three whitespace-delimited tokens.
    /// Runs of spaces or tabs count as a single separator.
    pub fn parse_command(line: &str) -> Result<Self, ConsoleError> {
        let tokens: Vec<&str> = line.split_ascii_whitespace().collect();

        match tokens.as_slice() {
            [verb, resource_type, resource_name] => {
                Ok(Self::command(*verb, *resource_type, *resource_name))
            }
            _ => Err(ConsoleError::MalformedCommandInput {
                tokens: tokens.len(),
            }),
        }
    }

    /// Encodes the message as the JSON text the engine expects.
    ///
    /// Values are placed between the protocol quotes as-is, without escaping.
    /// Text containing `"` or control characters produces invalid JSON,
    /// so input lines should pass through [`crate::input::sanitize`] first.
    pub fn encode(&self) -> Vec<u8> {
        let json = match self {
            Self::Script { text } => format!(r#"{{"type":"script","script":"{}"}}"#, text),
            Self::Command {
                verb,
                resource_type,
                resource_name,
            } => format!(
                r#"{{"type":"command","command":"{}","resource_type":"{}","resource_name":"{}"}}"#,
                verb, resource_type, resource_name
            ),
        };

        json.into_bytes()
    }
}
