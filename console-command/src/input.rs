//! Parses lines typed at the console.
//!
//! Lines starting with `:` are console directives.  Every other line is submitted to the engine,
//! in the current input mode.
use console_api::{
    endpoint::{Endpoint, EndpointParseError},
    input::{InputMode, UnknownModeError},
};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Text to submit in the current input mode
    Submit(String),
    SetMode(InputMode),
    /// Connect to the given endpoint, or the configured endpoint
    Connect(Option<Endpoint>),
    Disconnect,
    /// Print the engine API entries matching the prefix
    Complete(String),
    Quit,
    Empty,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("unknown directive `:{0}`, expected one of :script, :command, :mode, :connect, :disconnect, :complete, :quit")]
    Unknown(String),

    #[error("`:{0}` expects an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Endpoint(#[from] EndpointParseError),

    #[error(transparent)]
    Mode(#[from] UnknownModeError),
}

impl FromStr for ConsoleInput {
    type Err = DirectiveError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(ConsoleInput::Empty);
        }

        if !trimmed.starts_with(':') {
            return Ok(ConsoleInput::Submit(line.to_string()));
        }

        let directive = &trimmed[1..];
        let (name, argument) = match directive.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (directive, ""),
        };

        match name {
            "script" => Ok(ConsoleInput::SetMode(InputMode::Script)),
            "command" => Ok(ConsoleInput::SetMode(InputMode::Command)),
            "mode" if argument.is_empty() => Err(DirectiveError::MissingArgument("mode")),
            "mode" => Ok(ConsoleInput::SetMode(argument.parse()?)),
            "connect" if argument.is_empty() => Ok(ConsoleInput::Connect(None)),
            "connect" => Ok(ConsoleInput::Connect(Some(argument.parse()?))),
            "disconnect" => Ok(ConsoleInput::Disconnect),
            "complete" => Ok(ConsoleInput::Complete(argument.to_string())),
            "quit" | "q" | "exit" => Ok(ConsoleInput::Quit),
            _ => Err(DirectiveError::Unknown(name.to_string())),
        }
    }
}
