//! The input source contract: a free-text line, plus the mode it should be sent in.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// How an input line is interpreted before it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Script,
    Command,
}

impl Default for InputMode {
    fn default() -> Self {
        Self::Script
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Script => f.write_str("script"),
            InputMode::Command => f.write_str("command"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown input mode `{0}`, expected `script` or `command`")]
pub struct UnknownModeError(pub String);

impl FromStr for InputMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "script" => Ok(InputMode::Script),
            "command" => Ok(InputMode::Command),
            _ => Err(UnknownModeError(s.to_string())),
        }
    }
}

/// Prepares a raw input line for the wire: trims it, and escapes double quotes.
pub fn sanitize(line: &str) -> String {
    line.trim().replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::{sanitize, InputMode, UnknownModeError};

    #[test]
    fn parse_mode() {
        assert_eq!(Ok(InputMode::Script), "script".parse());
        assert_eq!(Ok(InputMode::Command), " Command ".parse());
        assert_eq!(
            Err(UnknownModeError("lua".to_string())),
            "lua".parse::<InputMode>()
        );
    }

    #[test]
    fn default_mode() {
        assert_eq!(InputMode::Script, InputMode::default());
    }

    #[test]
    fn sanitize_trims() {
        assert_eq!("print(1)", sanitize("  print(1)\t\n"));
    }

    #[test]
    fn sanitize_escapes_quotes() {
        assert_eq!(r#"print(\"hi\")"#, sanitize(r#"print("hi")"#));
    }
}
