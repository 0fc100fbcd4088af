//! Line commands understood by the terminal client

use std::str::FromStr;

use ep_core::CODE_LENGTH;
use thiserror::Error;

/// One user action on the OTP screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type a whole code at once, one digit per slot
    Code(String),
    /// Type `value` into slot `index`
    Digit { index: usize, value: String },
    /// Backspace in slot `index`
    Backspace { index: usize },
    Resend,
    Verify,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("slot must be between 0 and {max}, got {got}")]
    SlotOutOfRange { got: usize, max: usize },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let head = parts.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = parts.collect();

        if head.chars().all(|c| c.is_ascii_digit()) && args.is_empty() {
            return if head.len() == CODE_LENGTH {
                Ok(Command::Code(head.to_string()))
            } else {
                Err(CommandError::Usage("a code has exactly 6 digits"))
            };
        }

        match (head.to_lowercase().as_str(), args.as_slice()) {
            ("d" | "digit", [index, value]) => Ok(Command::Digit {
                index: parse_slot(index, "d <slot> <digit>")?,
                value: value.to_string(),
            }),
            ("d" | "digit", _) => Err(CommandError::Usage("d <slot> <digit>")),
            ("back" | "b", [index]) => Ok(Command::Backspace {
                index: parse_slot(index, "back <slot>")?,
            }),
            ("back" | "b", _) => Err(CommandError::Usage("back <slot>")),
            ("resend" | "r", []) => Ok(Command::Resend),
            ("verify" | "v", []) => Ok(Command::Verify),
            ("status" | "s", []) => Ok(Command::Status),
            ("help" | "h" | "?", []) => Ok(Command::Help),
            ("quit" | "q" | "exit", []) => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(line.trim().to_string())),
        }
    }
}

fn parse_slot(raw: &str, usage: &'static str) -> Result<usize, CommandError> {
    let index: usize = raw.parse().map_err(|_| CommandError::Usage(usage))?;
    if index >= CODE_LENGTH {
        return Err(CommandError::SlotOutOfRange {
            got: index,
            max: CODE_LENGTH - 1,
        });
    }
    Ok(index)
}

pub const HELP: &str = "\
Commands:
  <6 digits>      enter the whole code
  d <slot> <v>    type v into slot 0-5
  back <slot>     backspace in slot 0-5
  resend          request a new code
  verify          submit the code
  status          show the current state
  quit            leave without verifying";
