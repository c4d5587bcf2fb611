//! Command parser: one input line to one [`Command`].

use hiroba_shared::protocol::{
    CONNECT_COMMAND, PRIVATE_DELIMITER, QUIT_COMMAND, SEND_COMMAND, STATUS_COMMAND,
};
use thiserror::Error;

/// Errors raised while parsing a command line
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),
}

/// A client command, borrowing its payload from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `/connect <name>`
    Connect(&'a str),
    /// `/status`
    Status,
    /// `/send <text>`
    Broadcast(&'a str),
    /// `/send <target> -> <text>`
    Private { target: &'a str, text: &'a str },
    /// `/quit`
    Quit,
    /// Anything else; holds the first word of the line
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Parse one line of client input.
    ///
    /// Commands are matched by prefix on the trimmed line. A `/send` line
    /// containing `->` anywhere is always a private message, even when the
    /// sender meant the arrow as part of a broadcast.
    pub fn parse(line: &'a str) -> Result<Self, ParseError> {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(SEND_COMMAND) {
            if let Some((target, text)) = rest.split_once(PRIVATE_DELIMITER) {
                return Ok(Command::Private {
                    target: target.trim(),
                    text: text.trim(),
                });
            }
            return payload(line, SEND_COMMAND).map(Command::Broadcast);
        }
        if line.starts_with(STATUS_COMMAND) {
            return Ok(Command::Status);
        }
        if line.starts_with(CONNECT_COMMAND) {
            return payload(line, CONNECT_COMMAND).map(Command::Connect);
        }
        if line.starts_with(QUIT_COMMAND) {
            return Ok(Command::Quit);
        }

        Ok(Command::Unknown(
            line.split_whitespace().next().unwrap_or_default(),
        ))
    }

    /// Short action name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Connect(_) => "connect",
            Command::Status => "status",
            Command::Broadcast(_) => "broadcast",
            Command::Private { .. } => "private",
            Command::Quit => "quit",
            Command::Unknown(_) => "unknown",
        }
    }
}

/// Everything after the first space.
fn payload<'a>(line: &'a str, command: &'static str) -> Result<&'a str, ParseError> {
    line.split_once(' ')
        .map(|(_, rest)| rest)
        .ok_or(ParseError::MissingArgument(command))
}
