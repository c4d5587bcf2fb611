//! UseCase errors.
//!
//! The `Display` output of every variant is exactly the line written back to
//! the client that issued the command.

use thiserror::Error;

use crate::domain::{ParseError, UsernameError};

/// Recoverable command failure; reported to the caller, connection stays open
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A command other than `/connect` before the connection is bound
    #[error("To start chat, you must run \"/connect\"")]
    NotConnected,

    #[error("No handler for message type {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),

    #[error("Error: recipient not found")]
    RecipientNotFound,
}
