//! Error types for the chat client.

use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;
use tokio_util::codec::LinesCodecError;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Connection error: {0}")]
    Connection(#[from] LinesCodecError),

    /// The server hung up without sending `/quit`
    #[error("Server closed the connection")]
    ServerClosed,

    #[error("Input error: {0}")]
    Input(#[from] ReadlineError),

    #[error("Username must not be empty")]
    EmptyUsername,

    /// Malformed client-side shorthand; reported locally, nothing is sent
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Client task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
