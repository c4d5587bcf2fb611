//! Listener-level errors.

use std::{io, net::SocketAddr};

use thiserror::Error;

/// Errors that stop the server. Nothing a single connection does ends up here.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not resolve address {host}:{port}")]
    Resolve { host: String, port: u16 },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Admin HTTP server error: {0}")]
    Http(#[source] io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
