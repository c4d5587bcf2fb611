//! The write side of a connection.

use thiserror::Error;

/// Errors that can occur when pushing a line to a connection
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// The connection's writer has gone away
    #[error("connection outbox is closed")]
    Closed,
}

/// Outbound line queue of a single connection.
///
/// Pushing must never block: handlers push while holding the chat state lock.
/// Lines pushed to one outbox are written to the peer in push order.
#[cfg_attr(test, mockall::automock)]
pub trait Outbox: Send + Sync {
    /// Queue one line (without trailing newline) for delivery.
    fn push(&self, line: &str) -> Result<(), MessagePushError>;
}
