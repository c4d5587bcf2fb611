//! Connection handle value.

use std::{fmt, net::SocketAddr, sync::Arc};

use super::outbox::{MessagePushError, Outbox};

/// A live connection as seen by the chat model: its peer address plus the
/// outbox used to write to it.
///
/// The connection loop owns the original; the registry keeps clones while the
/// connection is bound to a user.
#[derive(Clone)]
pub struct ConnectionHandle {
    peer: SocketAddr,
    outbox: Arc<dyn Outbox>,
    /// Unix timestamp (milliseconds) when the connection was accepted
    connected_at: i64,
}

impl ConnectionHandle {
    pub fn new(peer: SocketAddr, outbox: Arc<dyn Outbox>, connected_at: i64) -> Self {
        Self {
            peer,
            outbox,
            connected_at,
        }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn connected_at(&self) -> i64 {
        self.connected_at
    }

    /// Queue a line for this connection.
    pub fn push(&self, line: &str) -> Result<(), MessagePushError> {
        self.outbox.push(line)
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("peer", &self.peer)
            .field("connected_at", &self.connected_at)
            .finish_non_exhaustive()
    }
}
