//! Command dispatch over the shared chat state.

use std::{net::SocketAddr, sync::Arc};

use hiroba_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{Command, ConnectionHandle, Outbox, Username};

use super::{
    ChatSnapshot, ChatState, DispatchError, broadcast, connect, disconnect, private, status,
};

/// What the connection loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// `/quit` was received; leave the read loop and clean up
    Disconnect,
}

/// The chat server instance: owns the registry and history and is shared
/// (via `Arc`) by every connection loop and the admin API.
pub struct ChatService {
    state: Mutex<ChatState>,
    clock: Arc<dyn Clock>,
}

impl ChatService {
    pub fn new(history_size: usize) -> Self {
        Self::with_clock(history_size, Arc::new(SystemClock))
    }

    pub fn with_clock(history_size: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(ChatState::new(history_size)),
            clock,
        }
    }

    /// Create the handle for a freshly accepted connection.
    pub fn open_connection(&self, peer: SocketAddr, outbox: Arc<dyn Outbox>) -> ConnectionHandle {
        ConnectionHandle::new(peer, outbox, self.clock.now_millis())
    }

    /// Parse and run one command line from `connection`.
    ///
    /// The handler runs to completion under the state lock, so its registry
    /// and history mutations are atomic with respect to other connections.
    pub async fn dispatch(
        &self,
        line: &str,
        connection: &ConnectionHandle,
    ) -> Result<Flow, DispatchError> {
        let command = Command::parse(line)?;
        tracing::debug!(peer = %connection.peer(), "Handler: {}", command.name());

        let mut state = self.state.lock().await;
        if !matches!(command, Command::Connect(_)) && !state.registry.is_bound(connection.peer()) {
            return Err(DispatchError::NotConnected);
        }

        match command {
            Command::Connect(username) => connect::execute(&mut state, connection, username),
            Command::Status => status::execute(&state, connection),
            Command::Broadcast(text) => broadcast::execute(&mut state, connection.peer(), text),
            Command::Private { target, text } => private::execute(&state, connection, target, text),
            Command::Quit => Ok(Flow::Disconnect),
            Command::Unknown(word) => Err(DispatchError::UnknownCommand(word.to_string())),
        }
    }

    /// Connection cleanup; call exactly once when a connection loop ends.
    pub async fn disconnect(&self, connection: &ConnectionHandle) -> Option<Username> {
        let mut state = self.state.lock().await;
        disconnect::execute(&mut state, connection)
    }

    pub async fn snapshot(&self) -> ChatSnapshot {
        let state = self.state.lock().await;
        ChatSnapshot::from(&*state)
    }
}
