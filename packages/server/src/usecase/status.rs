//! `/status`, plus the read-only snapshot used by the admin API.

use std::net::SocketAddr;

use crate::domain::ConnectionHandle;

use super::{ChatState, DispatchError, Flow, deliver};

/// Write the user count and history size to the caller. Never mutates.
pub(super) fn execute(
    state: &ChatState,
    connection: &ConnectionHandle,
) -> Result<Flow, DispatchError> {
    deliver(
        connection,
        &format!("Connected clients: {}", state.registry.user_count()),
    );
    deliver(
        connection,
        &format!("History size: {}", state.history.len()),
    );
    Ok(Flow::Continue)
}

/// Point-in-time copy of the chat state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub users: Vec<UserSnapshot>,
    pub history: Vec<String>,
    pub history_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    pub username: String,
    pub connections: Vec<ConnectionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSnapshot {
    pub peer: SocketAddr,
    pub connected_at: i64,
}

impl From<&ChatState> for ChatSnapshot {
    fn from(state: &ChatState) -> Self {
        Self {
            users: state
                .registry
                .users()
                .map(|user| UserSnapshot {
                    username: user.username().to_string(),
                    connections: user
                        .connections()
                        .iter()
                        .map(|c| ConnectionSnapshot {
                            peer: c.peer(),
                            connected_at: c.connected_at(),
                        })
                        .collect(),
                })
                .collect(),
            history: state.history.iter().map(str::to_string).collect(),
            history_capacity: state.history.capacity(),
        }
    }
}
