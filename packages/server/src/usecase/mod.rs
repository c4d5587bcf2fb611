//! UseCase layer: command dispatch and the action handlers.
//!
//! Each handler is a plain function over [`ChatState`]; the dispatcher calls
//! exactly one of them per command while holding the state lock.

mod broadcast;
mod connect;
mod disconnect;
mod dispatcher;
mod error;
mod private;
mod state;
mod status;

pub use dispatcher::{ChatService, Flow};
pub use error::DispatchError;
pub use state::ChatState;
pub use status::{ChatSnapshot, ConnectionSnapshot, UserSnapshot};

use crate::domain::ConnectionHandle;

/// Push one line to a connection, logging instead of failing.
///
/// A dead recipient must never abort the caller: its own connection loop
/// notices the closed socket and cleans up.
fn deliver(connection: &ConnectionHandle, line: &str) -> bool {
    match connection.push(line) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(peer = %connection.peer(), error = %e, "Failed to deliver line");
            false
        }
    }
}
