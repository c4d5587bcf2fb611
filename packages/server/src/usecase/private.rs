//! `/send <target> -> <text>`: deliver to one user's connections only.

use crate::domain::ConnectionHandle;

use super::{ChatState, DispatchError, Flow, deliver};

/// Private lines are never recorded in history.
pub(super) fn execute(
    state: &ChatState,
    connection: &ConnectionHandle,
    target: &str,
    text: &str,
) -> Result<Flow, DispatchError> {
    let sender = state
        .registry
        .username_of(connection.peer())
        .ok_or(DispatchError::NotConnected)?;
    let recipient = state
        .registry
        .user(target)
        .ok_or(DispatchError::RecipientNotFound)?;

    let line = format!("(private) {sender}: {text}");
    for handle in recipient
        .connections()
        .iter()
        .filter(|handle| handle.peer() != connection.peer())
    {
        deliver(handle, &line);
    }
    tracing::debug!(peer = %connection.peer(), "Private message from '{}' to '{}'", sender, target);

    Ok(Flow::Continue)
}
