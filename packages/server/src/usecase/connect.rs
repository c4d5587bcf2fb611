//! `/connect <name>`: bind a connection to a username and replay history.

use hiroba_shared::protocol::CONNECTED_NOTICE;

use crate::domain::{Binding, ConnectionHandle, Username};

use super::{ChatState, DispatchError, Flow, deliver};

pub(super) fn execute(
    state: &mut ChatState,
    connection: &ConnectionHandle,
    raw_username: &str,
) -> Result<Flow, DispatchError> {
    let username = Username::new(raw_username)?;

    match state.registry.bind(username.clone(), connection.clone()) {
        Binding::Created => tracing::info!(peer = %connection.peer(), "'{}' joined", username),
        Binding::Joined => tracing::info!(
            peer = %connection.peer(),
            "'{}' joined from an additional connection",
            username
        ),
        Binding::Unchanged => tracing::debug!(peer = %connection.peer(), "'{}' reconnected", username),
        Binding::Moved { from } => tracing::info!(
            peer = %connection.peer(),
            "Connection renamed from '{}' to '{}'",
            from,
            username
        ),
    }

    deliver(connection, CONNECTED_NOTICE);
    for entry in state.history.iter() {
        deliver(connection, entry);
    }

    Ok(Flow::Continue)
}
