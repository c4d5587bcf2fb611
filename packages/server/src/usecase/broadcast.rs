//! `/send <text>`: record in history and fan out to everyone else.

use std::net::SocketAddr;

use crate::domain::Sender;

use super::{ChatState, DispatchError, Flow, deliver};

pub(super) fn execute(
    state: &mut ChatState,
    origin: SocketAddr,
    message: &str,
) -> Result<Flow, DispatchError> {
    fan_out(state, origin, message);
    Ok(Flow::Continue)
}

/// Broadcast `message` on behalf of whoever is bound to `origin`, or the
/// system sender when nobody is. Returns the number of successful deliveries.
pub(super) fn fan_out(state: &mut ChatState, origin: SocketAddr, message: &str) -> usize {
    let sender = state
        .registry
        .username_of(origin)
        .cloned()
        .map_or(Sender::System, Sender::User);
    let line = format!("{sender}: {message}");

    if let Some(evicted) = state.history.push(line.clone()) {
        tracing::trace!("Evicted from history: {}", evicted);
    }

    let recipients = state.registry.recipients_except(origin);
    let total = recipients.len();
    let delivered = recipients
        .into_iter()
        .filter(|recipient| deliver(recipient, &line))
        .count();

    tracing::debug!(
        %origin,
        "Broadcasted message from '{}' to {}/{} connections",
        sender,
        delivered,
        total
    );
    delivered
}
