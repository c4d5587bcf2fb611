//! Cleanup when a connection loop ends.

use hiroba_shared::protocol::QUIT_LINE;

use crate::domain::{ConnectionHandle, Username};

use super::{ChatState, broadcast, deliver};

/// Unbind the connection, announce the departure to everyone else and queue
/// the terminal `/quit` line. Safe for connections that never connected; the
/// peer address then stands in for the name.
pub(super) fn execute(state: &mut ChatState, connection: &ConnectionHandle) -> Option<Username> {
    let departed = state.registry.unbind(connection.peer());
    let subject = departed
        .as_ref()
        .map_or_else(|| connection.peer().to_string(), ToString::to_string);

    // The connection is unbound now, so the notice goes out as the system sender.
    broadcast::fan_out(state, connection.peer(), &format!("{subject} leaving us!"));
    deliver(connection, QUIT_LINE);

    departed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{channel_connection, drain};

    #[test]
    fn test_disconnect_unbinds_and_notifies_others() {
        // テスト項目: 切断で登録が解除され、他の参加者に通知される
        // given (前提条件):
        let mut state = ChatState::new(20);
        let (alice, mut alice_rx) = channel_connection(5001);
        let (bob, mut bob_rx) = channel_connection(5002);
        state.registry.bind(Username::new("alice").unwrap(), alice.clone());
        state.registry.bind(Username::new("bob").unwrap(), bob.clone());

        // when (操作):
        let departed = execute(&mut state, &bob);

        // then (期待する結果):
        assert_eq!(departed, Some(Username::new("bob").unwrap()));
        assert!(!state.registry.is_bound(bob.peer()));
        assert!(state.registry.user("bob").is_none());
        assert_eq!(drain(&mut alice_rx), vec!["admin: bob leaving us!"]);
        assert_eq!(drain(&mut bob_rx), vec!["/quit"]);
    }

    #[test]
    fn test_disconnect_keeps_other_connections_of_same_user() {
        // テスト項目: 同じユーザーの他の接続は残り、通知を受け取る
        // given (前提条件):
        let mut state = ChatState::new(20);
        let (alice, _alice_rx) = channel_connection(5001);
        let (alice_2, mut alice_2_rx) = channel_connection(5002);
        state.registry.bind(Username::new("alice").unwrap(), alice.clone());
        state.registry.bind(Username::new("alice").unwrap(), alice_2.clone());

        // when (操作):
        execute(&mut state, &alice);

        // then (期待する結果):
        assert_eq!(state.registry.user_count(), 1);
        assert!(state.registry.is_bound(alice_2.peer()));
        assert_eq!(drain(&mut alice_2_rx), vec!["admin: alice leaving us!"]);
    }

    #[test]
    fn test_disconnect_without_connect() {
        // テスト項目: connect していない接続の切断でも安全に後始末できる
        // given (前提条件):
        let mut state = ChatState::new(20);
        let (alice, mut alice_rx) = channel_connection(5001);
        let (stranger, mut stranger_rx) = channel_connection(6000);
        state.registry.bind(Username::new("alice").unwrap(), alice.clone());

        // when (操作):
        let departed = execute(&mut state, &stranger);

        // then (期待する結果):
        assert_eq!(departed, None);
        assert_eq!(state.registry.user_count(), 1);
        assert_eq!(
            drain(&mut alice_rx),
            vec!["admin: 127.0.0.1:6000 leaving us!"]
        );
        assert_eq!(drain(&mut stranger_rx), vec!["/quit"]);
    }
}
