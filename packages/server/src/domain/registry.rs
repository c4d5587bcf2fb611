//! Connection registry: users, their connections, and the peer → username map.
//!
//! Invariants kept by every method:
//!
//! - a peer address is in `peers` iff exactly one user lists a connection with
//!   that peer, and `peers[peer]` names that user;
//! - every user in `users` has at least one connection.

use std::{
    collections::{BTreeMap, HashMap, btree_map::Entry},
    net::SocketAddr,
};

use super::{
    connection::ConnectionHandle,
    user::{User, Username},
};

/// Outcome of [`Registry::bind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// First connection of a new user
    Created,
    /// Additional connection of an existing user
    Joined,
    /// The connection was already bound to this username
    Unchanged,
    /// The connection was bound to another username before
    Moved { from: Username },
}

#[derive(Debug, Default)]
pub struct Registry {
    /// Users ordered by username; broadcast fan-out follows this order
    users: BTreeMap<Username, User>,
    peers: HashMap<SocketAddr, Username>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a connection to `username`.
    pub fn bind(&mut self, username: Username, connection: ConnectionHandle) -> Binding {
        let peer = connection.peer();
        if self.peers.get(&peer) == Some(&username) {
            return Binding::Unchanged;
        }
        let previous = self.unbind(peer);

        let created = match self.users.entry(username.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(User::new(username.clone(), connection));
                true
            }
            Entry::Occupied(mut entry) => {
                entry.get_mut().attach(connection);
                false
            }
        };
        self.peers.insert(peer, username);

        match (previous, created) {
            (Some(from), _) => Binding::Moved { from },
            (None, true) => Binding::Created,
            (None, false) => Binding::Joined,
        }
    }

    /// Remove the connection with `peer`, dropping its user when it was the
    /// last one. Returns the username it was bound to.
    pub fn unbind(&mut self, peer: SocketAddr) -> Option<Username> {
        let username = self.peers.remove(&peer)?;
        if let Entry::Occupied(mut entry) = self.users.entry(username.clone())
            && entry.get_mut().detach(peer)
        {
            entry.remove();
        }
        Some(username)
    }

    pub fn username_of(&self, peer: SocketAddr) -> Option<&Username> {
        self.peers.get(&peer)
    }

    pub fn is_bound(&self, peer: SocketAddr) -> bool {
        self.peers.contains_key(&peer)
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Number of distinct usernames
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn connection_count(&self) -> usize {
        self.peers.len()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Every bound connection except the ones with peer `excluded`, in
    /// registry order.
    pub fn recipients_except(&self, excluded: SocketAddr) -> Vec<&ConnectionHandle> {
        self.users
            .values()
            .flat_map(User::connections)
            .filter(|connection| connection.peer() != excluded)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::MockOutbox;

    fn handle(port: u16) -> ConnectionHandle {
        let peer = SocketAddr::from(([127, 0, 0, 1], port));
        ConnectionHandle::new(peer, Arc::new(MockOutbox::new()), 0)
    }

    fn name(raw: &str) -> Username {
        Username::new(raw).unwrap()
    }

    /// Both directions of the peer/user relation must agree.
    fn assert_consistent(registry: &Registry) {
        let mut listed = 0;
        for user in registry.users() {
            assert!(!user.connections().is_empty());
            for connection in user.connections() {
                assert_eq!(registry.username_of(connection.peer()), Some(user.username()));
                listed += 1;
            }
        }
        assert_eq!(listed, registry.connection_count());
    }

    #[test]
    fn test_bind_distinct_usernames_counts_each() {
        // テスト項目: 異なるユーザー名で N 回 bind するとユーザー数が N になる
        // given (前提条件):
        let mut registry = Registry::new();

        // when (操作):
        let bindings: Vec<_> = ["alice", "bob", "charlie"]
            .iter()
            .enumerate()
            .map(|(i, n)| registry.bind(name(n), handle(5000 + i as u16)))
            .collect();

        // then (期待する結果):
        assert_eq!(bindings, vec![Binding::Created; 3]);
        assert_eq!(registry.user_count(), 3);
        assert_consistent(&registry);
    }

    #[test]
    fn test_bind_same_username_from_two_connections() {
        // テスト項目: 同じユーザー名の 2 つ目の接続はユーザーに追加される
        // given (前提条件):
        let mut registry = Registry::new();
        registry.bind(name("alice"), handle(5001));

        // when (操作):
        let binding = registry.bind(name("alice"), handle(5002));

        // then (期待する結果):
        assert_eq!(binding, Binding::Joined);
        assert_eq!(registry.user_count(), 1);
        assert_eq!(registry.user("alice").unwrap().connections().len(), 2);
        assert_consistent(&registry);
    }

    #[test]
    fn test_rebind_same_username_is_idempotent() {
        // テスト項目: 同じ接続で同じ名前を再度 bind しても重複しない
        // given (前提条件):
        let mut registry = Registry::new();
        registry.bind(name("alice"), handle(5001));

        // when (操作):
        let binding = registry.bind(name("alice"), handle(5001));

        // then (期待する結果):
        assert_eq!(binding, Binding::Unchanged);
        assert_eq!(registry.user("alice").unwrap().connections().len(), 1);
        assert_consistent(&registry);
    }

    #[test]
    fn test_rebind_with_other_username_moves_connection() {
        // テスト項目: 別の名前で bind し直すと接続が移動し、空のユーザーは削除される
        // given (前提条件):
        let mut registry = Registry::new();
        registry.bind(name("alice"), handle(5001));

        // when (操作):
        let binding = registry.bind(name("bob"), handle(5001));

        // then (期待する結果):
        assert_eq!(binding, Binding::Moved { from: name("alice") });
        assert!(registry.user("alice").is_none());
        assert_eq!(registry.username_of(handle(5001).peer()), Some(&name("bob")));
        assert_consistent(&registry);
    }

    #[test]
    fn test_unbind_removes_user_when_last_connection_leaves() {
        // テスト項目: 最後の接続が unbind されるとユーザーが削除される
        // given (前提条件):
        let mut registry = Registry::new();
        registry.bind(name("alice"), handle(5001));
        registry.bind(name("alice"), handle(5002));

        // when (操作):
        let first = registry.unbind(handle(5001).peer());
        let remaining = registry.user("alice").map(|u| u.connections().len());
        let second = registry.unbind(handle(5002).peer());

        // then (期待する結果):
        assert_eq!(first, Some(name("alice")));
        assert_eq!(remaining, Some(1));
        assert_eq!(second, Some(name("alice")));
        assert_eq!(registry.user_count(), 0);
        assert_consistent(&registry);
    }

    #[test]
    fn test_unbind_unknown_peer_is_noop() {
        // テスト項目: bind されていない接続の unbind は何もしない
        // given (前提条件):
        let mut registry = Registry::new();
        registry.bind(name("alice"), handle(5001));

        // when (操作):
        let result = registry.unbind(handle(6000).peer());

        // then (期待する結果):
        assert_eq!(result, None);
        assert_eq!(registry.user_count(), 1);
    }

    #[test]
    fn test_recipients_except_excludes_only_that_peer() {
        // テスト項目: 指定した peer の接続だけがブロードキャスト対象から除外される
        // given (前提条件):
        let mut registry = Registry::new();
        registry.bind(name("alice"), handle(5001));
        registry.bind(name("alice"), handle(5002));
        registry.bind(name("bob"), handle(5003));

        // when (操作):
        let recipients: Vec<u16> = registry
            .recipients_except(handle(5001).peer())
            .iter()
            .map(|c| c.peer().port())
            .collect();

        // then (期待する結果):
        assert_eq!(recipients, vec![5002, 5003]);
    }
}
