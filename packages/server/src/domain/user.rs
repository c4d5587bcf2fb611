//! Users, usernames and message senders.

use std::{borrow::Borrow, fmt};

use hiroba_shared::protocol::PRIVATE_DELIMITER;
use thiserror::Error;

use super::connection::ConnectionHandle;

/// Identity used for lines the server emits on its own behalf.
pub const SYSTEM_IDENTITY: &str = "admin";

/// Errors raised when validating a username
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,

    #[error("Username '{0}' is reserved")]
    Reserved(String),

    #[error("Username must not contain \"->\"")]
    ContainsDelimiter,
}

/// Validated username (Value Object)
///
/// Surrounding whitespace is trimmed. Interior spaces are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Result<Self, UsernameError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(UsernameError::Empty);
        }
        if name.contains(PRIVATE_DELIMITER) {
            return Err(UsernameError::ContainsDelimiter);
        }
        if name == SYSTEM_IDENTITY {
            return Err(UsernameError::Reserved(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Username {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author of a chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    /// A connection bound to a username
    User(Username),
    /// The server itself (departure notices)
    System,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User(username) => username.fmt(f),
            Sender::System => f.write_str(SYSTEM_IDENTITY),
        }
    }
}

/// A username together with every connection currently bound to it.
///
/// A `User` only exists while it has at least one connection; the registry
/// removes it as soon as the last one goes away.
#[derive(Debug, Clone)]
pub struct User {
    username: Username,
    connections: Vec<ConnectionHandle>,
}

impl User {
    pub(super) fn new(username: Username, first: ConnectionHandle) -> Self {
        Self {
            username,
            connections: vec![first],
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Connections in the order they were bound.
    pub fn connections(&self) -> &[ConnectionHandle] {
        &self.connections
    }

    pub(super) fn attach(&mut self, connection: ConnectionHandle) {
        self.connections.push(connection);
    }

    /// Detach the connection with the given peer; returns `true` when no
    /// connection is left.
    pub(super) fn detach(&mut self, peer: std::net::SocketAddr) -> bool {
        self.connections.retain(|c| c.peer() != peer);
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_is_trimmed() {
        // テスト項目: ユーザー名の前後の空白が除去される
        // given (前提条件):
        let raw = "  alice \t";

        // when (操作):
        let username = Username::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn test_username_allows_interior_spaces() {
        // テスト項目: ユーザー名の途中の空白は許可される
        // given (前提条件):
        let raw = "alice smith";

        // when (操作):
        let result = Username::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice smith");
    }

    #[test]
    fn test_empty_username_is_rejected() {
        // テスト項目: 空白のみのユーザー名は拒否される
        // given (前提条件):
        let raw = "   ";

        // when (操作):
        let result = Username::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(UsernameError::Empty));
    }

    #[test]
    fn test_system_identity_is_reserved() {
        // テスト項目: システム用の名前 "admin" は予約されている
        // given (前提条件):
        let raw = SYSTEM_IDENTITY;

        // when (操作):
        let result = Username::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(UsernameError::Reserved("admin".to_string())));
    }

    #[test]
    fn test_username_with_delimiter_is_rejected() {
        // テスト項目: プライベートメッセージの区切り文字を含む名前は拒否される
        // given (前提条件):
        let raw = "a->b";

        // when (操作):
        let result = Username::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(UsernameError::ContainsDelimiter));
    }

    #[test]
    fn test_sender_display() {
        // テスト項目: Sender の表示がユーザー名またはシステム名になる
        // given (前提条件):
        let user = Sender::User(Username::new("bob").unwrap());
        let system = Sender::System;

        // when (操作):
        let rendered = (user.to_string(), system.to_string());

        // then (期待する結果):
        assert_eq!(rendered, ("bob".to_string(), "admin".to_string()));
    }
}
