//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::usecase::{ChatSnapshot, ConnectionSnapshot, UserSnapshot};

/// `GET /api/status`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusDto {
    pub connected_clients: usize,
    pub history_size: usize,
    pub history_capacity: usize,
    pub users: Vec<UserDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDto {
    pub username: String,
    pub connections: Vec<ConnectionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionDto {
    pub peer: String,
    /// RFC 3339, UTC
    pub connected_at: String,
}

/// `GET /api/history`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryDto {
    pub entries: Vec<String>,
}

impl From<ChatSnapshot> for StatusDto {
    fn from(snapshot: ChatSnapshot) -> Self {
        Self {
            connected_clients: snapshot.users.len(),
            history_size: snapshot.history.len(),
            history_capacity: snapshot.history_capacity,
            users: snapshot.users.into_iter().map(UserDto::from).collect(),
        }
    }
}

impl From<UserSnapshot> for UserDto {
    fn from(user: UserSnapshot) -> Self {
        Self {
            username: user.username,
            connections: user
                .connections
                .into_iter()
                .map(ConnectionDto::from)
                .collect(),
        }
    }
}

impl From<ConnectionSnapshot> for ConnectionDto {
    fn from(connection: ConnectionSnapshot) -> Self {
        Self {
            peer: connection.peer.to_string(),
            connected_at: timestamp_to_rfc3339(connection.connected_at),
        }
    }
}

impl From<ChatSnapshot> for HistoryDto {
    fn from(snapshot: ChatSnapshot) -> Self {
        Self {
            entries: snapshot.history,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use super::*;

    fn snapshot() -> ChatSnapshot {
        ChatSnapshot {
            users: vec![UserSnapshot {
                username: "alice".to_string(),
                connections: vec![ConnectionSnapshot {
                    peer: SocketAddr::from(([127, 0, 0, 1], 5001)),
                    connected_at: 1672531200000,
                }],
            }],
            history: vec!["alice: hi".to_string()],
            history_capacity: 20,
        }
    }

    #[test]
    fn test_status_dto_from_snapshot() {
        // テスト項目: スナップショットから StatusDto へ正しく変換される
        // given (前提条件):
        let snapshot = snapshot();

        // when (操作):
        let dto = StatusDto::from(snapshot);

        // then (期待する結果):
        assert_eq!(dto.connected_clients, 1);
        assert_eq!(dto.history_size, 1);
        assert_eq!(dto.history_capacity, 20);
        assert_eq!(dto.users[0].connections[0].peer, "127.0.0.1:5001");
        assert_eq!(
            dto.users[0].connections[0].connected_at,
            "2023-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_status_dto_json_shape() {
        // テスト項目: StatusDto の JSON 形式が期待通りになる
        // given (前提条件):
        let dto = StatusDto::from(snapshot());

        // when (操作):
        let json = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(json["connected_clients"], 1);
        assert_eq!(json["users"][0]["username"], "alice");
    }

    #[test]
    fn test_history_dto_from_snapshot() {
        // テスト項目: スナップショットから HistoryDto へ変換される
        // given (前提条件):
        let snapshot = snapshot();

        // when (操作):
        let dto = HistoryDto::from(snapshot);

        // then (期待する結果):
        assert_eq!(dto.entries, vec!["alice: hi"]);
    }
}
