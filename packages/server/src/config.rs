//! Server configuration.

use std::time::Duration;

use hiroba_shared::protocol::{DEFAULT_HOST, DEFAULT_PORT};

use crate::domain::DEFAULT_HISTORY_SIZE;

pub const DEFAULT_BACKLOG: u32 = 100;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 8 * 1024;

/// Everything the server needs at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind the chat listener to
    pub host: String,
    /// Port of the chat listener
    pub port: u16,
    /// Listen backlog of the chat socket
    pub backlog: u32,
    /// Number of broadcast lines kept and replayed to new clients
    pub history_size: usize,
    /// Longest accepted input line, in bytes
    pub max_line_length: usize,
    /// Close connections that send nothing for this long
    pub idle_timeout: Option<Duration>,
    /// Port of the admin HTTP API, disabled when `None`
    pub http_port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            backlog: DEFAULT_BACKLOG,
            history_size: DEFAULT_HISTORY_SIZE,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            idle_timeout: None,
            http_port: None,
        }
    }
}

impl ServerConfig {
    /// Per-connection part of the configuration
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            max_line_length: self.max_line_length,
            idle_timeout: self.idle_timeout,
        }
    }
}

/// Settings every connection loop runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub max_line_length: usize,
    pub idle_timeout: Option<Duration>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        ServerConfig::default().connection_settings()
    }
}
