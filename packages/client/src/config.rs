//! Client configuration.

use hiroba_shared::protocol::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host of the chat server
    pub host: String,
    /// Port of the chat server
    pub port: u16,
    /// Prompted for at startup when `None`
    pub username: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: None,
        }
    }
}
