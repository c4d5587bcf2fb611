//! Line-oriented TCP chat server.
//!
//! Clients bind a connection to a username with `/connect`, then broadcast
//! with `/send`, message one user with `/send <user> -> <text>`, inspect the
//! server with `/status` and leave with `/quit`. Recent broadcasts are kept in
//! a bounded history that is replayed to every newly connected client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;

pub use config::ServerConfig;
pub use ui::{Server, ServerError, bind_listener};
