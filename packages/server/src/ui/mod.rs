//! UI layer: TCP listener, connection loops and the admin HTTP API.

mod connection;
mod error;
pub mod http;
mod server;
mod signal;

pub use connection::handle_connection;
pub use error::ServerError;
pub use server::{Server, bind_listener};
pub use signal::shutdown_signal;
