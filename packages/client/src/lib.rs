//! Interactive terminal client for the Hiroba chat server.

mod command;
mod config;
mod error;
mod runner;
mod session;
mod ui;

pub use command::translate_input;
pub use config::ClientConfig;
pub use error::ClientError;
pub use runner::run_client;
pub use session::Session;
pub use ui::{Console, Output};
