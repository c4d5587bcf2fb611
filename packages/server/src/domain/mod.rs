//! Domain layer: the chat model and its invariants.
//!
//! Nothing in here performs I/O. Lines leave the domain only through the
//! [`Outbox`] trait, which the infrastructure layer implements.

mod command;
mod connection;
mod history;
mod outbox;
mod registry;
mod user;

pub use command::{Command, ParseError};
pub use connection::ConnectionHandle;
pub use history::{DEFAULT_HISTORY_SIZE, HistoryBuffer};
#[cfg(test)]
pub use outbox::MockOutbox;
pub use outbox::{MessagePushError, Outbox};
pub use registry::{Binding, Registry};
pub use user::{SYSTEM_IDENTITY, Sender, User, Username, UsernameError};
