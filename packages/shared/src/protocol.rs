//! Wire protocol constants.
//!
//! The protocol is newline-delimited UTF-8 text. Clients send one command per
//! line; the server answers with plain text lines.

/// Banner written by the server as soon as a connection is accepted.
pub const WELCOME_BANNER: &str = "Welcome to the server!";

/// Confirmation written after a successful `/connect`.
pub const CONNECTED_NOTICE: &str = "You are now connected!";

/// Terminal line written by the server before it closes a connection.
/// Sent by clients to leave.
pub const QUIT_LINE: &str = "/quit";

pub const SEND_COMMAND: &str = "/send";
pub const STATUS_COMMAND: &str = "/status";
pub const CONNECT_COMMAND: &str = "/connect";
pub const QUIT_COMMAND: &str = "/quit";

/// Client-side shorthand for private messages, translated before sending.
pub const PRIVATE_SHORTHAND: &str = "/private";

/// Separates the target from the text in a private `/send`.
pub const PRIVATE_DELIMITER: &str = "->";

/// Default TCP port of the chat server.
pub const DEFAULT_PORT: u16 = 50007;

/// Default host of the chat server.
pub const DEFAULT_HOST: &str = "127.0.0.1";
