//! Code shared by the Hiroba chat server and client.

pub mod logger;
pub mod protocol;
pub mod time;
