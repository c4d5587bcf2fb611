//! Data Transfer Objects
//!
//! ## Modules
//!
//! - `http`: JSON bodies of the admin HTTP API

pub mod http;
