//! Line-oriented TCP chat server.
//!
//! Clients connect over plain TCP, identify with `/connect <name>` and then
//! broadcast or send private messages, one command per line.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 50007 --http-port 8080
//! ```

use std::time::Duration;

use clap::Parser;
use hiroba_server::{
    Server, ServerConfig,
    config::{DEFAULT_BACKLOG, DEFAULT_MAX_LINE_LENGTH},
    domain::DEFAULT_HISTORY_SIZE,
    ui::shutdown_signal,
};
use hiroba_shared::{
    logger::setup_logger,
    protocol::{DEFAULT_HOST, DEFAULT_PORT},
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Line-oriented TCP chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Listen backlog of the chat socket
    #[arg(long, default_value_t = DEFAULT_BACKLOG)]
    backlog: u32,

    /// Number of broadcast messages replayed to newly connected clients
    #[arg(long, default_value_t = DEFAULT_HISTORY_SIZE)]
    history_size: usize,

    /// Longest accepted input line, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    max_line_length: usize,

    /// Close connections that stay silent for this many seconds.
    /// Without it, a client that stops reading keeps its outgoing queue in memory
    /// until it disconnects.
    #[arg(long)]
    idle_timeout_secs: Option<u64>,

    /// Serve the admin HTTP API on this port
    #[arg(long)]
    http_port: Option<u16>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            backlog: args.backlog,
            history_size: args.history_size,
            max_line_length: args.max_line_length,
            idle_timeout: args.idle_timeout_secs.map(Duration::from_secs),
            http_port: args.http_port,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let server = Server::new(args.into());
    if let Err(e) = server.run(shutdown_signal()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
