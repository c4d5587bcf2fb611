//! Interactive chat client for the Hiroba TCP chat server.
//!
//! Prompts for a username if none is given, connects and then sends what you
//! type. Plain text is broadcast; `/private <user> <text>` goes to one user.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --username alice
//! cargo run --bin hiroba-client -- -H 127.0.0.1 -p 50007
//! ```

use clap::Parser;
use hiroba_client::{ClientConfig, run_client};
use hiroba_shared::{
    logger::setup_logger,
    protocol::{DEFAULT_HOST, DEFAULT_PORT},
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Interactive client for the Hiroba TCP chat server", long_about = None)]
struct Args {
    /// Host of the chat server
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port of the chat server
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Username to connect as; prompted for when omitted
    #[arg(short = 'u', long)]
    username: Option<String>,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            username: args.username,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.into()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
