//! Client execution logic.

use crate::{
    config::ClientConfig,
    error::ClientError,
    session::Session,
    ui::{Console, prompt_username, spawn_input_thread},
};

/// Run an interactive session on the terminal
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let username = match config.username {
        Some(name) => name.trim().to_string(),
        None => tokio::task::spawn_blocking(prompt_username).await??,
    };
    if username.is_empty() {
        return Err(ClientError::EmptyUsername);
    }

    let session = Session::connect(&config.host, config.port).await?;
    println!(
        "\nYou are '{}'. Type messages and press Enter to send.\n\
         Use /private <user> <text> for private messages, /status for server status, \
         /quit or Ctrl+C to exit.\n",
        username
    );

    let prompt = format!("{}> ", username);
    let input = spawn_input_thread(prompt.clone());
    let mut console = Console::new(prompt);
    session.run(&username, input, &mut console).await
}
