//! Terminal input and output.

use std::io::Write;

use hiroba_shared::protocol::QUIT_COMMAND;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::error::ClientError;

/// Where received lines are shown
pub trait Output {
    fn show(&mut self, line: &str);
}

/// Collects lines, for tests and scripted use
impl Output for Vec<String> {
    fn show(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Prints to stdout and redraws the input prompt after each line
#[derive(Debug, Clone)]
pub struct Console {
    prompt: String,
}

impl Console {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl Output for Console {
    fn show(&mut self, line: &str) {
        print!("\r{}\n{}", line, self.prompt);
        std::io::stdout().flush().ok();
    }
}

/// Ask for a username until a non-empty one is given
pub fn prompt_username() -> Result<String, ClientError> {
    let mut rl = DefaultEditor::new()?;
    loop {
        let name = rl.readline("Enter your username: ")?;
        let name = name.trim();
        if !name.is_empty() {
            return Ok(name.to_string());
        }
    }
}

/// Read lines on a dedicated thread (rustyline blocks) and forward them.
///
/// Ctrl+C and Ctrl+D are turned into `/quit`. The thread stops after
/// forwarding `/quit` or when the receiver is dropped.
pub fn spawn_input_thread(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                let _ = input_tx.send(QUIT_COMMAND.to_string());
                return;
            }
        };

        loop {
            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    tracing::debug!("Input closed, leaving");
                    QUIT_COMMAND.to_string()
                }
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    QUIT_COMMAND.to_string()
                }
            };

            let quitting = line.trim().starts_with(QUIT_COMMAND);
            if !line.trim().is_empty() {
                rl.add_history_entry(line.trim()).ok();
            }
            if input_tx.send(line).is_err() || quitting {
                break;
            }
        }
    });

    input_rx
}
