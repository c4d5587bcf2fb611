//! Translation of what the user types into wire commands.

use hiroba_shared::protocol::{
    CONNECT_COMMAND, PRIVATE_DELIMITER, PRIVATE_SHORTHAND, QUIT_COMMAND, SEND_COMMAND,
    STATUS_COMMAND,
};

use crate::error::ClientError;

const PRIVATE_USAGE: &str = "/private <user> <text>";

/// Turn one input line into the line to send, if any.
///
/// - `/private <user> <text>` becomes `/send <user> -> <text>`
/// - `/connect` always connects as `username`
/// - `/status` and `/quit` are forwarded as typed
/// - empty input sends nothing
/// - anything else is broadcast with `/send`
///
/// # Errors
///
/// Returns [`ClientError::Usage`] for a `/private` line without a recipient
/// or without text.
pub fn translate_input(raw: &str, username: &str) -> Result<Option<String>, ClientError> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = line.strip_prefix(PRIVATE_SHORTHAND) {
        let (recipient, text) = rest
            .trim_start()
            .split_once(' ')
            .map(|(recipient, text)| (recipient, text.trim()))
            .filter(|(recipient, text)| !recipient.is_empty() && !text.is_empty())
            .ok_or(ClientError::Usage(PRIVATE_USAGE))?;
        return Ok(Some(format!(
            "{SEND_COMMAND} {recipient} {PRIVATE_DELIMITER} {text}"
        )));
    }
    if line.starts_with(CONNECT_COMMAND) {
        return Ok(Some(format!("{CONNECT_COMMAND} {username}")));
    }
    if line.starts_with(QUIT_COMMAND) || line.starts_with(STATUS_COMMAND) {
        return Ok(Some(line.to_string()));
    }

    Ok(Some(format!("{SEND_COMMAND} {line}")))
}
