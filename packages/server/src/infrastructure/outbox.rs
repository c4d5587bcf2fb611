//! Channel-backed [`Outbox`] implementation.
//!
//! Handlers push into an unbounded channel; the connection's writer task
//! (`ui::connection`) drains it and writes each line to the socket. Pushing
//! therefore never waits on the network.

use tokio::sync::mpsc;

use crate::domain::{MessagePushError, Outbox};

/// Outbound line channel
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Outbox over an unbounded channel.
///
/// Pushes happen under the chat state lock and must never wait, so the
/// channel has no bound. A peer which stops reading keeps growing its
/// queue until it disconnects or `--idle-timeout-secs` closes it. Cleanup gives
/// the writer a bounded time to flush before dropping what is left.
pub struct ChannelOutbox {
    sender: PusherChannel,
}

impl ChannelOutbox {
    pub fn new(sender: PusherChannel) -> Self {
        Self { sender }
    }

    /// Create an outbox together with the receiver its writer task drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl Outbox for ChannelOutbox {
    fn push(&self, line: &str) -> Result<(), MessagePushError> {
        self.sender
            .send(line.to_string())
            .map_err(|_| MessagePushError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_push_preserves_order() {
        // テスト項目: push した順に受信側へ届く
        // given (前提条件):
        let (outbox, mut rx) = ChannelOutbox::channel();

        // when (操作):
        outbox.push("first").unwrap();
        outbox.push("second").unwrap();

        // then (期待する結果):
        assert_eq!(rx.recv().await, Some("first".to_string()));
        assert_eq!(rx.recv().await, Some("second".to_string()));
    }

    #[test]
    fn test_push_after_receiver_dropped_fails() {
        // テスト項目: 受信側が閉じた後の push は Closed エラーになる
        // given (前提条件):
        let (outbox, rx) = ChannelOutbox::channel();
        drop(rx);

        // when (操作):
        let result = outbox.push("lost");

        // then (期待する結果):
        assert_eq!(result, Err(MessagePushError::Closed));
    }
}
