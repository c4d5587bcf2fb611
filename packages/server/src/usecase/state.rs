//! Process-wide chat state.

use crate::domain::{HistoryBuffer, Registry};

/// Registry and history, always mutated together under one lock.
#[derive(Debug)]
pub struct ChatState {
    pub registry: Registry,
    pub history: HistoryBuffer,
}

impl ChatState {
    pub fn new(history_size: usize) -> Self {
        Self {
            registry: Registry::new(),
            history: HistoryBuffer::new(history_size),
        }
    }
}
