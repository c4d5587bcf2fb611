//! Bounded broadcast history.

use std::collections::VecDeque;

/// Number of broadcast lines kept when no size is configured.
pub const DEFAULT_HISTORY_SIZE: usize = 20;

/// Insertion-ordered FIFO of formatted broadcast lines.
///
/// Holds at most `capacity` entries; pushing beyond that evicts the oldest.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryBuffer {
    /// `capacity` is a bound, not an allocation hint: storage grows with use.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_SIZE)),
            capacity,
        }
    }

    /// Append an entry, returning the evicted one if the bound was exceeded.
    pub fn push(&mut self, entry: String) -> Option<String> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity_keeps_everything() {
        // テスト項目: 容量以内なら全てのエントリが保持される
        // given (前提条件):
        let mut history = HistoryBuffer::new(3);

        // when (操作):
        let evicted: Vec<_> = ["a", "b"]
            .into_iter()
            .map(|e| history.push(e.to_string()))
            .collect();

        // then (期待する結果):
        assert_eq!(evicted, vec![None, None]);
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_push_beyond_capacity_evicts_oldest_first() {
        // テスト項目: history_size + k 件追加すると最新の history_size 件だけが残る
        // given (前提条件):
        let capacity = 5;
        let extra = 3;
        let mut history = HistoryBuffer::new(capacity);

        // when (操作):
        let mut evicted = Vec::new();
        for i in 0..capacity + extra {
            if let Some(old) = history.push(format!("user: message {i}")) {
                evicted.push(old);
            }
        }

        // then (期待する結果):
        assert_eq!(history.len(), capacity);
        let expected: Vec<String> = (extra..capacity + extra)
            .map(|i| format!("user: message {i}"))
            .collect();
        assert_eq!(history.iter().collect::<Vec<_>>(), expected);
        assert_eq!(
            evicted,
            vec!["user: message 0", "user: message 1", "user: message 2"]
        );
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        // テスト項目: 容量 0 の場合は何も保持しない
        // given (前提条件):
        let mut history = HistoryBuffer::new(0);

        // when (操作):
        let evicted = history.push("bob: hi".to_string());

        // then (期待する結果):
        assert_eq!(evicted.as_deref(), Some("bob: hi"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_default_capacity() {
        // テスト項目: デフォルトの容量は 20
        // given (前提条件):

        // when (操作):
        let history = HistoryBuffer::default();

        // then (期待する結果):
        assert_eq!(history.capacity(), DEFAULT_HISTORY_SIZE);
        assert_eq!(history.capacity(), 20);
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        // テスト項目: 非常に大きな上限を指定しても起動時に確保せず、通常どおり動作する
        // given (前提条件):
        let mut history = HistoryBuffer::new(usize::MAX);

        // when (操作):
        let evicted = history.push("alice: hi".to_string());

        // then (期待する結果):
        assert_eq!(evicted, None);
        assert_eq!(history.capacity(), usize::MAX);
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["alice: hi"]);
    }
}
