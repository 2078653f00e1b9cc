//! Rolling per-chat history of one-line message snippets.

use std::collections::VecDeque;

use dashmap::DashMap;
use teloxide::types::ChatId;

/// One rendered message snippet, tagged with authorship.
///
/// Immutable once built; the text is already sanitized and truncated by the
/// snippet formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    pub from_bot: bool,
    pub text: String,
}

impl HistoryLine {
    pub fn new(from_bot: bool, text: impl Into<String>) -> Self {
        Self {
            from_bot,
            text: text.into(),
        }
    }
}

/// Bounded FIFO buffers of recent history lines, one per chat.
///
/// Buffers are created lazily on first append. Appending to a full buffer
/// evicts the single oldest line, so no buffer ever exceeds `capacity`.
/// The backing map is sharded, so appends and snapshots for different chats
/// never contend with each other.
pub struct HistoryStore {
    buffers: DashMap<ChatId, VecDeque<HistoryLine>>,
    capacity: usize,
}

impl HistoryStore {
    /// Creates an empty store. `capacity` must be at least 1 (enforced at
    /// config load).
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: DashMap::new(),
            capacity,
        }
    }

    pub fn append(&self, chat_id: ChatId, line: HistoryLine) {
        let mut buffer = self
            .buffers
            .entry(chat_id)
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        if buffer.len() == self.capacity {
            buffer.pop_front();
        }
        buffer.push_back(line);
    }

    /// Returns an independent copy of the chat's buffer in chronological
    /// order. Later appends do not affect an already-returned snapshot.
    pub fn snapshot(&self, chat_id: ChatId) -> Vec<HistoryLine> {
        self.buffers
            .get(&chat_id)
            .map(|buffer| buffer.iter().cloned().collect())
            .unwrap_or_default()
    }
}
