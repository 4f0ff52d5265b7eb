use crate::models::{HistoryEntry, MessageRole};

/// How many past turns are replayed to the chat endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWindow {
    Unbounded,
    /// At most this many `(user, assistant)` pairs, newest last.
    Turns(usize),
}

impl HistoryWindow {
    /// `0` means unbounded.
    pub fn from_turns(turns: usize) -> Self {
        if turns == 0 {
            HistoryWindow::Unbounded
        } else {
            HistoryWindow::Turns(turns)
        }
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        HistoryWindow::Turns(crate::config::DEFAULT_HISTORY_TURNS)
    }
}

/// Append-only record of successful chat turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.entries.push(HistoryEntry::new(MessageRole::User, user));
        self.entries.push(HistoryEntry::new(MessageRole::Assistant, assistant));
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The tail of the history that fits in `window`.
    pub fn window(&self, window: HistoryWindow) -> &[HistoryEntry] {
        match window {
            HistoryWindow::Unbounded => &self.entries,
            HistoryWindow::Turns(turns) => {
                let keep = turns.saturating_mul(2).min(self.entries.len());
                &self.entries[self.entries.len() - keep..]
            }
        }
    }
}
