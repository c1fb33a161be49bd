//! Submitted-line history with a recall cursor.

use serde::{Deserialize, Serialize};

/// Effect of one recall step on the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStep {
    /// Nothing to recall; leave the input as is.
    Unchanged,
    /// Show this entry as the editable input.
    Recalled(String),
    /// Stepped past the newest entry; the input should be cleared.
    Exited,
}

/// Append-only log of submitted lines.
///
/// `cursor` is `None` while not recalling, otherwise an index into `entries`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandHistoryLog {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl CommandHistoryLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submitted line and stops recalling.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = None;
    }

    /// Steps toward older entries. Stays on the oldest entry once reached.
    pub fn older(&mut self) -> HistoryStep {
        if self.entries.is_empty() {
            return HistoryStep::Unchanged;
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(index) => index.saturating_sub(1),
        };
        self.recall(index)
    }

    /// Steps toward newer entries, leaving recall after the newest one.
    pub fn newer(&mut self) -> HistoryStep {
        match self.cursor {
            None => HistoryStep::Unchanged,
            Some(index) if index + 1 < self.entries.len() => self.recall(index + 1),
            Some(_) => {
                self.cursor = None;
                HistoryStep::Exited
            }
        }
    }

    /// Current recall index.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Stops recalling without touching the entries.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Submitted lines, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was submitted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn recall(&mut self, index: usize) -> HistoryStep {
        self.cursor = Some(index);
        HistoryStep::Recalled(self.entries[index].clone())
    }
}
