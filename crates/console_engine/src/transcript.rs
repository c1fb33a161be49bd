//! Append-only output log shown to the user.

use console_contract::{ColorSegment, ThemeColorSet};
use serde::{Deserialize, Serialize};

use crate::markup::render_segments;

/// Ordered raw output lines, each possibly holding color markup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// Empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Raw lines in insertion order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the transcript holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Replaces every line.
    pub fn replace(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    /// Splits every line into colored segments for painting.
    pub fn render(&self, palette: &ThemeColorSet) -> Vec<Vec<ColorSegment>> {
        self.lines
            .iter()
            .map(|line| render_segments(line, palette))
            .collect()
    }
}
