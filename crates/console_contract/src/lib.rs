//! Shared console contracts used by the tokenizer, the command engine, and the console widget.
//!
//! This crate is intentionally runtime-agnostic. It defines serializable command outcomes, error
//! classification, palette metadata, and suggestion snapshots without depending on Leptos,
//! browser APIs, or engine internals.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color used when neither the requested palette slot nor the palette default is set.
pub const FALLBACK_COLOR: &str = "#fff";

/// Chain of command names matched by one resolution, such as `hello day`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// Creates a path from matched name segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns the matched name segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of matched segments.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Space-joined path text as the user would type it.
    pub fn display(&self) -> String {
        self.0.join(" ")
    }
}

/// Result of one command execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// Whether the command achieved its intent. Parse errors never reach execution.
    pub completed: bool,
    /// Transcript text. Empty messages append nothing.
    pub message: String,
}

impl CommandOutcome {
    /// Successful completion with a transcript message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            completed: true,
            message: message.into(),
        }
    }

    /// Semantic failure with a transcript message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            completed: false,
            message: message.into(),
        }
    }

    /// Successful completion that appends nothing to the transcript.
    pub fn silent() -> Self {
        Self::success(String::new())
    }
}

/// Coarse error classification for rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsoleErrorCode {
    /// The line could not be tokenized.
    Malformed,
    /// The first token did not name a root command.
    NotFound,
    /// A resolved command rejected its arguments.
    Usage,
}

/// Error raised by tokenization, resolution, or parameter validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ConsoleError {
    /// The input contains an unterminated quote.
    #[error("malformed input: {message}")]
    MalformedInput {
        /// Human-readable reason.
        message: String,
    },
    /// No root command matches the first token.
    #[error("command not found: {token}")]
    CommandNotFound {
        /// The unresolved token.
        token: String,
    },
    /// The resolved command's parameter parser rejected the remaining tokens.
    #[error("invalid parameters, usage: {usage}")]
    InvalidParameters {
        /// Usage hint of the resolved command.
        usage: String,
    },
    /// A help page outside `1..=total_pages` was requested.
    #[error("invalid page {page}, expected 1-{total_pages}")]
    InvalidPage {
        /// Requested page number.
        page: usize,
        /// Number of available pages.
        total_pages: usize,
    },
}

impl ConsoleError {
    /// Creates a malformed input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Returns the error classification.
    pub fn code(&self) -> ConsoleErrorCode {
        match self {
            Self::MalformedInput { .. } => ConsoleErrorCode::Malformed,
            Self::CommandNotFound { .. } => ConsoleErrorCode::NotFound,
            Self::InvalidParameters { .. } | Self::InvalidPage { .. } => ConsoleErrorCode::Usage,
        }
    }

    /// Renders the single color-markup transcript line reporting this error.
    pub fn transcript_line(&self) -> String {
        let error = ColorToken::Error.markup();
        let primary = ColorToken::Primary.markup();
        match self {
            Self::MalformedInput { message } => {
                format!("{error}Malformed input{primary}: {message}")
            }
            Self::CommandNotFound { token } => format!("{error}Command not found: {primary}{token}"),
            Self::InvalidParameters { usage } => {
                format!("{error}Invalid parameters{primary}. Usage: {usage}")
            }
            Self::InvalidPage { page, total_pages } => {
                format!("{error}Invalid page{primary}: {page} (expected 1-{total_pages})")
            }
        }
    }
}

/// Inline color markup understood by the transcript renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorToken {
    /// `&r`
    Primary,
    /// `&s`
    Secondary,
    /// `&w`
    Warning,
    /// `&e`
    Error,
}

impl ColorToken {
    /// Maps the character following `&` to a token.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'r' => Some(Self::Primary),
            's' => Some(Self::Secondary),
            'w' => Some(Self::Warning),
            'e' => Some(Self::Error),
            _ => None,
        }
    }

    /// Returns the two-character markup for this token.
    pub fn markup(self) -> &'static str {
        match self {
            Self::Primary => "&r",
            Self::Secondary => "&s",
            Self::Warning => "&w",
            Self::Error => "&e",
        }
    }
}

/// Text palette consulted by the color token parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeColorSet {
    /// Normal output, selected by `&r` and at line start.
    pub primary: Option<String>,
    /// Accent output, selected by `&s`.
    pub secondary: Option<String>,
    /// Warnings, selected by `&w`.
    pub warning: Option<String>,
    /// Errors, selected by `&e`.
    pub error: Option<String>,
    /// Fallback for any unset slot.
    pub default: Option<String>,
}

impl ThemeColorSet {
    /// Resolves the color for `token`, falling back to `default` and then [`FALLBACK_COLOR`].
    pub fn color_for(&self, token: ColorToken) -> String {
        let slot = match token {
            ColorToken::Primary => &self.primary,
            ColorToken::Secondary => &self.secondary,
            ColorToken::Warning => &self.warning,
            ColorToken::Error => &self.error,
        };
        slot.as_ref()
            .or(self.default.as_ref())
            .cloned()
            .unwrap_or_else(|| FALLBACK_COLOR.to_string())
    }
}

/// One maximal run of same-colored transcript text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSegment {
    /// Text with markup stripped.
    pub text: String,
    /// Resolved palette color.
    pub color: String,
}

/// Metadata describing one submitted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Raw submitted line after trimming.
    pub line: String,
    /// Resolved command chain, if resolution succeeded.
    pub command_path: Option<CommandPath>,
    /// Command outcome when the command executed.
    pub outcome: Option<CommandOutcome>,
    /// Rejection reason when the command did not execute.
    pub error: Option<ConsoleError>,
}

impl ExecutionSummary {
    /// Whether the line executed and reported success.
    pub fn completed(&self) -> bool {
        self.outcome
            .as_ref()
            .map(|outcome| outcome.completed)
            .unwrap_or(false)
    }
}

/// Renderable view of the suggestion state after an input change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuggestionSnapshot {
    /// Ordered candidates for the token being completed.
    pub candidates: Vec<String>,
    /// Selected candidate index.
    pub selected: usize,
    /// Whether the popup should be shown.
    pub visible: bool,
    /// Untyped remainder of the selected candidate, for inline preview.
    pub ghost_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_falls_back_to_default_then_white() {
        let palette = ThemeColorSet {
            primary: Some("#349E44".to_string()),
            default: Some("#64A8BC".to_string()),
            ..ThemeColorSet::default()
        };
        assert_eq!(palette.color_for(ColorToken::Primary), "#349E44");
        assert_eq!(palette.color_for(ColorToken::Error), "#64A8BC");
        assert_eq!(
            ThemeColorSet::default().color_for(ColorToken::Warning),
            FALLBACK_COLOR
        );
    }

    #[test]
    fn error_lines_use_error_markup() {
        let line = ConsoleError::CommandNotFound {
            token: "frob".to_string(),
        }
        .transcript_line();
        assert_eq!(line, "&eCommand not found: &rfrob");

        let usage = ConsoleError::InvalidParameters {
            usage: "roll <sides> <rolls>".to_string(),
        };
        assert_eq!(usage.code(), ConsoleErrorCode::Usage);
        assert!(usage.transcript_line().contains("Usage: roll <sides> <rolls>"));
    }

    #[test]
    fn errors_serialize_with_kind_tag() {
        let value = serde_json::to_value(ConsoleError::InvalidPage {
            page: 99,
            total_pages: 1,
        })
        .expect("serialize");
        assert_eq!(value["kind"], "invalid-page");
        assert_eq!(value["page"], 99);
    }

    #[test]
    fn marker_mapping_covers_all_tokens() {
        for token in [
            ColorToken::Primary,
            ColorToken::Secondary,
            ColorToken::Warning,
            ColorToken::Error,
        ] {
            let marker = token.markup().chars().nth(1).expect("marker char");
            assert_eq!(ColorToken::from_marker(marker), Some(token));
        }
        assert_eq!(ColorToken::from_marker('x'), None);
    }

    #[test]
    fn command_path_displays_space_joined() {
        let path = CommandPath::from_segments(["hello", "day"]);
        assert_eq!(path.display(), "hello day");
        assert_eq!(path.depth(), 2);
    }
}
