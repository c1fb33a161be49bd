//! Headless line tokenizer for the console engine.
//!
//! This crate intentionally implements only what the console needs: space-separated tokens,
//! single/double quoted segments, and byte spans so callers can rewrite the token under the
//! cursor without re-splitting the line.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use console_contract::ConsoleError;
use serde::{Deserialize, Serialize};

const SEPARATOR: char = ' ';

/// One token with its byte span in the source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text with quote characters stripped.
    pub text: String,
    /// Byte offset of the first character, including an opening quote.
    pub start: usize,
    /// Byte offset one past the last character, including a closing quote.
    pub end: usize,
}

/// Tokenized view of an input line as seen while the user is typing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineShape {
    /// Parsed tokens in order.
    pub tokens: Vec<Token>,
    /// Whether the line ends in a separator, meaning the next token has not started yet.
    pub ends_with_separator: bool,
}

impl LineShape {
    /// Whether the line holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token texts in order.
    pub fn texts(&self) -> Vec<String> {
        self.tokens.iter().map(|token| token.text.clone()).collect()
    }

    /// The token still being typed, if the line does not end in a separator.
    pub fn partial(&self) -> Option<&Token> {
        if self.ends_with_separator {
            None
        } else {
            self.tokens.last()
        }
    }

    /// Token texts before the one still being typed.
    pub fn completed(&self) -> Vec<String> {
        let take = if self.ends_with_separator {
            self.tokens.len()
        } else {
            self.tokens.len().saturating_sub(1)
        };
        self.tokens[..take]
            .iter()
            .map(|token| token.text.clone())
            .collect()
    }
}

/// Splits `line` into token texts.
///
/// # Errors
///
/// Returns [`ConsoleError::MalformedInput`] when a quote is opened and never closed.
pub fn tokenize(line: &str) -> Result<Vec<String>, ConsoleError> {
    Ok(tokenize_spans(line)?
        .into_iter()
        .map(|token| token.text)
        .collect())
}

/// Splits `line` into tokens and records each token's byte span.
///
/// # Errors
///
/// Returns [`ConsoleError::MalformedInput`] when a quote is opened and never closed.
pub fn tokenize_spans(line: &str) -> Result<Vec<Token>, ConsoleError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = None::<usize>;
    let mut quote = None::<char>;

    for (index, ch) in line.char_indices() {
        match quote {
            Some(active) if ch == active => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                start.get_or_insert(index);
                quote = Some(ch);
            }
            None if ch == SEPARATOR => {
                if let Some(token_start) = start.take() {
                    push_token(&mut tokens, &mut current, token_start, index);
                }
            }
            None => {
                start.get_or_insert(index);
                current.push(ch);
            }
        }
    }

    if let Some(active) = quote {
        return Err(ConsoleError::malformed(format!(
            "unterminated {active} quote"
        )));
    }

    if let Some(token_start) = start {
        push_token(&mut tokens, &mut current, token_start, line.len());
    }

    Ok(tokens)
}

/// Tokenizes a line that may still be under edit.
///
/// # Errors
///
/// Returns [`ConsoleError::MalformedInput`] when a quote is still open.
pub fn analyze_line(line: &str) -> Result<LineShape, ConsoleError> {
    Ok(LineShape {
        tokens: tokenize_spans(line)?,
        ends_with_separator: line.ends_with(SEPARATOR),
    })
}

// `start` is only set by a character or an opening quote, so an empty `current` here is a
// quoted empty argument.
fn push_token(tokens: &mut Vec<Token>, current: &mut String, start: usize, end: usize) {
    tokens.push(Token {
        text: std::mem::take(current),
        start,
        end,
    });
}
