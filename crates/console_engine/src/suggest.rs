//! Incremental completion of the token under edit.
//!
//! [`compute_suggestions`] is a pure function of the input line and the forest. [`SuggestionState`]
//! wraps it with the selection and visibility the input surface needs between keystrokes.

use std::ops::Range;

use console_contract::{ConsoleError, SuggestionSnapshot};
use console_tokenizer::analyze_line;

use crate::{command::CommandNode, tree::resolve_chain};

/// Popup rows shown at once unless the host asks otherwise.
pub const DEFAULT_VISIBLE_SUGGESTIONS: usize = 3;

/// Candidates for the token under edit plus the visibility decision.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestions {
    /// Candidates in declared or provider order.
    pub candidates: Vec<String>,
    /// Whether a popup should be shown.
    pub visible: bool,
}

impl Suggestions {
    fn hidden() -> Self {
        Self::default()
    }

    fn shown(candidates: Vec<String>) -> Self {
        let visible = !candidates.is_empty();
        Self {
            candidates,
            visible,
        }
    }
}

/// Computes completions for `input` against `roots`.
///
/// Static command names match by case-sensitive prefix; lists from a node's suggestion function
/// match case-insensitively. A lone candidate equal to the typed token is suppressed as already
/// complete, unless it names a command with children or a suggestion function.
pub fn compute_suggestions(input: &str, roots: &[CommandNode]) -> Suggestions {
    if input.trim().is_empty() {
        return Suggestions::hidden();
    }
    let shape = match analyze_line(input) {
        Ok(shape) => shape,
        Err(err) => {
            log::debug!("suggestions hidden for unparsable input: {err}");
            return Suggestions::hidden();
        }
    };
    let tokens = shape.texts();

    let Some(partial) = shape.partial().map(|token| token.text.as_str()) else {
        return suggest_next_token(&tokens, roots);
    };

    if tokens.len() == 1 {
        let candidates = filter_names(roots, partial);
        return suppress_static_exact(candidates, partial, roots);
    }

    let prior = shape.completed();
    let Some(resolution) = resolve_chain(&prior, roots) else {
        log::debug!("no command for {prior:?}; offering root names");
        return Suggestions::shown(filter_names(roots, partial));
    };
    let node = resolution.node;

    if let Some(dynamic) = node.suggest_arguments(resolution.remaining(&prior)) {
        let needle = partial.to_lowercase();
        let candidates: Vec<String> = dynamic
            .into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .collect();
        if candidates.len() == 1 && candidates[0] == partial {
            return Suggestions::hidden();
        }
        return Suggestions::shown(candidates);
    }

    if node.has_children() {
        let candidates = filter_names(node.children(), partial);
        return suppress_static_exact(candidates, partial, node.children());
    }

    Suggestions::hidden()
}

fn suggest_next_token(tokens: &[String], roots: &[CommandNode]) -> Suggestions {
    let Some(resolution) = resolve_chain(tokens, roots) else {
        return Suggestions::hidden();
    };
    let node = resolution.node;
    if let Some(dynamic) = node.suggest_arguments(resolution.remaining(tokens)) {
        return Suggestions::shown(dynamic);
    }
    if node.has_children() {
        return Suggestions::shown(filter_names(node.children(), ""));
    }
    Suggestions::hidden()
}

/// Names in `forest` starting with `prefix`, first occurrence of each name only.
fn filter_names(forest: &[CommandNode], prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for node in forest {
        if node.name().starts_with(prefix) && !names.iter().any(|name| name == node.name()) {
            names.push(node.name().to_string());
        }
    }
    names
}

fn suppress_static_exact(
    candidates: Vec<String>,
    typed: &str,
    forest: &[CommandNode],
) -> Suggestions {
    if candidates.len() == 1 && candidates[0] == typed {
        let navigable = forest
            .iter()
            .find(|node| node.name() == typed)
            .is_some_and(CommandNode::is_navigable);
        if !navigable {
            return Suggestions::hidden();
        }
    }
    Suggestions::shown(candidates)
}

/// Returns `input` with its token under edit replaced by `candidate` and a trailing space.
///
/// When `input` ends in a space the candidate is appended instead. Candidates containing spaces
/// are quoted so they stay a single token.
///
/// # Errors
///
/// Returns [`ConsoleError::MalformedInput`] when `input` has an open quote.
pub fn accept_candidate(input: &str, candidate: &str) -> Result<String, ConsoleError> {
    let shape = analyze_line(input)?;
    let kept = match shape.partial() {
        Some(token) => &input[..token.start],
        None => input,
    };
    Ok(format!("{kept}{} ", quote_if_needed(candidate)))
}

fn quote_if_needed(candidate: &str) -> String {
    if !candidate.contains(' ') {
        candidate.to_string()
    } else if candidate.contains('"') {
        format!("'{candidate}'")
    } else {
        format!("\"{candidate}\"")
    }
}

/// Candidate list, selection, and visibility carried between keystrokes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestionState {
    candidates: Vec<String>,
    selected: usize,
    visible: bool,
}

impl SuggestionState {
    /// Hidden, empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes candidates for `input`. The selection resets only when the list changes.
    pub fn update(&mut self, input: &str, roots: &[CommandNode]) {
        let Suggestions {
            candidates,
            visible,
        } = compute_suggestions(input, roots);
        if candidates != self.candidates {
            self.selected = 0;
            self.candidates = candidates;
        }
        self.visible = visible;
    }

    /// Hides and forgets every candidate.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Hides the popup, keeping candidates for a later update.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Selects the next candidate, wrapping to the first.
    pub fn next(&mut self) {
        if !self.candidates.is_empty() {
            self.selected = (self.selected + 1) % self.candidates.len();
        }
    }

    /// Selects the previous candidate, wrapping to the last.
    pub fn previous(&mut self) {
        if !self.candidates.is_empty() {
            let len = self.candidates.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Current candidates.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Selected index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Whether the popup is shown.
    pub fn is_visible(&self) -> bool {
        self.visible && !self.candidates.is_empty()
    }

    /// Selected candidate while the popup is shown.
    pub fn selected_candidate(&self) -> Option<&str> {
        if !self.is_visible() {
            return None;
        }
        self.candidates.get(self.selected).map(String::as_str)
    }

    /// Untyped remainder of the selected candidate, when it extends the token under edit.
    pub fn ghost_text(&self, input: &str) -> Option<String> {
        let candidate = self.selected_candidate()?;
        let shape = analyze_line(input).ok()?;
        let typed = shape
            .partial()
            .map(|token| token.text.as_str())
            .unwrap_or_default();
        candidate
            .strip_prefix(typed)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }

    /// Index range of at most `max_visible` candidates, centered on the selection.
    pub fn visible_window(&self, max_visible: usize) -> Range<usize> {
        let len = self.candidates.len();
        if len <= max_visible {
            return 0..len;
        }
        let start = self
            .selected
            .saturating_sub(max_visible / 2)
            .min(len - max_visible);
        start..start + max_visible
    }

    /// Renderable copy for `input`.
    pub fn snapshot(&self, input: &str) -> SuggestionSnapshot {
        SuggestionSnapshot {
            candidates: self.candidates.clone(),
            selected: self.selected,
            visible: self.is_visible(),
            ghost_text: self.ghost_text(input),
        }
    }
}
