//! Framework-independent console controller.
//!
//! One [`ConsoleSession`] owns everything a console instance mutates: the input line, the
//! transcript, the history log, and the suggestion state. Every user event maps to one method,
//! and each call runs to completion before returning.

use console_contract::{
    ColorSegment, CommandOutcome, CommandPath, ConsoleError, ExecutionSummary,
    SuggestionSnapshot, ThemeColorSet,
};
use console_tokenizer::tokenize;
use serde::{Deserialize, Serialize};

use crate::{
    command::CommandNode,
    context::ExecutionContext,
    history::{CommandHistoryLog, HistoryStep},
    markup::plain_text,
    suggest::{accept_candidate, SuggestionState},
    transcript::Transcript,
    tree::CommandTree,
};

/// Prefix of the echo line appended for every submitted command.
pub const ECHO_PREFIX: &str = "> ";

/// Control actions the input surface can raise besides editing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsoleAction {
    /// Run the current line.
    Submit,
    /// Recall an older history entry.
    HistoryOlder,
    /// Recall a newer history entry.
    HistoryNewer,
    /// Select the next suggestion.
    SuggestionNext,
    /// Select the previous suggestion.
    SuggestionPrevious,
    /// Replace the token under edit with the selected suggestion.
    AcceptSuggestion,
    /// Hide the suggestion popup.
    DismissSuggestions,
}

/// State-owning controller for one console instance.
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    tree: CommandTree,
    transcript: Transcript,
    history: CommandHistoryLog,
    input: String,
    suggestions: SuggestionState,
}

impl ConsoleSession {
    /// Builds a session over the built-ins plus `commands`.
    pub fn new(commands: Vec<CommandNode>) -> Self {
        Self::with_tree(CommandTree::new(commands))
    }

    /// Builds a session over an already assembled tree.
    pub fn with_tree(tree: CommandTree) -> Self {
        Self {
            tree,
            transcript: Transcript::new(),
            history: CommandHistoryLog::new(),
            input: String::new(),
            suggestions: SuggestionState::new(),
        }
    }

    /// Command registry.
    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Output lines so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Submitted lines and recall cursor.
    pub fn history(&self) -> &CommandHistoryLog {
        &self.history
    }

    /// Current input line.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current suggestion state.
    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    /// Replaces the input after a user edit and recomputes suggestions.
    ///
    /// Editing leaves history recall.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.history.reset_cursor();
        self.suggestions.update(&self.input, self.tree.roots());
    }

    /// Runs one control action. Returns a summary when the action submitted a line.
    pub fn dispatch(&mut self, action: ConsoleAction) -> Option<ExecutionSummary> {
        log::debug!("console action {action:?}");
        match action {
            ConsoleAction::Submit => return self.submit(),
            ConsoleAction::HistoryOlder => self.history_older(),
            ConsoleAction::HistoryNewer => self.history_newer(),
            ConsoleAction::SuggestionNext => self.suggestions.next(),
            ConsoleAction::SuggestionPrevious => self.suggestions.previous(),
            ConsoleAction::AcceptSuggestion => {
                self.accept_suggestion();
            }
            ConsoleAction::DismissSuggestions => self.suggestions.dismiss(),
        }
        None
    }

    /// Submits the current input, clearing it and the suggestions first.
    pub fn submit(&mut self) -> Option<ExecutionSummary> {
        let line = std::mem::take(&mut self.input);
        self.suggestions.clear();
        self.process_command(&line)
    }

    /// Runs `line` against the registry and appends its output to the transcript.
    ///
    /// Whitespace-only lines do nothing and return `None`. Otherwise the echo `> <line>` is
    /// appended before the command runs, so a command that clears the transcript also removes
    /// its own echo. Rejected lines append exactly one error line after the echo. Lines that
    /// fail to tokenize are not recorded in history.
    pub fn process_command(&mut self, line: &str) -> Option<ExecutionSummary> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.transcript.push(format!("{ECHO_PREFIX}{line}"));

        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(err) => return Some(self.reject(line, None, err)),
        };
        self.history.push(line);

        let Some(resolution) = self.tree.resolve_chain(&tokens) else {
            let token = tokens
                .first()
                .cloned()
                .unwrap_or_else(|| line.to_string());
            return Some(self.reject(line, None, ConsoleError::CommandNotFound { token }));
        };
        let node = resolution.node;
        let path = resolution.path(&tokens);
        let args = resolution.remaining(&tokens);
        log::debug!("resolved `{}` with {} argument(s)", path.display(), args.len());

        let Some(params) = node.parse_parameters(args) else {
            let usage = node.usage().to_string();
            return Some(self.reject(
                line,
                Some(path),
                ConsoleError::InvalidParameters { usage },
            ));
        };

        let outcome = {
            let mut context = ExecutionContext::new(self.tree.roots(), &mut self.transcript);
            node.execute(args, &params, &mut context)
        };
        self.append_outcome(&outcome);

        Some(ExecutionSummary {
            line: line.to_string(),
            command_path: Some(path),
            outcome: Some(outcome),
            error: None,
        })
    }

    /// Steps history toward older entries and shows the recalled line.
    pub fn history_older(&mut self) {
        let step = self.history.older();
        self.apply_history_step(step);
    }

    /// Steps history toward newer entries, clearing the input after the newest.
    pub fn history_newer(&mut self) {
        let step = self.history.newer();
        self.apply_history_step(step);
    }

    /// Accepts the selected suggestion. Returns whether the input changed.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(candidate) = self.suggestions.selected_candidate() else {
            return false;
        };
        match accept_candidate(&self.input, candidate) {
            Ok(next) => {
                self.set_input(next);
                true
            }
            Err(err) => {
                log::debug!("suggestion not accepted: {err}");
                false
            }
        }
    }

    /// Renderable suggestion state for the current input.
    pub fn suggestion_snapshot(&self) -> SuggestionSnapshot {
        self.suggestions.snapshot(&self.input)
    }

    /// Transcript lines split into colored segments.
    pub fn render_transcript(&self, palette: &ThemeColorSet) -> Vec<Vec<ColorSegment>> {
        self.transcript.render(palette)
    }

    fn apply_history_step(&mut self, step: HistoryStep) {
        match step {
            HistoryStep::Unchanged => return,
            HistoryStep::Recalled(line) => self.input = line,
            HistoryStep::Exited => self.input.clear(),
        }
        self.suggestions.clear();
    }

    fn append_outcome(&mut self, outcome: &CommandOutcome) {
        if !outcome.message.is_empty() {
            self.transcript.push(outcome.message.clone());
        }
    }

    fn reject(
        &mut self,
        line: &str,
        command_path: Option<CommandPath>,
        error: ConsoleError,
    ) -> ExecutionSummary {
        let reply = error.transcript_line();
        log::debug!(
            "rejected `{line}` ({:?}): {}",
            error.code(),
            plain_text(&reply)
        );
        self.transcript.push(reply);
        ExecutionSummary {
            line: line.to_string(),
            command_path,
            outcome: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo() -> CommandNode {
        CommandNode::new("echo", "Repeats its input", "echo <text>", |args, _, _| {
            CommandOutcome::success(args.join(" "))
        })
        .with_parser(|args: &[String]| {
            (!args.is_empty()).then(crate::command::CommandParams::new)
        })
    }

    #[test]
    fn echo_is_appended_before_output() {
        let mut session = ConsoleSession::new(vec![echo()]);
        session.set_input("echo \"a b\" c");
        let summary = session.submit().expect("summary");
        assert!(summary.completed());
        assert_eq!(session.transcript().lines(), &["> echo \"a b\" c", "a b c"]);
        assert_eq!(session.input(), "");
    }

    #[test]
    fn whitespace_submission_is_ignored() {
        let mut session = ConsoleSession::new(Vec::new());
        session.set_input("   ");
        assert!(session.submit().is_none());
        assert!(session.transcript().is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn malformed_input_is_reported_and_not_recorded() {
        let mut session = ConsoleSession::new(vec![echo()]);
        let summary = session.process_command("echo \"open").expect("summary");
        assert!(matches!(summary.error, Some(ConsoleError::MalformedInput { .. })));
        assert_eq!(session.transcript().len(), 2);
        assert!(session.history().is_empty());
    }

    #[test]
    fn parse_rejection_reports_usage() {
        let mut session = ConsoleSession::new(vec![echo()]);
        let summary = session.process_command("echo").expect("summary");
        assert_eq!(
            summary.error,
            Some(ConsoleError::InvalidParameters {
                usage: "echo <text>".to_string()
            })
        );
        assert_eq!(
            session.transcript().lines()[1],
            "&eInvalid parameters&r. Usage: echo <text>"
        );
        let error = summary.error.expect("rejected");
        assert_eq!(error.code(), console_contract::ConsoleErrorCode::Usage);
        assert_eq!(
            plain_text(&session.transcript().lines()[1]),
            "Invalid parameters. Usage: echo <text>"
        );
    }

    #[test]
    fn editing_leaves_history_recall() {
        let mut session = ConsoleSession::new(vec![echo()]);
        session.process_command("echo one");
        session.dispatch(ConsoleAction::HistoryOlder);
        assert_eq!(session.input(), "echo one");
        assert!(!session.suggestions().is_visible());
        session.set_input("echo one!");
        assert_eq!(session.history().cursor(), None);
    }

    #[test]
    fn dispatch_accepts_selected_suggestion() {
        let mut session = ConsoleSession::new(vec![echo()]);
        session.set_input("ec");
        assert!(session.suggestions().is_visible());
        assert!(session.dispatch(ConsoleAction::AcceptSuggestion).is_none());
        assert_eq!(session.input(), "echo ");
        assert!(!session.suggestions().is_visible());
    }
}
