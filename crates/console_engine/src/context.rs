//! Capabilities handed to every command execution.

use crate::{command::CommandNode, transcript::Transcript};

/// Execution-time view of the console.
///
/// Exposes the full top-level registry for introspection (`help`) and a capability to reset the
/// transcript (`clear`). It owns no other state.
pub struct ExecutionContext<'a> {
    commands: &'a [CommandNode],
    transcript: &'a mut Transcript,
}

impl<'a> ExecutionContext<'a> {
    /// Creates a context over the registry and transcript.
    pub fn new(commands: &'a [CommandNode], transcript: &'a mut Transcript) -> Self {
        Self {
            commands,
            transcript,
        }
    }

    /// Every top-level command, built-ins first.
    pub fn commands(&self) -> &'a [CommandNode] {
        self.commands
    }

    /// Removes every transcript line.
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Replaces the transcript with `lines`.
    pub fn replace_transcript(&mut self, lines: Vec<String>) {
        self.transcript.replace(lines);
    }
}
