//! Command resolution, parsing, and autocomplete engine for an embeddable console.
//!
//! The engine consumes a declarative [`CommandNode`] forest and an input line and produces
//! either suggestions or an execution result. It has no UI framework dependency: hosts drive a
//! [`ConsoleSession`] from their own input events and paint the colored segments it returns.
//!
//! # Example
//!
//! ```
//! use console_contract::CommandOutcome;
//! use console_engine::{CommandNode, ConsoleSession};
//!
//! let greet = CommandNode::new("greet", "Says hi", "greet <name>", |args, _, _| {
//!     CommandOutcome::success(format!("Hi {}", args.join(" ")))
//! });
//! let mut session = ConsoleSession::new(vec![greet]);
//! session.set_input("greet Sam");
//! session.submit();
//! assert_eq!(session.transcript().lines(), &["> greet Sam", "Hi Sam"]);
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod builtins;
pub mod command;
pub mod context;
pub mod history;
pub mod markup;
pub mod session;
pub mod suggest;
pub mod transcript;
pub mod tree;

pub use command::{
    split_flags, unknown_subcommand, CommandNode, CommandParams, ExecuteHandler, ParseHandler,
    SuggestHandler,
};
pub use context::ExecutionContext;
pub use history::{CommandHistoryLog, HistoryStep};
pub use markup::{plain_text, render_segments};
pub use session::{ConsoleAction, ConsoleSession, ECHO_PREFIX};
pub use suggest::{
    accept_candidate, compute_suggestions, SuggestionState, Suggestions,
    DEFAULT_VISIBLE_SUGGESTIONS,
};
pub use transcript::Transcript;
pub use tree::{resolve, resolve_chain, resolve_depth, CommandTree, Resolution};
