//! Built-in `help` and `clear` commands and the registry binding for help's suggestions.

use std::rc::Rc;

use console_contract::{CommandOutcome, ConsoleError};

use crate::{
    command::{CommandNode, CommandParams, SuggestHandler},
    context::ExecutionContext,
    tree,
};

/// Name of the built-in help command.
pub const HELP_COMMAND: &str = "help";
/// Name of the built-in clear command.
pub const CLEAR_COMMAND: &str = "clear";
/// Top-level commands listed per help page.
pub const HELP_PAGE_SIZE: usize = 10;

const PAGE_FLAG: &str = "--page=";
const LISTING_NAME_WIDTH: usize = 24;
const ARGUMENT_NAME_WIDTH: usize = 16;

/// Built-in commands in registration order.
pub fn builtin_commands() -> Vec<CommandNode> {
    vec![help_command(), clear_command()]
}

/// `help [command] [subcommand ...] [--page=N]`
pub fn help_command() -> CommandNode {
    CommandNode::new(
        HELP_COMMAND,
        "Displays help information about commands",
        "help [command] [subcommand ...] [--page=#]",
        run_help,
    )
    .with_parser(parse_help)
}

/// `clear`: empties the transcript, including the line that invoked it.
pub fn clear_command() -> CommandNode {
    CommandNode::new(
        CLEAR_COMMAND,
        "Clears the console output",
        CLEAR_COMMAND,
        |_, _, context| {
            context.clear_transcript();
            CommandOutcome::silent()
        },
    )
}

fn parse_help(args: &[String]) -> Option<CommandParams> {
    let mut tokens = Vec::new();
    let mut page = 1usize;
    for arg in args {
        match arg.strip_prefix(PAGE_FLAG) {
            Some(raw) => {
                page = raw.parse::<usize>().ok().filter(|page| *page > 0)?;
            }
            None => tokens.push(arg.clone()),
        }
    }
    Some(
        CommandParams::new()
            .with("tokens", tokens)
            .with("page", page as u64),
    )
}

fn run_help(
    _args: &[String],
    params: &CommandParams,
    context: &mut ExecutionContext<'_>,
) -> CommandOutcome {
    let tokens = params.get_strings("tokens").unwrap_or_default();
    let page = params
        .get_u64("page")
        .and_then(|page| usize::try_from(page).ok())
        .unwrap_or(1);

    if tokens.is_empty() {
        return help_listing(context.commands(), page);
    }

    match tree::resolve(&tokens, context.commands()) {
        Some(node) => CommandOutcome::success(command_help(node)),
        None => CommandOutcome::failure(
            ConsoleError::CommandNotFound {
                token: tokens.join(" "),
            }
            .transcript_line(),
        ),
    }
}

fn help_listing(commands: &[CommandNode], page: usize) -> CommandOutcome {
    let mut sorted: Vec<&CommandNode> = Vec::with_capacity(commands.len());
    for node in commands {
        if !sorted.iter().any(|seen| seen.name() == node.name()) {
            sorted.push(node);
        }
    }
    sorted.sort_by(|left, right| left.name().cmp(right.name()));

    let total_pages = sorted.len().div_ceil(HELP_PAGE_SIZE).max(1);
    if page == 0 || page > total_pages {
        return CommandOutcome::failure(
            ConsoleError::InvalidPage { page, total_pages }.transcript_line(),
        );
    }

    let mut lines = vec![
        format!("GENERAL HELP | [Page {page}/{total_pages}]"),
        "For more info on a specific command, type help command-name".to_string(),
        String::new(),
    ];
    lines.extend(
        sorted
            .iter()
            .skip((page - 1) * HELP_PAGE_SIZE)
            .take(HELP_PAGE_SIZE)
            .map(|node| {
                format!(
                    "{:.<width$}{}",
                    node.name(),
                    node.description(),
                    width = LISTING_NAME_WIDTH
                )
            }),
    );
    if total_pages > 1 {
        lines.push(String::new());
        lines.push("Use --page=X to see other pages.".to_string());
    }
    CommandOutcome::success(lines.join("\n"))
}

fn command_help(node: &CommandNode) -> String {
    let mut lines = vec![
        node.name().to_uppercase(),
        node.description().to_string(),
        format!("Usage: {}", node.usage()),
    ];

    if node.has_children() {
        let mut children: Vec<&CommandNode> = node.children().iter().collect();
        children.sort_by(|left, right| left.name().cmp(right.name()));
        lines.push("Arguments:".to_string());
        lines.extend(children.iter().map(|child| {
            format!(
                "- {:.<width$} {}",
                child.name(),
                child.description(),
                width = ARGUMENT_NAME_WIDTH
            )
        }));
    }

    if !node.defaults().is_empty() {
        lines.push("Parameters:".to_string());
        lines.extend(
            node.defaults()
                .iter()
                .map(|(flag, value)| format!("--{flag}={value}")),
        );
    }

    lines.join("\n")
}

/// Name-only snapshot of the forest, so help's suggestions can see the registry without
/// holding a reference to the tree that owns them.
#[derive(Debug, Clone)]
struct NameIndex {
    name: String,
    children: Vec<NameIndex>,
}

impl NameIndex {
    fn from_forest(forest: &[CommandNode]) -> Vec<Self> {
        forest
            .iter()
            .map(|node| Self {
                name: node.name().to_string(),
                children: Self::from_forest(node.children()),
            })
            .collect()
    }
}

fn names(forest: &[NameIndex]) -> Vec<String> {
    forest.iter().map(|entry| entry.name.clone()).collect()
}

/// Suggestion function offering the names one level below the chain named by `args`.
fn registry_suggestions(index: Vec<NameIndex>) -> SuggestHandler {
    Rc::new(move |args: &[String]| {
        let mut forest = index.as_slice();
        for token in args {
            match forest.iter().find(|entry| &entry.name == token) {
                Some(entry) => forest = &entry.children,
                None => return Vec::new(),
            }
        }
        names(forest)
    })
}

/// Gives the first top-level `help` node a suggestion function over the finished registry.
///
/// Runs once while the tree is being assembled, before it is shared.
pub(crate) fn bind_help_suggestions(roots: &mut [CommandNode]) {
    let index = NameIndex::from_forest(roots);
    if let Some(help) = roots.iter_mut().find(|node| node.name() == HELP_COMMAND) {
        help.bind_suggestions(registry_suggestions(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Transcript;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|item| item.to_string()).collect()
    }

    fn leaf(name: &str, description: &str) -> CommandNode {
        CommandNode::new(name, description, name, |_, _, _| CommandOutcome::silent())
    }

    fn registry() -> Vec<CommandNode> {
        let mut roots = builtin_commands();
        roots.push(
            leaf("hello", "Greets you")
                .with_children(vec![leaf("night", "Evening"), leaf("day", "Morning")])
                .with_default("time", "false"),
        );
        bind_help_suggestions(&mut roots);
        roots
    }

    fn run(roots: &[CommandNode], args: &[&str]) -> CommandOutcome {
        let args = strings(args);
        let help = &roots[0];
        let params = help.parse_parameters(&args).expect("valid help params");
        let mut transcript = Transcript::new();
        let mut context = ExecutionContext::new(roots, &mut transcript);
        help.execute(&args, &params, &mut context)
    }

    #[test]
    fn listing_is_sorted_and_paginated() {
        let outcome = run(&registry(), &[]);
        assert!(outcome.completed);
        let lines: Vec<&str> = outcome.message.lines().collect();
        assert_eq!(lines[0], "GENERAL HELP | [Page 1/1]");
        assert_eq!(lines[3], "clear...................Clears the console output");
        assert!(lines[4].starts_with("hello..."));
        assert!(lines[5].starts_with("help...."));
        assert!(!outcome.message.contains("--page=X"));
    }

    #[test]
    fn second_page_lists_remaining_commands() {
        let mut roots = builtin_commands();
        roots.extend((0..12).map(|index| leaf(&format!("cmd{index:02}"), "filler")));
        let outcome = run(&roots, &["--page=2"]);
        assert!(outcome.completed);
        assert!(outcome.message.starts_with("GENERAL HELP | [Page 2/2]"));
        assert!(outcome.message.contains("help...................."));
        assert!(outcome.message.ends_with("Use --page=X to see other pages."));
    }

    #[test]
    fn listing_shows_shadowed_names_once() {
        let mut roots = builtin_commands();
        roots.push(leaf("clear", "Shadowed clear"));
        let outcome = run(&roots, &[]);
        let clear_rows: Vec<&str> = outcome
            .message
            .lines()
            .filter(|line| line.starts_with("clear."))
            .collect();
        assert_eq!(clear_rows, vec!["clear...................Clears the console output"]);
        assert!(outcome.message.starts_with("GENERAL HELP | [Page 1/1]"));
    }

    #[test]
    fn out_of_range_page_is_reported() {
        let outcome = run(&registry(), &["--page=99"]);
        assert!(!outcome.completed);
        assert_eq!(outcome.message, "&eInvalid page&r: 99 (expected 1-1)");
    }

    #[test]
    fn malformed_page_flag_is_rejected() {
        let help = help_command();
        assert!(help.parse_parameters(&strings(&["--page=0"])).is_none());
        assert!(help.parse_parameters(&strings(&["--page=two"])).is_none());
    }

    #[test]
    fn command_help_lists_sorted_arguments_and_defaults() {
        let outcome = run(&registry(), &["hello"]);
        assert_eq!(
            outcome.message,
            [
                "HELLO",
                "Greets you",
                "Usage: hello",
                "Arguments:",
                "- day............. Morning",
                "- night........... Evening",
                "Parameters:",
                "--time=false",
            ]
            .join("\n")
        );
    }

    #[test]
    fn command_help_for_unknown_chain_fails() {
        let outcome = run(&registry(), &["goodbye", "day"]);
        assert!(!outcome.completed);
        assert_eq!(outcome.message, "&eCommand not found: &rgoodbye day");
    }

    #[test]
    fn bound_suggestions_follow_the_registry() {
        let roots = registry();
        let help = &roots[0];
        assert_eq!(
            help.suggest_arguments(&[]),
            Some(strings(&["help", "clear", "hello"]))
        );
        assert_eq!(
            help.suggest_arguments(&strings(&["hello"])),
            Some(strings(&["night", "day"]))
        );
        assert_eq!(
            help.suggest_arguments(&strings(&["hello", "day"])),
            Some(Vec::new())
        );
        assert_eq!(help.suggest_arguments(&strings(&["nope"])), Some(Vec::new()));
    }

    #[test]
    fn clear_empties_the_transcript() {
        let roots = builtin_commands();
        let mut transcript = Transcript::new();
        transcript.push("> clear");
        let mut context = ExecutionContext::new(&roots, &mut transcript);
        let outcome = roots[1].execute(&[], &CommandParams::new(), &mut context);
        assert_eq!(outcome, CommandOutcome::silent());
        assert!(transcript.is_empty());
    }
}
