//! Command node definitions and the parse/execute/suggest contract every node satisfies.

use std::{collections::BTreeMap, fmt, rc::Rc};

use console_contract::CommandOutcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ExecutionContext;

/// Validates remaining tokens. `None` is the invalid sentinel and short-circuits execution.
pub type ParseHandler = Rc<dyn Fn(&[String]) -> Option<CommandParams>>;

/// Executes a command with its raw remaining tokens and parsed parameters.
pub type ExecuteHandler =
    Rc<dyn Fn(&[String], &CommandParams, &mut ExecutionContext<'_>) -> CommandOutcome>;

/// Produces dynamic argument candidates from the tokens consumed after the node.
pub type SuggestHandler = Rc<dyn Fn(&[String]) -> Vec<String>>;

/// Structured parameters produced by a node's parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandParams(BTreeMap<String, Value>);

impl CommandParams {
    /// Empty parameter record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces one parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw parameter value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String parameter.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Signed integer parameter.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Unsigned integer parameter.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    /// Floating point parameter.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Boolean parameter.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// String-list parameter. Non-string entries are skipped.
    pub fn get_strings(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
    }

    /// Whether no parameters were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A node in the command forest.
///
/// Routers and leaves share this shape; a router is simply a node with children. Sibling names
/// should be unique: lookups take the first match in declared order, and the tree logs a warning
/// when duplicates are registered.
#[derive(Clone)]
pub struct CommandNode {
    name: String,
    description: String,
    usage: String,
    defaults: Vec<(String, String)>,
    children: Vec<CommandNode>,
    parse: ParseHandler,
    execute: ExecuteHandler,
    suggest: Option<SuggestHandler>,
}

impl CommandNode {
    /// Creates a node that accepts any arguments and runs `execute`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        usage: impl Into<String>,
        execute: impl Fn(&[String], &CommandParams, &mut ExecutionContext<'_>) -> CommandOutcome
            + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usage: usage.into(),
            defaults: Vec::new(),
            children: Vec::new(),
            parse: Rc::new(|_: &[String]| Some(CommandParams::new())),
            execute: Rc::new(execute),
            suggest: None,
        }
    }

    /// Replaces the parameter parser.
    pub fn with_parser(
        mut self,
        parse: impl Fn(&[String]) -> Option<CommandParams> + 'static,
    ) -> Self {
        self.parse = Rc::new(parse);
        self
    }

    /// Attaches a dynamic argument suggestion function.
    pub fn with_suggestions(mut self, suggest: impl Fn(&[String]) -> Vec<String> + 'static) -> Self {
        self.suggest = Some(Rc::new(suggest));
        self
    }

    /// Attaches subcommands in declared order.
    pub fn with_children(mut self, children: Vec<CommandNode>) -> Self {
        self.children = children;
        self
    }

    /// Declares a default flag value shown by `help`.
    pub fn with_default(mut self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.push((flag.into(), value.into()));
        self
    }

    /// Literal token that selects this node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable summary.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Invocation template shown on parse failure.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Declared default flags, in declaration order.
    pub fn defaults(&self) -> &[(String, String)] {
        &self.defaults
    }

    /// Subcommands in declared order.
    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Whether this node routes to subcommands.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this node provides dynamic argument suggestions.
    pub fn has_suggestions(&self) -> bool {
        self.suggest.is_some()
    }

    /// Whether completing this node can lead to further candidates.
    pub fn is_navigable(&self) -> bool {
        self.has_children() || self.has_suggestions()
    }

    /// Runs the parameter parser over the remaining tokens.
    pub fn parse_parameters(&self, args: &[String]) -> Option<CommandParams> {
        (self.parse)(args)
    }

    /// Runs the command.
    pub fn execute(
        &self,
        args: &[String],
        params: &CommandParams,
        context: &mut ExecutionContext<'_>,
    ) -> CommandOutcome {
        (self.execute)(args, params, context)
    }

    /// Dynamic candidates, or `None` when the node has no suggestion function.
    pub fn suggest_arguments(&self, args: &[String]) -> Option<Vec<String>> {
        self.suggest.as_ref().map(|suggest| suggest(args))
    }

    /// Installs a suggestion function while the tree is still being finalized.
    pub(crate) fn bind_suggestions(&mut self, suggest: SuggestHandler) {
        self.suggest = Some(suggest);
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("children", &self.children)
            .field("suggest", &self.suggest.is_some())
            .finish()
    }
}

/// Standard reply for a router node invoked without a matching subcommand.
pub fn unknown_subcommand(name: &str, usage: &str, args: &[String]) -> CommandOutcome {
    match args.first() {
        None => CommandOutcome::failure(format!(
            "&eFailed to run {}&r\nUsage: {usage}",
            name.to_uppercase()
        )),
        Some(token) => CommandOutcome::failure(format!(
            "&eUnknown subcommand: &r{token}\nUsage: {usage}"
        )),
    }
}

/// Reads `--name=value` flags out of `args`, returning the positional tokens and flag pairs.
pub fn split_flags(args: &[String]) -> (Vec<String>, Vec<(String, String)>) {
    let mut positional = Vec::new();
    let mut flags = Vec::new();
    for arg in args {
        match arg.strip_prefix("--").and_then(|rest| rest.split_once('=')) {
            Some((name, value)) if !name.is_empty() => {
                flags.push((name.to_string(), value.to_string()))
            }
            _ => positional.push(arg.clone()),
        }
    }
    (positional, flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn params_accessors_read_typed_values() {
        let params = CommandParams::new()
            .with("name", "Sam")
            .with("page", 2u64)
            .with("tokens", vec!["a", "b"]);
        assert_eq!(params.get_str("name"), Some("Sam"));
        assert_eq!(params.get_u64("page"), Some(2));
        assert_eq!(params.get_strings("tokens"), Some(strings(&["a", "b"])));
        assert_eq!(params.get_bool("name"), None);
    }

    #[test]
    fn default_parser_accepts_anything() {
        let node = CommandNode::new("noop", "does nothing", "noop", |_, _, _| {
            CommandOutcome::silent()
        });
        assert!(node.parse_parameters(&strings(&["x", "y"])).is_some());
        assert!(!node.is_navigable());
        assert!(node.suggest_arguments(&[]).is_none());
    }

    #[test]
    fn router_reply_distinguishes_missing_and_unknown() {
        let missing = unknown_subcommand("hello", "hello <day/night>", &[]);
        assert!(!missing.completed);
        assert!(missing.message.contains("Failed to run HELLO"));

        let unknown = unknown_subcommand("hello", "hello <day/night>", &strings(&["morning"]));
        assert!(unknown.message.contains("morning"));
        assert!(unknown.message.contains("Usage: hello <day/night>"));
    }

    #[test]
    fn split_flags_separates_named_values() {
        let (positional, flags) = split_flags(&strings(&["Sam", "--time=false", "--", "-x"]));
        assert_eq!(positional, strings(&["Sam", "--", "-x"]));
        assert_eq!(flags, vec![("time".to_string(), "false".to_string())]);
    }
}
