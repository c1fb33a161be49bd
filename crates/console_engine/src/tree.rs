//! Command forest construction and the chain walker.

use std::collections::BTreeSet;

use console_contract::CommandPath;

use crate::{builtins, command::CommandNode};

/// Deepest node reached by exact consecutive name matches.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// Matched node.
    pub node: &'a CommandNode,
    /// Number of tokens consumed by the walk.
    pub depth: usize,
}

impl Resolution<'_> {
    /// Tokens left for the node's own parser or suggestion function.
    pub fn remaining<'t>(&self, tokens: &'t [String]) -> &'t [String] {
        &tokens[self.depth.min(tokens.len())..]
    }

    /// Matched name chain.
    pub fn path(&self, tokens: &[String]) -> CommandPath {
        CommandPath::from_segments(tokens[..self.depth].iter().cloned())
    }
}

/// Walks `tokens` down `roots`, returning the deepest node matched and the tokens consumed.
///
/// Each step takes the first sibling whose name equals the next token. The walk descends only
/// while the matched node has children and tokens remain; a token that matches no child stops the
/// walk at the parent. Nothing is matched when the first token names no root.
pub fn resolve_chain<'a>(tokens: &[String], roots: &'a [CommandNode]) -> Option<Resolution<'a>> {
    let mut forest = roots;
    let mut matched: Option<&'a CommandNode> = None;
    let mut depth = 0usize;

    while let Some(token) = tokens.get(depth) {
        let Some(found) = forest.iter().find(|node| node.name() == token) else {
            break;
        };
        matched = Some(found);
        depth += 1;
        if !found.has_children() {
            break;
        }
        forest = found.children();
    }

    matched.map(|node| Resolution { node, depth })
}

/// Deepest node matched by `tokens`, or `None` when the first token names no root.
pub fn resolve<'a>(tokens: &[String], roots: &'a [CommandNode]) -> Option<&'a CommandNode> {
    resolve_chain(tokens, roots).map(|resolution| resolution.node)
}

/// Number of tokens consumed by [`resolve`]; zero when nothing matched.
pub fn resolve_depth(tokens: &[String], roots: &[CommandNode]) -> usize {
    resolve_chain(tokens, roots)
        .map(|resolution| resolution.depth)
        .unwrap_or(0)
}

/// Immutable command forest: built-ins first, then caller-supplied commands.
#[derive(Debug, Clone)]
pub struct CommandTree {
    roots: Vec<CommandNode>,
}

impl CommandTree {
    /// Builds the registry from built-ins plus `commands`, then binds registry-wide callbacks.
    ///
    /// Built-ins are listed first so they win any name collision.
    pub fn new(commands: Vec<CommandNode>) -> Self {
        let mut roots = builtins::builtin_commands();
        roots.extend(commands);
        warn_duplicate_names(&roots, &[]);
        builtins::bind_help_suggestions(&mut roots);
        Self { roots }
    }

    /// Wraps an already finalized forest without adding built-ins.
    pub fn from_roots(roots: Vec<CommandNode>) -> Self {
        warn_duplicate_names(&roots, &[]);
        Self { roots }
    }

    /// Top-level commands in declared order.
    pub fn roots(&self) -> &[CommandNode] {
        &self.roots
    }

    /// Top-level command names in declared order.
    pub fn root_names(&self) -> Vec<String> {
        self.roots
            .iter()
            .map(|node| node.name().to_string())
            .collect()
    }

    /// See [`resolve_chain`].
    pub fn resolve_chain(&self, tokens: &[String]) -> Option<Resolution<'_>> {
        resolve_chain(tokens, &self.roots)
    }

    /// See [`resolve`].
    pub fn resolve(&self, tokens: &[String]) -> Option<&CommandNode> {
        resolve(tokens, &self.roots)
    }

    /// See [`resolve_depth`].
    pub fn resolve_depth(&self, tokens: &[String]) -> usize {
        resolve_depth(tokens, &self.roots)
    }
}

fn warn_duplicate_names(forest: &[CommandNode], parent: &[&str]) {
    let mut seen = BTreeSet::new();
    for node in forest {
        if !seen.insert(node.name()) {
            let scope = if parent.is_empty() {
                "root".to_string()
            } else {
                parent.join(" ")
            };
            log::warn!(
                "duplicate command `{}` under {scope}; only the first declaration is reachable",
                node.name()
            );
        }
        let mut path = parent.to_vec();
        path.push(node.name());
        warn_duplicate_names(node.children(), &path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_contract::CommandOutcome;

    fn leaf(name: &str) -> CommandNode {
        CommandNode::new(name, name, name, |_, _, _| CommandOutcome::silent())
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|item| item.to_string()).collect()
    }

    fn greeting_roots() -> Vec<CommandNode> {
        vec![
            leaf("help"),
            leaf("hello").with_children(vec![leaf("day"), leaf("night")]),
            leaf("clear"),
        ]
    }

    #[test]
    fn empty_tokens_resolve_to_nothing() {
        assert!(resolve(&[], &greeting_roots()).is_none());
        assert_eq!(resolve_depth(&[], &greeting_roots()), 0);
    }

    #[test]
    fn walks_into_children_and_stops_at_leaf() {
        let roots = greeting_roots();
        let input = tokens(&["hello", "day", "Sam"]);
        let resolution = resolve_chain(&input, &roots).expect("resolved");
        assert_eq!(resolution.node.name(), "day");
        assert_eq!(resolution.depth, 2);
        assert_eq!(resolution.remaining(&input), &tokens(&["Sam"])[..]);
        assert_eq!(resolution.path(&input).display(), "hello day");
    }

    #[test]
    fn unmatched_child_falls_back_to_router() {
        let roots = greeting_roots();
        let input = tokens(&["hello", "morning"]);
        let node = resolve(&input, &roots).expect("router");
        assert_eq!(node.name(), "hello");
        assert_eq!(resolve_depth(&input, &roots), 1);
    }

    #[test]
    fn unknown_root_fails() {
        assert!(resolve(&tokens(&["goodbye", "day"]), &greeting_roots()).is_none());
    }

    #[test]
    fn first_declared_sibling_wins() {
        let roots = vec![
            leaf("dup").with_default("order", "first"),
            leaf("dup").with_default("order", "second"),
        ];
        let node = resolve(&tokens(&["dup"]), &roots).expect("resolved");
        assert_eq!(node.defaults()[0].1, "first");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(resolve(&tokens(&["Hello"]), &greeting_roots()).is_none());
    }

    #[test]
    fn builtins_precede_caller_commands() {
        let tree = CommandTree::new(vec![leaf("help"), leaf("echo")]);
        assert_eq!(tree.root_names(), tokens(&["help", "clear", "help", "echo"]));
        let help = tree.resolve(&tokens(&["help"])).expect("help");
        assert!(help.has_suggestions(), "built-in help is bound to the registry");
    }
}
