//! AST selector construction for finding targets.
//!
//! Builds esquery-style selectors such as
//! `MethodDefinition[key.name='getUser'] CallExpression[callee.name='eval']`
//! from a node and its ancestors, so agents can locate the offending
//! construct without line numbers.

/// Default number of nodes (including the target) a selector may span.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Node types that end the ancestor walk once included.
const ANCHOR_TYPES: &[&str] = &[
    "FunctionDeclaration",
    "FunctionExpression",
    "ArrowFunctionExpression",
    "MethodDefinition",
    "ClassDeclaration",
    "ClassExpression",
];

/// Minimal view of a syntax-tree node.
pub trait AstNode {
    /// Node type, e.g. `CallExpression`.
    fn node_type(&self) -> &str;

    /// Identifying attribute as `(dotted path, value)`, e.g.
    /// `("callee.name", "eval")`.
    fn identity(&self) -> Option<(&str, &str)>;

    /// Parent node, if any.
    fn parent(&self) -> Option<&Self>;
}

/// Owned node description for callers without their own tree type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    node_type: String,
    identity: Option<(String, String)>,
    parent: Option<Box<NodeInfo>>,
}

impl NodeInfo {
    /// Creates a node with no identity and no parent.
    #[must_use]
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            identity: None,
            parent: None,
        }
    }

    /// Sets the identifying attribute.
    #[must_use]
    pub fn with_identity(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.identity = Some((path.into(), value.into()));
        self
    }

    /// Sets the parent node.
    #[must_use]
    pub fn with_parent(mut self, parent: NodeInfo) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }
}

impl AstNode for NodeInfo {
    fn node_type(&self) -> &str {
        &self.node_type
    }

    fn identity(&self) -> Option<(&str, &str)> {
        self.identity
            .as_ref()
            .map(|(path, value)| (path.as_str(), value.as_str()))
    }

    fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }
}

fn segment<N: AstNode>(node: &N) -> String {
    match node.identity() {
        Some((path, value)) => {
            let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
            format!("{}[{path}='{escaped}']", node.node_type())
        }
        None => node.node_type().to_string(),
    }
}

/// Builds a selector for `node`, walking up to `max_depth` nodes.
///
/// The walk stops after the first anchor (function, method or class)
/// ancestor. A `max_depth` of zero is treated as one.
#[must_use]
pub fn build_ast_selector<N: AstNode>(node: &N, max_depth: usize) -> String {
    let mut segments = vec![segment(node)];
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if segments.len() >= max_depth.max(1) {
            break;
        }
        segments.push(segment(ancestor));
        if ANCHOR_TYPES.contains(&ancestor.node_type()) {
            break;
        }
        current = ancestor.parent();
    }
    segments.reverse();
    segments.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_call() -> NodeInfo {
        NodeInfo::new("CallExpression").with_identity("callee.name", "eval")
    }

    #[test]
    fn simple_call_expression() {
        assert_eq!(
            build_ast_selector(&eval_call(), DEFAULT_MAX_DEPTH),
            "CallExpression[callee.name='eval']"
        );
    }

    #[test]
    fn method_call_uses_property_path() {
        let node = NodeInfo::new("CallExpression").with_identity("callee.property.name", "query");
        assert_eq!(
            build_ast_selector(&node, DEFAULT_MAX_DEPTH),
            "CallExpression[callee.property.name='query']"
        );
    }

    #[test]
    fn includes_parent_up_to_anchor() {
        let class = NodeInfo::new("ClassDeclaration").with_identity("id.name", "UserService");
        let method = NodeInfo::new("MethodDefinition")
            .with_identity("key.name", "getUser")
            .with_parent(class);
        let call = eval_call().with_parent(method);
        assert_eq!(
            build_ast_selector(&call, DEFAULT_MAX_DEPTH),
            "MethodDefinition[key.name='getUser'] CallExpression[callee.name='eval']"
        );
    }

    #[test]
    fn passes_through_non_anchor_ancestors() {
        let func = NodeInfo::new("FunctionDeclaration").with_identity("id.name", "processData");
        let block = NodeInfo::new("BlockStatement").with_parent(func);
        let call = eval_call().with_parent(block);
        assert_eq!(
            build_ast_selector(&call, DEFAULT_MAX_DEPTH),
            "FunctionDeclaration[id.name='processData'] BlockStatement CallExpression[callee.name='eval']"
        );
    }

    #[test]
    fn respects_max_depth() {
        let method = NodeInfo::new("MethodDefinition").with_identity("key.name", "getUser");
        let call = eval_call().with_parent(method);
        assert_eq!(build_ast_selector(&call, 1), "CallExpression[callee.name='eval']");
        assert_eq!(build_ast_selector(&call, 0), "CallExpression[callee.name='eval']");
    }

    #[test]
    fn escapes_quotes_in_values() {
        let node = NodeInfo::new("Literal").with_identity("value", "it's");
        assert_eq!(
            build_ast_selector(&node, DEFAULT_MAX_DEPTH),
            r"Literal[value='it\'s']"
        );
    }
}
