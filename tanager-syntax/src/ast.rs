//! Arena-backed abstract syntax tree for parsed queries.

use once_cell::sync::OnceCell;

use crate::token::Token;

/// Index of a node inside its [`Ast`] arena.
///
/// Parent links are plain indices instead of owning references, so the tree
/// has a single owner (the arena vector) and no reference cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Implicit conjunction of all top-level terms; always the root.
    And,
    /// An alternation group: any one child satisfies the group.
    Or,
    /// A plain tag that must be present.
    Tag,
    /// A tag that must be absent (`-tag`).
    NotTag,
    /// A metadata comparison; always has exactly the three `Meta*` children
    /// below, in field/operator/value order.
    Meta,
    MetaField,
    MetaOperator,
    MetaValue,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::And => "and",
            NodeKind::Or => "or",
            NodeKind::Tag => "tag",
            NodeKind::NotTag => "not",
            NodeKind::Meta => "meta",
            NodeKind::MetaField => "field",
            NodeKind::MetaOperator => "op",
            NodeKind::MetaValue => "value",
        }
    }

    /// Kinds whose children carry the meaning; their own token is incidental.
    fn is_inner(self) -> bool {
        matches!(self, NodeKind::And | NodeKind::Or | NodeKind::Meta)
    }
}

/// A single tree node. Immutable once the parse that built it finishes.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    token: Token,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    // Memoized on first read; parent links never change after construction,
    // so the cached value stays correct. OnceCell keeps the tree Sync.
    depth: OnceCell<usize>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The parsed form of a query: one root [`NodeKind::And`] node owning every
/// term the user typed.
///
/// Built once by the parser, immutable afterwards, and safe to share
/// read-only across threads (cached AST/key pairs are read concurrently by
/// search requests).
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub(crate) fn with_root(kind: NodeKind, token: Token) -> Self {
        let root = Node {
            kind,
            token,
            parent: None,
            children: Vec::new(),
            depth: OnceCell::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub(crate) fn push_child(&mut self, parent: NodeId, kind: NodeKind, token: Token) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            token,
            parent: Some(parent),
            children: Vec::new(),
            depth: OnceCell::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn token(&self, id: NodeId) -> &Token {
        &self.nodes[id.0].token
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of parent links between `id` and the root. Computed by walking
    /// parent links on first access, memoized per node.
    pub fn depth(&self, id: NodeId) -> usize {
        *self.nodes[id.0].depth.get_or_init(|| {
            let mut depth = 0;
            let mut cursor = id;
            while let Some(parent) = self.nodes[cursor.0].parent {
                depth += 1;
                cursor = parent;
            }
            depth
        })
    }

    /// Deterministic pre-order traversal: a node before its children,
    /// children in insertion order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            ast: self,
            stack: vec![self.root],
        }
    }

    /// One-line rendering, e.g.
    /// `and(tag:hi not:howdy or(tag:a tag:b) meta(field:width op:> value:10))`.
    pub fn to_compact_string(&self) -> String {
        let mut out = String::new();
        self.write_compact(self.root, &mut out);
        out
    }

    fn write_compact(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        if node.kind.is_inner() {
            out.push_str(node.kind.label());
            out.push('(');
            for (i, &child) in node.children.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                self.write_compact(child, out);
            }
            out.push(')');
        } else {
            out.push_str(node.kind.label());
            out.push(':');
            out.push_str(&node.token.value);
        }
    }

    /// Multi-line rendering with two-space indentation per level.
    pub fn to_indented_string(&self) -> String {
        let mut out = String::new();
        self.write_indented(self.root, 0, &mut out);
        out
    }

    fn write_indented(&self, id: NodeId, level: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        for _ in 0..level {
            out.push_str("  ");
        }
        out.push_str(node.kind.label());
        if !node.kind.is_inner() {
            out.push(' ');
            out.push_str(&node.token.value);
        }
        out.push('\n');
        for &child in &node.children {
            self.write_indented(child, level + 1, out);
        }
    }
}

/// Iterator state for [`Ast::preorder`].
#[derive(Debug)]
pub struct Preorder<'a> {
    ast: &'a Ast,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Children pushed in reverse so the first child is visited next.
        for &child in self.ast.nodes[id.0].children.iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
