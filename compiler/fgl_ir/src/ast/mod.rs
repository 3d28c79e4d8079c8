//! Arena-allocated syntax tree.
//!
//! Nodes are built bottom-up: a parse routine allocates its sub-nodes first,
//! then its own node. Allocation derives the node's children from its kind,
//! orders them by start offset and sets their parent back-references, so the
//! tree is fully linked by the time the routine returns.

mod kind;

pub use kind::{
    Access, BinaryOp, CursorSource, DeferKind, FetchDirection, FunctionKind, ImportKind,
    LiteralKind, LoopKind, MenuOptionKind, NameSuffix, ScalarKind, SqlVerb, UnaryOp,
    WheneverAction, WheneverCondition,
};
pub use kind::NodeKind;

use std::fmt;

use smallvec::SmallVec;

use crate::{AttributeStore, LanguageVersion, Span};

/// Index of a node in its `Ast`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Common envelope around every node kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    /// False when recovery truncated the construct.
    pub complete: bool,
    pub parent: Option<NodeId>,
}

/// Syntax tree for one module.
#[derive(Clone, Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    children: Vec<SmallVec<[NodeId; 4]>>,
    root: Option<NodeId>,
    version: LanguageVersion,
    pub attributes: AttributeStore,
}

impl Ast {
    pub fn new(version: LanguageVersion) -> Self {
        Ast {
            version,
            ..Ast::default()
        }
    }

    /// Create with pre-allocated capacity based on token count.
    pub fn with_capacity(version: LanguageVersion, tokens: usize) -> Self {
        Ast {
            nodes: Vec::with_capacity(tokens / 2),
            children: Vec::with_capacity(tokens / 2),
            version,
            ..Ast::default()
        }
    }

    /// Language version the module is analyzed under.
    #[inline]
    pub fn version(&self) -> LanguageVersion {
        self.version
    }

    /// Allocate a complete node.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.alloc_with(kind, span, true)
    }

    /// Allocate a node, linking the sub-nodes its kind refers to.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "node count is bounded by token count, which fits in u32"
    )]
    pub fn alloc_with(&mut self, kind: NodeKind, span: Span, complete: bool) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut children = kind.child_ids();
        children.sort_by_key(|c| (self.nodes[c.index()].span.start, c.raw()));
        for child in &children {
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes.push(Node {
            kind,
            span,
            complete,
            parent: None,
        });
        self.children.push(children);
        id
    }

    /// Flag a node as truncated by recovery.
    ///
    /// Only the routine that allocated the node calls this, before returning.
    pub fn mark_incomplete(&mut self, id: NodeId) {
        self.nodes[id.index()].complete = false;
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    #[inline]
    pub fn is_complete(&self, id: NodeId) -> bool {
        self.nodes[id.index()].complete
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Children in source order.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id.index()]
    }

    /// Nearest strict ancestor satisfying `pred`.
    pub fn enclosing(&self, id: NodeId, pred: impl Fn(&NodeKind) -> bool) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if pred(self.kind(p)) {
                return Some(p);
            }
            current = self.parent(p);
        }
        None
    }

    /// Enclosing FUNCTION, REPORT or MAIN.
    pub fn enclosing_routine(&self, id: NodeId) -> Option<NodeId> {
        self.enclosing(id, NodeKind::is_routine)
    }

    /// Subtree of `root` in post-order: children before their parent.
    pub fn post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                out.push(id);
                continue;
            }
            stack.push((id, true));
            for &child in self.children(id).iter().rev() {
                stack.push((child, false));
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(u32::try_from(i).unwrap_or(u32::MAX)), n))
    }

    /// Deepest node whose span contains `offset`.
    pub fn node_at(&self, offset: u32) -> Option<NodeId> {
        let mut current = self.root?;
        if !self.span(current).contains(offset) {
            return None;
        }
        'descend: loop {
            for &child in self.children(current) {
                if self.span(child).contains(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }
}
