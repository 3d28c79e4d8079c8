//! Out-of-band node metadata.
//!
//! Trivia (original spacing, verbatim spelling), alternate syntax forms and
//! recovery flags only exist for a minority of nodes of any kind. Rather than
//! widening every `NodeKind` variant, they live here keyed by `(NodeId,
//! AttributeKind)`. A missing key is never an error: each accessor defines
//! its own default.
//!
//! A node only ever has an attribute if its parse routine (or the binder
//! running inside that routine) explicitly set it.

use rustc_hash::FxHashMap;

use crate::NodeId;

/// Number of ordinal preceding-whitespace slots per node.
pub const WHITESPACE_SLOTS: u8 = 5;

/// What a stored attribute describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Whitespace before the n-th keyword of a construct, `0..WHITESPACE_SLOTS`.
    PrecedingWhitespace(u8),
    /// Whitespace following each separator of a comma list.
    ListWhitespace,
    /// Whitespace around the dots of a qualified name.
    NamesWhitespace,
    /// Source text kept verbatim (SQL statements).
    VerbatimImage,
    /// Tokens skipped by recovery inside the construct.
    ExtraVerbatim,
    /// Name of the `#region` the node opens.
    CodeRegion,
    /// The construct used its alternate spelling.
    AltForm,
    /// Original spelling of words normalised by the parser.
    VerbatimNames,
    /// A closing delimiter or `END x` was missing.
    MissingCloseGrouping,
    /// A required sub-node is missing.
    IncompleteNode,
    /// Declaration a cursor or statement reference was bound to.
    VariableReference,
    /// Name a node implicitly declares (cursors, prepared statements).
    Variable,
}

/// Attribute payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    Text(Box<str>),
    TextList(Vec<Box<str>>),
    Marker,
    Node(NodeId),
}

/// Per-AST attribute side table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeStore {
    entries: FxHashMap<(NodeId, AttributeKind), AttributeValue>,
}

impl AttributeStore {
    pub fn new() -> Self {
        AttributeStore::default()
    }

    #[inline]
    pub fn get(&self, node: NodeId, kind: AttributeKind) -> Option<&AttributeValue> {
        self.entries.get(&(node, kind))
    }

    pub fn set(&mut self, node: NodeId, kind: AttributeKind, value: AttributeValue) {
        self.entries.insert((node, kind), value);
    }

    #[inline]
    pub fn contains(&self, node: NodeId, kind: AttributeKind) -> bool {
        self.entries.contains_key(&(node, kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Text attribute, or `default` when absent or of another shape.
    pub fn text_or<'a>(&'a self, node: NodeId, kind: AttributeKind, default: &'a str) -> &'a str {
        match self.get(node, kind) {
            Some(AttributeValue::Text(text)) => text,
            _ => default,
        }
    }

    pub fn text(&self, node: NodeId, kind: AttributeKind) -> Option<&str> {
        match self.get(node, kind) {
            Some(AttributeValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Text-list attribute; empty when absent.
    pub fn text_list(&self, node: NodeId, kind: AttributeKind) -> &[Box<str>] {
        match self.get(node, kind) {
            Some(AttributeValue::TextList(list)) => list,
            _ => &[],
        }
    }

    pub fn node_ref(&self, node: NodeId, kind: AttributeKind) -> Option<NodeId> {
        match self.get(node, kind) {
            Some(AttributeValue::Node(target)) => Some(*target),
            _ => None,
        }
    }

    pub fn mark(&mut self, node: NodeId, kind: AttributeKind) {
        self.set(node, kind, AttributeValue::Marker);
    }

    #[inline]
    pub fn has_marker(&self, node: NodeId, kind: AttributeKind) -> bool {
        matches!(self.get(node, kind), Some(AttributeValue::Marker))
    }

    // Typed accessors

    /// Whitespace before the `slot`-th keyword; a single space by default.
    pub fn preceding_whitespace(&self, node: NodeId, slot: u8) -> &str {
        self.text_or(node, AttributeKind::PrecedingWhitespace(slot), " ")
    }

    /// Record whitespace for a keyword slot. A single space is the default
    /// and is not stored; out-of-range slots are ignored.
    pub fn set_preceding_whitespace(&mut self, node: NodeId, slot: u8, text: &str) {
        if slot < WHITESPACE_SLOTS && text != " " {
            self.set(
                node,
                AttributeKind::PrecedingWhitespace(slot),
                AttributeValue::Text(text.into()),
            );
        }
    }

    pub fn is_alt_form(&self, node: NodeId) -> bool {
        self.has_marker(node, AttributeKind::AltForm)
    }

    pub fn missing_close_grouping(&self, node: NodeId) -> bool {
        self.has_marker(node, AttributeKind::MissingCloseGrouping)
    }

    pub fn verbatim_image(&self, node: NodeId) -> Option<&str> {
        self.text(node, AttributeKind::VerbatimImage)
    }

    pub fn code_region(&self, node: NodeId) -> Option<&str> {
        self.text(node, AttributeKind::CodeRegion)
    }

    /// Declaration node a reference was bound to by the parser.
    pub fn variable_reference(&self, node: NodeId) -> Option<NodeId> {
        self.node_ref(node, AttributeKind::VariableReference)
    }

    /// Name the node implicitly declares.
    pub fn variable(&self, node: NodeId) -> Option<&str> {
        self.text(node, AttributeKind::Variable)
    }

    /// All attributes of one node, in no particular order.
    pub fn for_node(&self, node: NodeId) -> impl Iterator<Item = (AttributeKind, &AttributeValue)> {
        self.entries
            .iter()
            .filter(move |((n, _), _)| *n == node)
            .map(|((_, kind), value)| (*kind, value))
    }
}
