//! The external parser contract (spec §6): the minimal shape the tree
//! builder needs from a tree-sitter-compatible concrete syntax tree.
//!
//! The real collaborator is `tree_sitter::Node`, via the impl below. Tests
//! build [`FakeNode`] trees by hand so the builder can be exercised without a
//! Zeek grammar.

use zeek_common::Point;

/// What the tree builder needs from any tree-sitter-compatible parse node.
///
/// Mirrors `tree_sitter::Node`'s shape exactly (kind/is_named/is_missing/
/// has_error/byte+point spans/children) so the real crate can implement it
/// with no adaptation beyond delegation.
pub trait ParseNode: Copy {
    /// Grammar symbol name for named rules, or the literal token text for
    /// terminals (e.g. `"if"`, `";"`).
    fn kind(&self) -> &str;
    fn is_named(&self) -> bool;
    fn is_missing(&self) -> bool;
    fn has_error(&self) -> bool;
    fn start_byte(&self) -> usize;
    fn end_byte(&self) -> usize;
    fn start_point(&self) -> Point;
    fn end_point(&self) -> Point;
    fn child_count(&self) -> usize;
    fn child(&self, index: usize) -> Option<Self>
    where
        Self: Sized;
}

impl<'tree> ParseNode for tree_sitter::Node<'tree> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn is_named(&self) -> bool {
        tree_sitter::Node::is_named(self)
    }

    fn is_missing(&self) -> bool {
        tree_sitter::Node::is_missing(self)
    }

    fn has_error(&self) -> bool {
        tree_sitter::Node::has_error(self)
    }

    fn start_byte(&self) -> usize {
        tree_sitter::Node::start_byte(self)
    }

    fn end_byte(&self) -> usize {
        tree_sitter::Node::end_byte(self)
    }

    fn start_point(&self) -> Point {
        let p = tree_sitter::Node::start_position(self);
        Point::new(p.row, p.column)
    }

    fn end_point(&self) -> Point {
        let p = tree_sitter::Node::end_position(self);
        Point::new(p.row, p.column)
    }

    fn child_count(&self) -> usize {
        tree_sitter::Node::child_count(self)
    }

    fn child(&self, index: usize) -> Option<Self> {
        tree_sitter::Node::child(self, index)
    }
}

/// A hand-buildable stand-in for a tree-sitter node, for tests and for any
/// consumer that wants to exercise the tree builder without linking a real
/// grammar.
#[derive(Debug, Clone)]
pub struct FakeNode {
    pub kind: String,
    pub is_named: bool,
    pub is_missing: bool,
    pub has_error: bool,
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_point: Point,
    pub end_point: Point,
    pub children: Vec<FakeNode>,
}

impl FakeNode {
    pub fn named(kind: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind: kind.into(),
            is_named: true,
            is_missing: false,
            has_error: false,
            start_byte: start,
            end_byte: end,
            start_point: Point::new(0, start),
            end_point: Point::new(0, end),
            children: Vec::new(),
        }
    }

    pub fn token(kind: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            is_named: false,
            ..Self::named(kind, start, end)
        }
    }

    pub fn with_children(mut self, children: Vec<FakeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn missing(mut self) -> Self {
        self.is_missing = true;
        self
    }

    pub fn erroring(mut self) -> Self {
        self.has_error = true;
        self
    }
}

/// A borrowing handle into a [`FakeNode`] tree, since `FakeNode` itself owns
/// its children and can't implement `Copy`. The handle itself is a bare
/// reference, so it copies just as cheaply as `tree_sitter::Node` does.
#[derive(Debug, Clone)]
pub struct FakeNodeRef<'a> {
    pub node: &'a FakeNode,
}

impl Copy for FakeNodeRef<'_> {}

impl<'a> FakeNodeRef<'a> {
    pub fn new(node: &'a FakeNode) -> Self {
        Self { node }
    }
}

impl<'a> ParseNode for FakeNodeRef<'a> {
    fn kind(&self) -> &str {
        &self.node.kind
    }

    fn is_named(&self) -> bool {
        self.node.is_named
    }

    fn is_missing(&self) -> bool {
        self.node.is_missing
    }

    fn has_error(&self) -> bool {
        self.node.has_error
    }

    fn start_byte(&self) -> usize {
        self.node.start_byte
    }

    fn end_byte(&self) -> usize {
        self.node.end_byte
    }

    fn start_point(&self) -> Point {
        self.node.start_point
    }

    fn end_point(&self) -> Point {
        self.node.end_point
    }

    fn child_count(&self) -> usize {
        self.node.children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.node.children.get(index).map(FakeNodeRef::new)
    }
}
