//! The enriched tree node (spec §3, §4.1) and its arena.
//!
//! Parent/sibling links are back-edges, so the tree is stored as an arena of
//! [`EstNode`]s indexed by [`NodeId`] rather than as owned `Rc`/`RefCell`
//! nodes with cyclic references (spec §9 Design Notes).

use zeek_common::{Point, Span};

/// Index into a [`Tree`]'s arena. Nodes are allocated bottom-up during the
/// build pass, so the root is whichever id [`Tree::root`] reports, not
/// necessarily index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The four Zeekygen/minor comment kinds, plus the plain newline token, that
/// the AST/CST split treats specially (spec §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CstKind {
    Nl,
    MinorComment,
    ZeekygenHeadComment,
    ZeekygenNextComment,
    ZeekygenPrevComment,
}

impl CstKind {
    fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "nl" => Some(Self::Nl),
            "minor_comment" => Some(Self::MinorComment),
            "zeekygen_head_comment" => Some(Self::ZeekygenHeadComment),
            "zeekygen_next_comment" => Some(Self::ZeekygenNextComment),
            "zeekygen_prev_comment" => Some(Self::ZeekygenPrevComment),
            _ => None,
        }
    }
}

/// A single node of the enriched syntax tree.
///
/// `children` is the full AST child sequence, including any isolated `ERROR`
/// entries (so traversal and dumping see the whole story); `nonerr_children`
/// is the same sequence with `ERROR` entries removed, since formatter
/// positional lookahead (`_get_child(offset)`) must not be thrown off by an
/// interspersed error.
#[derive(Debug, Clone)]
pub struct EstNode {
    pub kind: String,
    pub is_named: bool,
    pub is_missing: bool,
    pub has_error: bool,
    pub span: Span,
    pub start_point: Point,
    pub end_point: Point,

    /// Whether this node belongs to the AST view: `kind != "nl"` and
    /// `!kind.ends_with("_comment")`.
    pub is_ast: bool,

    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub nonerr_children: Vec<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,

    pub prev_cst_sibling: Option<NodeId>,
    pub next_cst_sibling: Option<NodeId>,

    /// CST fragments grouped with this AST node, populated only on AST nodes.
    pub prev_cst_siblings: Vec<NodeId>,
    pub next_cst_siblings: Vec<NodeId>,

    /// `ERROR` nodes isolated at grouping time, populated only on AST nodes.
    pub prev_error_siblings: Vec<NodeId>,
    pub next_error_siblings: Vec<NodeId>,

    /// Populated only on CST nodes: the AST node they're anchored to.
    pub ast_parent: Option<NodeId>,
    pub is_cst_prev_node: bool,
    pub is_cst_next_node: bool,
}

impl EstNode {
    pub fn is_error(&self) -> bool {
        self.kind == "ERROR"
    }

    pub fn is_nl(&self) -> bool {
        self.kind == "nl"
    }

    pub fn is_comment(&self) -> bool {
        self.kind.ends_with("_comment")
    }

    pub fn is_minor_comment(&self) -> bool {
        self.kind == "minor_comment"
    }

    pub fn is_zeekygen_head_comment(&self) -> bool {
        self.kind == "zeekygen_head_comment"
    }

    pub fn is_zeekygen_next_comment(&self) -> bool {
        self.kind == "zeekygen_next_comment"
    }

    pub fn is_zeekygen_prev_comment(&self) -> bool {
        self.kind == "zeekygen_prev_comment"
    }

    pub fn cst_kind(&self) -> Option<CstKind> {
        CstKind::from_type(&self.kind)
    }

    pub fn byte_len(&self) -> usize {
        self.span.len()
    }
}

/// Owns every [`EstNode`] in one enriched tree, keyed by [`NodeId`].
///
/// Built once by [`crate::builder`], patched once, then treated as
/// read-only for the remainder of the program's life (spec §3 Lifecycle).
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<EstNode>,
    root: NodeId,
}

impl Tree {
    pub(crate) fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: NodeId(0),
        }
    }

    pub(crate) fn alloc(&mut self, node: EstNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &EstNode {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut EstNode {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Byte range of a node as a source slice.
    pub fn text<'a>(&self, id: NodeId, source: &'a [u8]) -> &'a [u8] {
        let span = self.get(id).span;
        &source[span.start..span.end]
    }
}
