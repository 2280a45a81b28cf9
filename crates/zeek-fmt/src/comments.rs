//! Layout rules for the CST-only kinds: `nl` and the four comment types
//! (spec §4.1, §4.3 "Comments" and "Newlines").

use zeek_syntax::NodeId;

use crate::dispatch::FormatCtx;
use crate::hints::Hints;

/// Dispatch for a CST fragment anchored to some AST node (a `prev_cst_siblings`
/// or `next_cst_siblings` entry).
pub fn format_cst_node(ctx: &mut FormatCtx, id: NodeId) {
    match ctx.tree.get(id).kind.as_str() {
        "nl" => format_nl(ctx, id),
        "minor_comment" => format_minor_comment(ctx, id),
        "zeekygen_head_comment" | "zeekygen_next_comment" => format_zeekygen_verbatim(ctx, id),
        "zeekygen_prev_comment" => format_zeekygen_prev(ctx, id),
        _ => ctx.format_token(id, Hints::NONE),
    }
}

/// Collapse a run of blank lines to exactly one (spec: "collapse a run of
/// blank lines to exactly one blank line"). The first `nl` fragment in a run
/// is the statement's own line-ending break; a second is the one blank line
/// the run is allowed to contribute. Anything past that is suppressed.
///
/// A run touching `{` or `}` on either edge contributes nothing at all: the
/// block formatter already supplies the structural line break there, and
/// spec P8 forbids a blank line immediately inside a block's braces.
///
/// Deliberately does not reset `prev_zeekygen_col`: a lone `nl` is exactly
/// what separates two `##<` comments on "adjacent lines", so it must not
/// break that alignment chain.
fn format_nl(ctx: &mut FormatCtx, id: NodeId) {
    if is_brace_adjacent(ctx, id) {
        ctx.nl_run += 1;
        return;
    }
    if ctx.nl_run < 2 {
        ctx.write_nl();
    }
    ctx.nl_run += 1;
}

fn is_brace_adjacent(ctx: &FormatCtx, id: NodeId) -> bool {
    let node = ctx.tree.get(id);
    if node.next_cst_sibling.is_some_and(|n| ctx.tree.get(n).kind == "}") {
        return true;
    }
    let mut cur = id;
    loop {
        match ctx.tree.get(cur).prev_cst_sibling {
            Some(p) if ctx.tree.get(p).is_nl() => cur = p,
            Some(p) => return ctx.tree.get(p).kind == "{",
            None => return false,
        }
    }
}

/// `##!` and `##`: emit verbatim, then newline.
fn format_zeekygen_verbatim(ctx: &mut FormatCtx, id: NodeId) {
    let bytes = ctx.text(id).to_vec();
    ctx.write(&bytes, Hints::ZERO_WIDTH);
    ctx.write_nl();
    ctx.mark_content();
    ctx.reset_zeekygen_alignment();
}

/// `# …` (minor): inline when it trails a token on the same source line,
/// own line when it was alone.
fn format_minor_comment(ctx: &mut FormatCtx, id: NodeId) {
    if trails_a_token(ctx, id) {
        ctx.write_sp();
    }
    let bytes = ctx.text(id).to_vec();
    ctx.write(&bytes, Hints::ZERO_WIDTH);
    ctx.write_nl();
    ctx.mark_content();
    ctx.reset_zeekygen_alignment();
}

/// `##<`: align to the column of the previous `##<` comment if one was just
/// emitted; otherwise a single separating space.
fn format_zeekygen_prev(ctx: &mut FormatCtx, id: NodeId) {
    let current_col = ctx.out.column();
    match ctx.prev_zeekygen_col {
        Some(col) if col > current_col => {
            let pad = vec![b' '; col - current_col];
            ctx.write(&pad, Hints::NONE);
        }
        _ => ctx.write_sp(),
    }
    let start_col = ctx.out.column();
    let bytes = ctx.text(id).to_vec();
    ctx.write(&bytes, Hints::ZERO_WIDTH);
    ctx.write_nl();
    ctx.prev_zeekygen_col = Some(start_col);
}

/// Whether a comment node has non-whitespace source content before it on
/// its own source line (i.e. it trails a token rather than standing alone).
fn trails_a_token(ctx: &FormatCtx, id: NodeId) -> bool {
    let start = ctx.tree.get(id).span.start;
    let mut i = start;
    while i > 0 {
        i -= 1;
        match ctx.source[i] {
            b'\n' => return false,
            b' ' | b'\t' | b'\r' => continue,
            _ => return true,
        }
    }
    false
}
