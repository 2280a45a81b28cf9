//! Expression layout rules (spec §4.3): index slices, interval literals,
//! and binary expressions.

use zeek_syntax::NodeId;

use crate::dispatch::{format_child, format_joined, FormatCtx};
use crate::hints::Hints;

fn is_simple_operand(ctx: &FormatCtx, id: NodeId) -> bool {
    ctx.tree.get(id).nonerr_children.is_empty()
}

/// `low? : high?` inside `[...]`. A bare literal/identifier bound hugs the
/// colon (`xs[0:1]`); anything more complex gets a leading space before the
/// colon, and a trailing one too if there's a right bound
/// (`data[1 - 1 :]`, `data[1 - 1 : 1]`).
pub fn format_index_slice(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    let Some(colon_pos) = children.iter().position(|&c| ctx.text(c) == b":") else {
        format_joined(ctx, &children);
        return;
    };
    let low = &children[..colon_pos];
    let colon = children[colon_pos];
    let high = &children[colon_pos + 1..];

    let complex = low.last().is_some_and(|&l| !is_simple_operand(ctx, l));

    for &c in low {
        format_child(ctx, c, Hints::NONE);
    }
    if complex {
        ctx.write_sp();
    }
    format_child(ctx, colon, Hints::NONE);
    if complex && !high.is_empty() {
        ctx.write_sp();
    }
    for &c in high {
        format_child(ctx, c, Hints::NONE);
    }
}

/// An interval literal (`1sec`, `3.5hrs`): the scalar and unit join with no
/// space between them regardless of source whitespace.
pub fn format_interval(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    for &c in &children {
        format_child(ctx, c, Hints::NONE);
    }
}

/// A binary expression. Boolean chains (`&&`, `||`) and string concatenation
/// (`+`) mark their operator `GOOD_AFTER_LB`, so a long chain prefers to
/// break before the operator once the line has already overflowed. Anything
/// else falls back to the tight-punctuation join.
pub fn format_expr(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    if children.len() == 3 {
        let op = ctx.text(children[1]).to_vec();
        let is_chain_op = matches!(op.as_slice(), b"&&" | b"||" | b"+");
        format_child(ctx, children[0], Hints::NONE);
        ctx.write_sp();
        let hints = if is_chain_op {
            Hints::GOOD_AFTER_LB
        } else {
            Hints::NONE
        };
        format_child(ctx, children[1], hints);
        ctx.write_sp();
        format_child(ctx, children[2], Hints::NONE);
        return;
    }
    format_joined(ctx, &children);
}
