//! Statement layout rules (spec §4.3): conditionals, `switch`, and the
//! general statement dispatcher.

use zeek_syntax::NodeId;

use crate::dispatch::{format_brace_block, format_child, format_joined, BraceStyle, FormatCtx};
use crate::hints::Hints;

/// `if`/`for`/`while`/`when`: `keyword (expr)` on one line, then the body —
/// indented one level unless it's a `{ ... }` block, in which case the
/// brace stays on the same line. `else if` stays on the `else` line.
pub fn format_conditional(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    let mut i = 0;

    if let Some(&kw) = children.first() {
        format_child(ctx, kw, Hints::NONE);
        i += 1;
    }

    if children.get(i).is_some_and(|&c| ctx.text(c) == b"(") {
        ctx.write_sp();
        while i < children.len() {
            let c = children[i];
            format_child(ctx, c, Hints::NONE);
            i += 1;
            if ctx.text(c) == b")" {
                break;
            }
        }
    }

    if let Some(&body) = children.get(i) {
        format_stmt_body(ctx, body);
        i += 1;
    }

    if children.get(i).is_some_and(|&c| ctx.text(c) == b"else") {
        let else_kw = children[i];
        i += 1;
        ctx.newline_at_depth();
        format_child(ctx, else_kw, Hints::NONE);
        if let Some(&next) = children.get(i) {
            if ctx.tree.get(next).kind == "if" {
                ctx.write_sp();
                format_child(ctx, next, Hints::NONE);
            } else {
                format_stmt_body(ctx, next);
            }
        }
    }
}

fn format_stmt_body(ctx: &mut FormatCtx, body: NodeId) {
    let is_block = ctx
        .tree
        .get(body)
        .nonerr_children
        .first()
        .is_some_and(|&c| ctx.text(c) == b"{");
    if is_block {
        format_brace_block(ctx, body, BraceStyle::SameLine);
    } else {
        ctx.enter_block();
        ctx.newline_at_depth();
        format_child(ctx, body, Hints::NONE);
        ctx.exit_block();
    }
}

/// `switch expr { case ...; ...; }` — header on its own line, brace on its
/// own new line, cases indented one level.
pub fn format_switch(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    let Some(brace_pos) = children.iter().position(|&c| ctx.text(c) == b"{") else {
        format_joined(ctx, &children);
        return;
    };

    format_joined(ctx, &children[..brace_pos]);
    ctx.newline_at_depth();

    let open = children[brace_pos];
    let close = *children.last().unwrap();
    let cases = &children[brace_pos + 1..children.len() - 1];

    format_child(ctx, open, Hints::NONE);
    ctx.enter_block();
    for &case in cases {
        ctx.newline_at_depth();
        format_child(ctx, case, Hints::NONE);
    }
    ctx.exit_block();
    ctx.newline_at_depth();
    format_child(ctx, close, Hints::NONE);
}

/// The general statement dispatcher: delegates straight through when a
/// `stmt` wraps exactly one already-handled rule, renders a bare `{ ... }`
/// block like any other brace block, and otherwise falls back to a single
/// joined line (covers `print`, `return`, `break`, `next`, `local` decls,
/// and bare expression statements — all "keyword/expr...; one line").
pub fn format_stmt(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    if children.len() == 1 {
        format_child(ctx, children[0], Hints::NONE);
        return;
    }
    if children.first().is_some_and(|&c| ctx.text(c) == b"{") {
        format_brace_block(ctx, id, BraceStyle::OwnLine);
        return;
    }
    format_joined(ctx, &children);
}
