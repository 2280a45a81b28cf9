//! Declaration layout rules (spec §4.3): module headers, globals/options/
//! const/redef, and function/event/hook declarations.

use zeek_syntax::NodeId;

use crate::dispatch::{
    format_brace_block, format_child, format_joined, BraceStyle, FormatCtx,
};
use crate::hints::Hints;

/// The top-level sequence of declarations. Mirrors `TypechangeFormatter`'s
/// decl-grouping heuristic: declarations of the same kind stay packed
/// together; a blank line is forced between groups even when the source
/// didn't already have one, and always around record-type and
/// function/event/hook declarations.
pub fn format_source_file(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    for (i, &child) in children.iter().enumerate() {
        format_child(ctx, child, Hints::NONE);
        if let Some(&next) = children.get(i + 1) {
            if ctx.nl_run < 2 && needs_group_break(ctx, child, next) {
                ctx.write_nl();
            }
        }
    }
}

fn needs_group_break(ctx: &FormatCtx, cur: NodeId, next: NodeId) -> bool {
    if ctx.tree.get(cur).kind != "decl" || ctx.tree.get(next).kind != "decl" {
        return false;
    }
    let cur_inner = first_child_kind(ctx, cur);
    let next_inner = first_child_kind(ctx, next);
    if cur_inner != next_inner {
        return true;
    }
    if is_record_type_decl(ctx, cur) || is_record_type_decl(ctx, next) {
        return true;
    }
    cur_inner.as_deref() == Some("func_decl")
}

fn first_child_kind(ctx: &FormatCtx, id: NodeId) -> Option<String> {
    ctx.tree
        .get(id)
        .nonerr_children
        .first()
        .map(|&c| ctx.tree.get(c).kind.clone())
}

fn is_record_type_decl(ctx: &FormatCtx, id: NodeId) -> bool {
    let Some(&inner) = ctx.tree.get(id).nonerr_children.first() else {
        return false;
    };
    ctx.tree.get(inner).kind == "type_decl" && has_record_body(ctx, inner)
}

fn has_record_body(ctx: &FormatCtx, id: NodeId) -> bool {
    if ctx.tree.get(id).kind == "record_body" {
        return true;
    }
    ctx.tree
        .get(id)
        .nonerr_children
        .iter()
        .any(|&c| has_record_body(ctx, c))
}

/// `module foo;` — keyword, id, `;` on one line.
pub fn format_module_decl(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    format_joined(ctx, &children);
}

/// `export { ... }` — brace attaches to the keyword, contents one per line.
pub fn format_export_decl(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    let Some(&kw) = children.first() else { return };
    format_child(ctx, kw, Hints::NONE);
    let Some(&body) = children.get(1) else { return };
    format_brace_block(ctx, body, BraceStyle::SameLine);
}

/// Globals, options, consts, and redefs of simple values (spec: "keyword id
/// [: type] [initializer] [attrs]; on one line; `;` is `NO_LB_BEFORE`").
pub fn format_simple_decl(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    format_joined(ctx, &children);
}

/// `func_hdr func_body` or `func_hdr ;` (a prototype with no body). K&R
/// bodies always start on a fresh line at the current depth, even when the
/// source wrote the header and body on one line.
pub fn format_func_decl(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    let Some(&hdr) = children.first() else { return };
    format_child(ctx, hdr, Hints::NONE);

    let Some(&rest) = children.get(1) else { return };
    if ctx.text(rest) == b";" {
        format_child(ctx, rest, Hints::NO_LB_BEFORE);
    } else {
        // The body's braces sit one tab deeper than the header they follow
        // (worked example: `event zeek_init()\n\t{ }\n`).
        ctx.enter_block();
        format_child(ctx, rest, Hints::NONE);
        ctx.exit_block();
    }
}

/// `event foo(...)`, `function foo(...): T`, `hook foo(...)` — a single
/// tightly-joined run; the nested keyword/id/params node the grammar wraps
/// this in falls through to the generic joiner too.
pub fn format_func_hdr(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    format_joined(ctx, &children);
}

/// A function/event/hook body: K&R brace placement, one statement per line,
/// `{ }` when empty.
pub fn format_func_body(ctx: &mut FormatCtx, id: NodeId) {
    format_brace_block(ctx, id, BraceStyle::OwnLine);
}

pub fn format_formal_args(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    format_joined(ctx, &children);
}
