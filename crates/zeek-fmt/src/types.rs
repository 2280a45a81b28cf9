//! `type` declaration and composite-type layout rules (spec §4.3).

use zeek_syntax::NodeId;

use crate::dispatch::{format_brace_block, format_child, format_joined, BraceStyle, FormatCtx};
use crate::hints::Hints;

/// `type Foo: record { ... };` — the `type`/name/`:` run joined tightly,
/// the type spec (and its possible brace body) following.
pub fn format_type_decl(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    format_joined(ctx, &children);
}

/// A type expression: `record { ... }`, `enum { ... }`, `table[...] of ...`,
/// or a bare type name. Brace bodies get the same-line brace style; anything
/// else is a tight join.
pub fn format_type_spec(ctx: &mut FormatCtx, id: NodeId) {
    let children = ctx.tree.get(id).nonerr_children.clone();
    for (i, &child) in children.iter().enumerate() {
        let is_brace_body = matches!(
            ctx.tree.get(child).kind.as_str(),
            "enum_body" | "record_body"
        );
        // `format_brace_block`'s same-line style writes its own separating
        // space before `{`; anything else gets one from us.
        if i > 0 && !is_brace_body {
            ctx.write_sp();
        }
        if is_brace_body {
            format_brace_block(ctx, child, BraceStyle::SameLine);
        } else {
            format_child(ctx, child, Hints::NONE);
        }
    }
}

/// `{ id, id, ... }` (enum) or `{ field: type; ... }` (record): one member
/// per line, brace on the same line as the keyword that introduced it.
pub fn format_brace_body(ctx: &mut FormatCtx, id: NodeId) {
    format_brace_block(ctx, id, BraceStyle::SameLine);
}
