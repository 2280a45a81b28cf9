//! The error-preserving formatter (spec §4.4): verbatim emission of an
//! unparsable `ERROR` node's byte range, surrounded by protective whitespace
//! so adjacent content can never merge across the boundary, with any
//! working sub-grammar found inside it still pretty-printed.

use zeek_syntax::NodeId;

use crate::dispatch::{format_node, FormatCtx};

pub fn format_error(ctx: &mut FormatCtx, id: NodeId) {
    let span = ctx.tree.get(id).span;
    let children = ctx.tree.get(id).children.clone();

    ctx.out.write_raw(b" ");

    let mut cursor = span.start;
    for child_id in children {
        let child_span = ctx.tree.get(child_id).span;
        let child_has_children = !ctx.tree.get(child_id).children.is_empty();
        if !child_has_children {
            continue;
        }
        if child_span.start > cursor {
            let raw = ctx.source[cursor..child_span.start].to_vec();
            ctx.out.write_raw(&raw);
        }
        format_node(ctx, child_id);
        cursor = child_span.end;
    }

    if span.end > cursor {
        let raw = ctx.source[cursor..span.end].to_vec();
        ctx.out.write_raw(&raw);
    }

    ctx.out.write_raw(b" ");
    ctx.mark_content();
    ctx.reset_zeekygen_alignment();
}
