//! The parse-tree dump format (spec §6 "Parse-tree dump format"), followed
//! byte-for-byte from `original_source/zeekscript/script.py`'s nested
//! `node_str` closure.

use zeek_syntax::{NodeId, Tree};

const MAX_CONTENT_LEN: usize = 100;

/// Depth-first walk yielding `(node, nesting)`, root at nesting 0. When
/// `include_cst` is set, a node's `prev_cst_siblings`/`next_cst_siblings`
/// are interleaved immediately before/after it, at the same nesting level.
pub fn traverse(tree: &Tree, root: NodeId, include_cst: bool) -> Vec<(NodeId, usize)> {
    let mut out = Vec::new();
    visit(tree, root, 0, include_cst, &mut out);
    out
}

fn visit(tree: &Tree, id: NodeId, nesting: usize, include_cst: bool, out: &mut Vec<(NodeId, usize)>) {
    let node = tree.get(id);
    if include_cst {
        for &cst in &node.prev_cst_siblings {
            out.push((cst, nesting));
        }
    }
    out.push((id, nesting));
    if include_cst {
        for &cst in &node.next_cst_siblings {
            out.push((cst, nesting));
        }
    }
    for &child in &node.children {
        visit(tree, child, nesting + 1, include_cst, out);
    }
}

/// One line of the dump: `{indent}{cst_indicator}{type} (sr.sc,er.ec)
/// {err}{content}`.
pub fn node_str(tree: &Tree, source: &[u8], id: NodeId, nesting: usize) -> String {
    let node = tree.get(id);

    let mut content = String::new();
    if node.is_named {
        let full = &source[node.span.start..node.span.end];
        let extra = if full.len() > MAX_CONTENT_LEN {
            format!("[+{}]", full.len() - MAX_CONTENT_LEN)
        } else {
            String::new()
        };
        let bytes = &full[..full.len().min(MAX_CONTENT_LEN)];
        let ascii: Vec<u8> = bytes.iter().copied().filter(|&b| b.is_ascii()).collect();
        let shown = String::from_utf8_lossy(&ascii).into_owned();
        content = format!("{shown:?}{extra}");
    }

    let cst_indicator = if !node.is_ast {
        if node.is_cst_prev_node {
            "v "
        } else if node.is_cst_next_node {
            "^ "
        } else {
            ""
        }
    } else {
        ""
    };

    let mut flags = Vec::new();
    if node.has_error {
        flags.push("error");
    }
    if node.is_missing {
        flags.push("missing");
    }
    let err = if flags.is_empty() {
        String::new()
    } else {
        format!("[{}] ", flags.join(", "))
    };

    format!(
        "{}{}{} ({}.{},{}.{}) {}{}",
        " ".repeat(4 * nesting),
        cst_indicator,
        node.kind,
        node.start_point.row,
        node.start_point.col,
        node.end_point.row,
        node.end_point.col,
        err,
        content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeek_syntax::{build_tree, FakeNode, FakeNodeRef};

    #[test]
    fn traverse_visits_in_preorder() {
        let src = b"global foo = 1;";
        let fake = FakeNode::named("source_file", 0, src.len())
            .with_children(vec![FakeNode::named("global_decl", 0, src.len()).with_children(vec![
                FakeNode::token("global", 0, 6),
                FakeNode::named("id", 7, 10),
            ])]);
        let tree = build_tree(FakeNodeRef::new(&fake));

        let kinds: Vec<_> = traverse(&tree, tree.root(), false)
            .into_iter()
            .map(|(id, nesting)| (tree.get(id).kind.clone(), nesting))
            .collect();

        assert_eq!(kinds[0], ("source_file".to_string(), 0));
        assert!(kinds.iter().any(|(k, n)| k == "global_decl" && *n == 1));
        assert!(kinds.iter().any(|(k, n)| k == "id" && *n == 2));
    }

    #[test]
    fn node_str_truncates_long_content() {
        let long = "x".repeat(150);
        let fake = FakeNode::named("id", 0, long.len());
        let tree = build_tree(FakeNodeRef::new(&fake));
        let line = node_str(&tree, long.as_bytes(), tree.root(), 0);
        assert!(line.contains("[+50]"));
    }

    #[test]
    fn node_str_flags_errors_and_missing() {
        let fake = FakeNode::named("id", 0, 3).missing();
        let tree = build_tree(FakeNodeRef::new(&fake));
        let line = node_str(&tree, b"foo", tree.root(), 0);
        assert!(line.contains("[missing]"));
    }
}
