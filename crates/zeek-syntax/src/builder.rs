//! Clones a tree-sitter-compatible parse tree into an enriched [`Tree`]
//! (spec §4.2): classifies AST vs CST, anchors comments/newlines to the AST
//! node they document, isolates `ERROR` nodes, and patches trailing CST
//! fragments down onto the deepest token they describe.
//!
//! Ported from `zeekscript`'s `Script._clone_tree`/`_patch_tree`, with the
//! ERROR-isolation pass built out to the fuller behavior this tree's
//! formatters require.

use std::collections::HashSet;

use zeek_common::{Point, Span};

use crate::node::{EstNode, NodeId, Tree};
use crate::parse_node::ParseNode;

/// Build an enriched tree from the root of a tree-sitter-compatible parse
/// tree.
pub fn build_tree<N: ParseNode>(root: N) -> Tree {
    let mut tree = Tree::empty();
    let root_id = build_node(root, &mut tree);
    tree.set_root(root_id);
    patch_tree(&mut tree);
    tree
}

fn build_node<N: ParseNode>(pn: N, tree: &mut Tree) -> NodeId {
    let mut raw_children = Vec::with_capacity(pn.child_count());
    for i in 0..pn.child_count() {
        if let Some(child) = pn.child(i) {
            raw_children.push(build_node(child, tree));
        }
    }

    link_cst_chain(tree, &raw_children);

    let mut extra_children: Vec<NodeId> = Vec::new();
    let mut ast_children: Vec<NodeId> = raw_children
        .iter()
        .copied()
        .filter(|&c| tree.get(c).is_ast)
        .collect();

    if ast_children.is_empty() && !raw_children.is_empty() {
        let first = *raw_children.first().unwrap();
        let null_id = alloc_null(tree, tree.get(first).span.start, tree.get(first).start_point);
        for &c in &raw_children {
            tree.get_mut(c).ast_parent = Some(null_id);
            tree.get_mut(c).is_cst_prev_node = true;
            tree.get_mut(null_id).prev_cst_siblings.push(c);
        }
        ast_children.push(null_id);
        extra_children.push(null_id);
    } else {
        anchor_cst(tree, &raw_children, &ast_children);
    }

    let nonerr_children = isolate_errors(tree, &ast_children, &mut extra_children);
    link_ast_chain(tree, &nonerr_children);

    let kind = pn.kind().to_string();
    let is_ast = is_ast_kind(&kind);
    let span = Span::new(pn.start_byte(), pn.end_byte());

    let id = tree.alloc(EstNode {
        kind,
        is_named: pn.is_named(),
        is_missing: pn.is_missing(),
        has_error: pn.has_error(),
        span,
        start_point: pn.start_point(),
        end_point: pn.end_point(),
        is_ast,
        parent: None,
        children: ast_children,
        nonerr_children,
        prev_sibling: None,
        next_sibling: None,
        prev_cst_sibling: None,
        next_cst_sibling: None,
        prev_cst_siblings: Vec::new(),
        next_cst_siblings: Vec::new(),
        prev_error_siblings: Vec::new(),
        next_error_siblings: Vec::new(),
        ast_parent: None,
        is_cst_prev_node: false,
        is_cst_next_node: false,
    });

    for &c in raw_children.iter().chain(extra_children.iter()) {
        tree.get_mut(c).parent = Some(id);
    }

    id
}

fn is_ast_kind(kind: &str) -> bool {
    kind != "nl" && !kind.ends_with("_comment")
}

/// A synthetic AST stand-in (spec §3: "a 'null' AST stand-in is inserted if
/// a node would otherwise have no AST children but does have CST children").
fn alloc_null(tree: &mut Tree, at: usize, at_point: Point) -> NodeId {
    tree.alloc(EstNode {
        kind: "nullnode".to_string(),
        is_named: false,
        is_missing: false,
        has_error: false,
        span: Span::new(at, at),
        start_point: at_point,
        end_point: at_point,
        is_ast: true,
        parent: None,
        children: Vec::new(),
        nonerr_children: Vec::new(),
        prev_sibling: None,
        next_sibling: None,
        prev_cst_sibling: None,
        next_cst_sibling: None,
        prev_cst_siblings: Vec::new(),
        next_cst_siblings: Vec::new(),
        prev_error_siblings: Vec::new(),
        next_error_siblings: Vec::new(),
        ast_parent: None,
        is_cst_prev_node: false,
        is_cst_next_node: false,
    })
}

/// Links every child in source order into the CST double chain, regardless
/// of AST membership (spec §4.2 step 3: "link them as CST siblings
/// unconditionally").
fn link_cst_chain(tree: &mut Tree, raw_children: &[NodeId]) {
    for i in 0..raw_children.len() {
        if i > 0 {
            tree.get_mut(raw_children[i]).prev_cst_sibling = Some(raw_children[i - 1]);
        }
        if i + 1 < raw_children.len() {
            tree.get_mut(raw_children[i]).next_cst_sibling = Some(raw_children[i + 1]);
        }
    }
}

/// Links the AST double chain over the error-free child sequence, so
/// ordinary formatter sibling lookups never see an `ERROR` node (those are
/// reached only via `prev_error_siblings`/`next_error_siblings`).
fn link_ast_chain(tree: &mut Tree, nonerr_children: &[NodeId]) {
    for i in 0..nonerr_children.len() {
        if i > 0 {
            tree.get_mut(nonerr_children[i]).prev_sibling = Some(nonerr_children[i - 1]);
        }
        if i + 1 < nonerr_children.len() {
            tree.get_mut(nonerr_children[i]).next_sibling = Some(nonerr_children[i + 1]);
        }
    }
}

/// The CST anchoring pass (spec §4.2): groups each non-AST child (comments,
/// `nl`) with the nearest AST child, per the "trailing" rule.
fn anchor_cst(tree: &mut Tree, raw_children: &[NodeId], ast_children: &[NodeId]) {
    let ast_set: HashSet<NodeId> = ast_children.iter().copied().collect();

    let mut run: Vec<NodeId> = Vec::new();
    let mut prev_ast: Option<NodeId> = None;
    for &c in raw_children {
        if ast_set.contains(&c) {
            if !run.is_empty() {
                classify_run(tree, &run, prev_ast, Some(c));
                run.clear();
            }
            prev_ast = Some(c);
        } else {
            run.push(c);
        }
    }
    if !run.is_empty() {
        classify_run(tree, &run, prev_ast, None);
    }
}

/// Decides, for each CST node in a run strictly between AST node `a` (or the
/// start of the sequence) and AST node `b` (or the end), whether it trails
/// `a` or leads `b`.
fn classify_run(tree: &mut Tree, run: &[NodeId], a: Option<NodeId>, b: Option<NodeId>) {
    for (i, &c) in run.iter().enumerate() {
        let kind = tree.get(c).kind.clone();
        let trails = match kind.as_str() {
            "zeekygen_prev_comment" => true,
            "minor_comment" => i == 0 && a.is_some(),
            "nl" => {
                if i == 0 {
                    a.map(|id| is_comment_or_error(tree, id)).unwrap_or(false)
                } else {
                    is_comment_or_error(tree, run[i - 1])
                }
            }
            _ => false,
        };

        if a.is_some() && (trails || b.is_none()) {
            let anchor = a.unwrap();
            tree.get_mut(c).ast_parent = Some(anchor);
            tree.get_mut(c).is_cst_next_node = true;
            tree.get_mut(anchor).next_cst_siblings.push(c);
        } else if let Some(anchor) = b {
            tree.get_mut(c).ast_parent = Some(anchor);
            tree.get_mut(c).is_cst_prev_node = true;
            tree.get_mut(anchor).prev_cst_siblings.push(c);
        }
    }
}

fn is_comment_or_error(tree: &Tree, id: NodeId) -> bool {
    let node = tree.get(id);
    node.is_comment() || node.is_error()
}

/// The ERROR isolation pass (spec §4.2): pulls `ERROR` nodes out of the
/// AST child sequence into `prev_error_siblings`/`next_error_siblings` on
/// their non-error neighbors, leaving `nonerr_children` error-free.
fn isolate_errors(
    tree: &mut Tree,
    ast_children: &[NodeId],
    extra_children: &mut Vec<NodeId>,
) -> Vec<NodeId> {
    let mut nonerr = Vec::new();
    let mut pending: Vec<NodeId> = Vec::new();

    for &c in ast_children {
        if tree.get(c).is_error() {
            pending.push(c);
        } else {
            tree.get_mut(c).prev_error_siblings = std::mem::take(&mut pending);
            nonerr.push(c);
        }
    }

    if !pending.is_empty() {
        if let Some(&last) = nonerr.last() {
            tree.get_mut(last).next_error_siblings = pending;
        } else {
            let first = pending[0];
            let at = tree.get(first).span.start;
            let at_point = tree.get(first).start_point;
            let host = alloc_null(tree, at, at_point);
            tree.get_mut(host).prev_error_siblings = pending;
            nonerr.push(host);
            extra_children.push(host);
        }
    }

    nonerr
}

/// The patch pass (spec §4.2): migrates a node's `next_cst_siblings` down
/// onto its last child's `next_cst_siblings`, so a trailing `##<` comment
/// anchors to the specific token it documents rather than its composite
/// parent.
fn patch_tree(tree: &mut Tree) {
    for i in 0..tree.len() {
        let id = NodeId(i as u32);
        let (last_child, trailing) = {
            let node = tree.get(id);
            (node.children.last().copied(), node.next_cst_siblings.clone())
        };
        let (Some(last_child), false) = (last_child, trailing.is_empty()) else {
            continue;
        };
        for &c in &trailing {
            tree.get_mut(c).ast_parent = Some(last_child);
        }
        tree.get_mut(last_child).next_cst_siblings.extend(trailing);
        tree.get_mut(id).next_cst_siblings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_node::{FakeNode, FakeNodeRef};

    fn build(node: &FakeNode) -> Tree {
        build_tree(FakeNodeRef::new(node))
    }

    #[test]
    fn simple_ast_children_link() {
        // source_file [ id, id ]
        let src = FakeNode::named("source_file", 0, 7).with_children(vec![
            FakeNode::named("id", 0, 3),
            FakeNode::named("id", 4, 7),
        ]);
        let tree = build(&src);
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.nonerr_children.len(), 2);

        let first = root.children[0];
        let second = root.children[1];
        assert_eq!(tree.get(first).next_sibling, Some(second));
        assert_eq!(tree.get(second).prev_sibling, Some(first));
        assert_eq!(tree.get(first).parent, Some(tree.root()));
    }

    #[test]
    fn synthetic_null_hosts_comment_only_block() {
        // a `{}` block containing only a minor comment: no AST child at all.
        let block = FakeNode::named("func_body", 0, 20).with_children(vec![
            FakeNode::token("{", 0, 1),
            FakeNode::named("minor_comment", 2, 10),
            FakeNode::token("}", 19, 20),
        ]);
        let tree = build(&block);
        let root = tree.get(tree.root());
        // "{" and "}" are AST (tokens, not nl/comment); only the comment is CST-only.
        assert_eq!(root.children.len(), 2);
        assert_eq!(tree.get(root.children[0]).kind, "{");
        assert_eq!(tree.get(root.children[1]).kind, "}");
    }

    #[test]
    fn all_comment_children_get_null_host() {
        let block =
            FakeNode::named("func_body", 0, 20).with_children(vec![FakeNode::named("nl", 0, 1)]);
        let tree = build(&block);
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 1);
        assert_eq!(tree.get(root.children[0]).kind, "nullnode");
        assert_eq!(tree.get(root.children[0]).prev_cst_siblings.len(), 1);
    }

    #[test]
    fn minor_comment_trails_adjacent_ast_node() {
        // id  # trailing comment \n  id
        let src = FakeNode::named("source_file", 0, 30).with_children(vec![
            FakeNode::named("id", 0, 3),
            FakeNode::named("minor_comment", 5, 15),
            FakeNode::named("nl", 15, 16),
            FakeNode::named("id", 16, 19),
        ]);
        let tree = build(&src);
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 2);
        let first_id = root.children[0];
        // minor_comment is adjacent to the first id -> trails it.
        assert_eq!(tree.get(first_id).next_cst_siblings.len(), 2);
        assert_eq!(tree.get(tree.get(first_id).next_cst_siblings[0]).kind, "minor_comment");
        // nl follows a comment -> also trails.
        assert_eq!(tree.get(tree.get(first_id).next_cst_siblings[1]).kind, "nl");
    }

    #[test]
    fn leading_comment_attaches_to_following_node() {
        // ##! header comment \n  id
        let src = FakeNode::named("source_file", 0, 30).with_children(vec![
            FakeNode::named("zeekygen_head_comment", 0, 10),
            FakeNode::named("nl", 10, 11),
            FakeNode::named("id", 11, 14),
        ]);
        let tree = build(&src);
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 1);
        let id_node = root.children[0];
        assert_eq!(tree.get(id_node).prev_cst_siblings.len(), 2);
    }

    #[test]
    fn error_isolation_pulls_error_out_of_nonerr_children() {
        let src = FakeNode::named("source_file", 0, 30).with_children(vec![
            FakeNode::named("id", 0, 3),
            FakeNode::named("ERROR", 4, 8).erroring(),
            FakeNode::named("id", 9, 12),
        ]);
        let tree = build(&src);
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.nonerr_children.len(), 2);

        let first = root.nonerr_children[0];
        let second = root.nonerr_children[1];
        assert_eq!(tree.get(first).next_error_siblings.len(), 1);
        assert_eq!(tree.get(tree.get(first).next_error_siblings[0]).kind, "ERROR");
        assert!(tree.get(second).prev_error_siblings.is_empty());
        // AST sibling chain skips the ERROR node entirely.
        assert_eq!(tree.get(first).next_sibling, Some(second));
    }

    #[test]
    fn all_error_children_get_null_host() {
        let src = FakeNode::named("source_file", 0, 10)
            .with_children(vec![FakeNode::named("ERROR", 0, 10).erroring()]);
        let tree = build(&src);
        let root = tree.get(tree.root());
        assert_eq!(root.nonerr_children.len(), 1);
        let host = root.nonerr_children[0];
        assert_eq!(tree.get(host).kind, "nullnode");
        assert_eq!(tree.get(host).prev_error_siblings.len(), 1);
    }

    #[test]
    fn patch_pass_migrates_trailing_comment_to_last_child() {
        // decl [ id, id ] ##< trailing doc comment anchored on the composite parent
        let decl = FakeNode::named("decl", 0, 30)
            .with_children(vec![
                FakeNode::named("id", 0, 3),
                FakeNode::named("id", 4, 7),
            ]);
        let root = FakeNode::named("source_file", 0, 40).with_children(vec![
            decl,
            FakeNode::named("zeekygen_prev_comment", 8, 20),
        ]);
        let tree = build(&root);
        let root_node = tree.get(tree.root());
        let decl_id = root_node.children[0];
        // Patched: the decl's own next_cst_siblings is now empty...
        assert!(tree.get(decl_id).next_cst_siblings.is_empty());
        // ...and the comment lives on the decl's last child instead.
        let last_child = *tree.get(decl_id).children.last().unwrap();
        assert_eq!(tree.get(last_child).next_cst_siblings.len(), 1);
    }
}
