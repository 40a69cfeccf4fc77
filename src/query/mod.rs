//! Read-only traversal helpers over a resolved tree.

use std::cmp::Ordering;

use crate::ast::{Ast, NodeId, NodeKind};

/// Every node of the subtree rooted at `root`, in pre-order.
pub fn flatten(ast: &Ast, root: NodeId) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = ast.get(id) else {
            continue;
        };
        nodes.push(id);
        stack.extend(node.children().into_iter().rev());
    }
    nodes
}

/// First node of `kind` named `name` in pre-order.
pub fn find_first(ast: &Ast, root: NodeId, kind: NodeKind, name: &str) -> Option<NodeId> {
    flatten(ast, root)
        .into_iter()
        .find(|&id| ast.get(id).is_some_and(|node| node.kind() == kind && node.is_named(name)))
}

pub fn find_all(ast: &Ast, root: NodeId, kind: NodeKind) -> Vec<NodeId> {
    flatten(ast, root)
        .into_iter()
        .filter(|&id| ast.kind(id) == Some(kind))
        .collect()
}

pub fn find_all_named(ast: &Ast, root: NodeId, kind: NodeKind, name: &str) -> Vec<NodeId> {
    flatten(ast, root)
        .into_iter()
        .filter(|&id| ast.get(id).is_some_and(|node| node.kind() == kind && node.is_named(name)))
        .collect()
}

/// Orders by start line, then start column, then node id. Nodes without a
/// source region sort after positioned ones.
pub fn compare_by_position(ast: &Ast, a: NodeId, b: NodeId) -> Ordering {
    let position = |id: NodeId| {
        ast.get(id)
            .and_then(|node| node.region())
            .map(|region| (region.start_line, region.start_column))
    };
    match (position(a), position(b)) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.cmp(&b))
}

pub fn sort_by_position(ast: &Ast, nodes: &mut [NodeId]) {
    nodes.sort_by(|&a, &b| compare_by_position(ast, a, b));
}
