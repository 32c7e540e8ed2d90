//! Graphviz DOT serializers.
//!
//! Renders the spanning forest as an undirected graph with weight
//! labels, and the binary encoding as a digraph whose edges carry `L`
//! and `R` labels for the child slots.
//!
//! These are pure functions with no I/O -- they return a `String`.

use std::fmt::Write;

use spantree_pipeline::{NodeId, SpanningForest, TreeNode};

/// Quote a node identifier as a double-quoted DOT ID.
///
/// Backslashes and double quotes are escaped; everything else passes
/// through unchanged inside the quotes.
fn quote_id(id: &NodeId) -> String {
    let raw = id.to_string();
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for ch in raw.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Render the spanning forest as an undirected DOT graph.
///
/// Each accepted edge becomes one `--` statement with the weight as its
/// label, in acceptance order.
#[must_use]
pub fn forest_to_dot(forest: &SpanningForest) -> String {
    let mut out = String::from("graph spanning_forest {\n");
    for edge in forest.edges() {
        let _ = writeln!(
            out,
            "  {} -- {} [label=\"{}\"];",
            quote_id(edge.a()),
            quote_id(edge.b()),
            edge.weight(),
        );
    }
    out.push_str("}\n");
    out
}

/// Render the binary tree as a DOT digraph.
///
/// Every node appears as a statement of its own, so single-node trees
/// still render; each parent-child link carries an `L` or `R` label.
#[must_use]
pub fn tree_to_dot(tree: &TreeNode) -> String {
    let mut out = String::from("digraph binary_tree {\n");
    write_tree_node(&mut out, tree);
    out.push_str("}\n");
    out
}

fn write_tree_node(out: &mut String, node: &TreeNode) {
    let _ = writeln!(out, "  {};", quote_id(&node.value));
    if let Some(left) = &node.left {
        let _ = writeln!(
            out,
            "  {} -> {} [label=\"L\"];",
            quote_id(&node.value),
            quote_id(&left.value),
        );
        write_tree_node(out, left);
    }
    if let Some(right) = &node.right {
        let _ = writeln!(
            out,
            "  {} -> {} [label=\"R\"];",
            quote_id(&node.value),
            quote_id(&right.value),
        );
        write_tree_node(out, right);
    }
}
