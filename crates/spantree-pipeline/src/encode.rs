//! Binary-tree re-encoding of a spanning forest.
//!
//! Third stage of the pipeline. A breadth-first walk starts at the
//! chosen root; each dequeued node adopts at most two of its
//! not-yet-visited neighbors, taken in ascending node order. With two
//! or more candidates the smallest becomes the left child and the next
//! the right child; further neighbors are left out of the tree. A lone
//! candidate sits left when it orders below its parent and right
//! otherwise.
//!
//! Only the root's connected component is reachable, so for a
//! disconnected forest the tree covers that component alone.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};

use crate::types::{NodeId, PipelineError, SpanningForest, TreeNode};

/// Re-encode `forest` as a binary tree rooted at `root`.
///
/// When `root` is `None` the first declared node is used. Returns
/// `Ok(None)` only for an empty node set; a node set without edges
/// still yields a single-leaf tree for the root.
///
/// # Errors
///
/// [`PipelineError::RootNotFound`] when an explicit `root` is not one
/// of the declared `nodes`.
pub fn encode_binary_tree(
    nodes: &[NodeId],
    forest: &SpanningForest,
    root: Option<&NodeId>,
) -> Result<Option<TreeNode>, PipelineError> {
    // Adjacency over every declared node, isolated ones included.
    let mut graph = UnGraph::<NodeId, f64>::new_undirected();
    let mut indices: HashMap<&NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        indices
            .entry(node)
            .or_insert_with(|| graph.add_node(node.clone()));
    }
    for edge in forest.edges() {
        if let (Some(&u), Some(&v)) = (indices.get(edge.a()), indices.get(edge.b())) {
            graph.add_edge(u, v, edge.weight());
        }
    }

    let root_index = match root {
        Some(value) => match indices.get(value) {
            Some(&index) => index,
            None => return Err(PipelineError::RootNotFound(value.clone())),
        },
        None => match nodes.first().and_then(|first| indices.get(first)) {
            Some(&index) => index,
            None => return Ok(None),
        },
    };

    // Child slots per node, filled during the walk and materialized
    // into an owned tree afterwards.
    let mut left: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
    let mut right: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();

    visited[root_index.index()] = true;
    queue.push_back(root_index);

    while let Some(current) = queue.pop_front() {
        let mut children: Vec<NodeIndex> = graph
            .neighbors(current)
            .filter(|neighbor| !visited[neighbor.index()])
            .collect();
        children.sort_unstable_by(|&x, &y| graph[x].cmp(&graph[y]));

        match children.as_slice() {
            [] => {}
            &[only] => {
                if graph[only] < graph[current] {
                    left[current.index()] = Some(only);
                } else {
                    right[current.index()] = Some(only);
                }
                visited[only.index()] = true;
                queue.push_back(only);
            }
            &[first, second, ..] => {
                // Neighbors beyond the second stay out of the tree.
                left[current.index()] = Some(first);
                right[current.index()] = Some(second);
                for child in [first, second] {
                    visited[child.index()] = true;
                    queue.push_back(child);
                }
            }
        }
    }

    Ok(Some(build_subtree(&graph, &left, &right, root_index)))
}

fn build_subtree(
    graph: &UnGraph<NodeId, f64>,
    left: &[Option<NodeIndex>],
    right: &[Option<NodeIndex>],
    index: NodeIndex,
) -> TreeNode {
    TreeNode {
        value: graph[index].clone(),
        left: left[index.index()].map(|child| Box::new(build_subtree(graph, left, right, child))),
        right: right[index.index()]
            .map(|child| Box::new(build_subtree(graph, left, right, child))),
    }
}
