//! Minimum spanning forest via Kruskal's algorithm.
//!
//! Second stage of the pipeline. Candidate edges are sorted ascending
//! by weight with a stable sort, so equal weights keep their builder
//! (first-seen column) order, then merged through a union-find. An edge
//! is accepted exactly when its endpoints are still in different
//! components.

use std::collections::HashMap;

use petgraph::unionfind::UnionFind;

use crate::types::{Edge, Graph, NodeId, SpanningForest};

/// Compute a minimum spanning forest of `graph`.
///
/// For a connected graph the result is a spanning tree: `n - 1` edges
/// of globally minimum total weight. For a disconnected graph each
/// connected component gets its own minimum spanning tree and the
/// accepted edges of all components are returned together. Nodes
/// without edges contribute nothing.
///
/// Accepted edges appear in acceptance order, which is ascending weight
/// order. An empty node set yields an empty forest.
#[must_use]
pub fn minimum_spanning_forest(graph: &Graph) -> SpanningForest {
    let n = graph.node_count();
    if n == 0 {
        return SpanningForest::new(Vec::new());
    }

    let index: HashMap<&NodeId, usize> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| (node, i))
        .collect();

    // Stable sort keeps the builder's column order for equal weights.
    let mut candidates: Vec<&Edge> = graph.edges().iter().collect();
    candidates.sort_by(|x, y| x.weight().total_cmp(&y.weight()));

    let mut components = UnionFind::<usize>::new(n);
    let mut accepted: Vec<Edge> = Vec::with_capacity(n - 1);

    for edge in candidates {
        // Edges pointing outside the declared node set cannot span it.
        let (Some(&u), Some(&v)) = (index.get(edge.a()), index.get(edge.b())) else {
            continue;
        };

        let ru = components.find_mut(u);
        let rv = components.find_mut(v);
        if ru != rv {
            components.union(ru, rv);
            accepted.push(edge.clone());
            if accepted.len() == n - 1 {
                // Spanning tree complete; remaining edges would only
                // close cycles.
                break;
            }
        }
    }

    SpanningForest::new(accepted)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn named(raw: &[&str]) -> Vec<NodeId> {
        raw.iter().map(|&s| NodeId::from(s)).collect()
    }

    fn edge(u: &str, v: &str, weight: f64) -> Edge {
        Edge::new(NodeId::from(u), NodeId::from(v), weight)
    }

    /// Minimum total weight over every spanning edge subset, by
    /// exhaustive enumeration. Only usable for small graphs.
    fn brute_force_minimum(graph: &Graph) -> f64 {
        let n = graph.node_count();
        let edges = graph.edges();
        let mut best = f64::INFINITY;

        for mask in 0_u32..(1 << edges.len()) {
            let chosen: Vec<&Edge> = edges
                .iter()
                .enumerate()
                .filter(|&(i, _)| mask & (1 << i) != 0)
                .map(|(_, e)| e)
                .collect();
            if chosen.len() != n - 1 || !spans_all_nodes(graph.nodes(), &chosen) {
                continue;
            }
            let weight: f64 = chosen.iter().map(|e| e.weight()).sum();
            best = best.min(weight);
        }

        best
    }

    fn spans_all_nodes(nodes: &[NodeId], chosen: &[&Edge]) -> bool {
        let index: HashMap<&NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node, i))
            .collect();
        let mut components = UnionFind::<usize>::new(nodes.len());
        for edge in chosen {
            let ru = components.find_mut(index[edge.a()]);
            let rv = components.find_mut(index[edge.b()]);
            if ru != rv {
                components.union(ru, rv);
            }
        }
        let first = components.find_mut(0);
        (1..nodes.len()).all(|i| components.find_mut(i) == first)
    }

    // --- spanning tree tests ---

    #[test]
    fn chain_beats_expensive_shortcut() {
        // Path A-B-C-D plus a weight-10 shortcut A-D. The shortcut
        // would close a cycle, so the three path edges win.
        let graph = Graph::new(
            named(&["A", "B", "C", "D"]),
            vec![
                edge("A", "B", 1.0),
                edge("B", "C", 2.0),
                edge("C", "D", 3.0),
                edge("A", "D", 10.0),
            ],
        );

        let forest = minimum_spanning_forest(&graph);
        assert_eq!(
            forest.edges(),
            &[edge("A", "B", 1.0), edge("B", "C", 2.0), edge("C", "D", 3.0)],
        );
        assert!((forest.total_weight() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn heavier_cycle_edge_is_rejected() {
        let graph = Graph::new(
            named(&["A", "B", "C"]),
            vec![
                edge("A", "B", 1.0),
                edge("B", "C", 2.0),
                edge("A", "C", 3.0),
            ],
        );

        let forest = minimum_spanning_forest(&graph);
        assert_eq!(forest.edges(), &[edge("A", "B", 1.0), edge("B", "C", 2.0)]);
    }

    #[test]
    fn accepted_edges_are_in_ascending_weight_order() {
        // Candidates arrive unsorted; acceptance order is by weight.
        let graph = Graph::new(
            named(&["A", "B", "C", "D"]),
            vec![
                edge("C", "D", 3.0),
                edge("A", "B", 1.0),
                edge("B", "C", 2.0),
            ],
        );

        let forest = minimum_spanning_forest(&graph);
        let weights: Vec<f64> = forest.edges().iter().map(Edge::weight).collect();
        assert!(weights.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn equal_weights_keep_column_order() {
        // All three triangle edges weigh the same; the stable sort keeps
        // their builder order, so the first two are accepted.
        let graph = Graph::new(
            named(&["A", "B", "C"]),
            vec![
                edge("A", "B", 1.0),
                edge("B", "C", 1.0),
                edge("A", "C", 1.0),
            ],
        );

        let forest = minimum_spanning_forest(&graph);
        assert_eq!(forest.edges(), &[edge("A", "B", 1.0), edge("B", "C", 1.0)]);
    }

    #[test]
    fn matches_brute_force_on_dense_graph() {
        let graph = Graph::new(
            named(&["A", "B", "C", "D", "E"]),
            vec![
                edge("A", "B", 4.0),
                edge("A", "C", 1.0),
                edge("B", "C", 3.0),
                edge("B", "D", 2.0),
                edge("C", "D", 5.0),
                edge("C", "E", 6.0),
                edge("D", "E", 1.5),
            ],
        );

        let forest = minimum_spanning_forest(&graph);
        assert_eq!(forest.len(), 4);
        assert!((forest.total_weight() - brute_force_minimum(&graph)).abs() < 1e-9);
    }

    // --- forest tests ---

    #[test]
    fn disconnected_graph_yields_one_tree_per_component() {
        // Components {A, B, C} and {D, E}.
        let graph = Graph::new(
            named(&["A", "B", "C", "D", "E"]),
            vec![
                edge("A", "B", 1.0),
                edge("B", "C", 2.0),
                edge("A", "C", 9.0),
                edge("D", "E", 1.0),
            ],
        );

        let forest = minimum_spanning_forest(&graph);
        assert_eq!(forest.len(), 3);
        assert!(forest.edges().contains(&edge("A", "B", 1.0)));
        assert!(forest.edges().contains(&edge("B", "C", 2.0)));
        assert!(forest.edges().contains(&edge("D", "E", 1.0)));
    }

    #[test]
    fn isolated_nodes_contribute_no_edges() {
        let graph = Graph::new(
            named(&["A", "B", "loner"]),
            vec![edge("A", "B", 1.0)],
        );

        let forest = minimum_spanning_forest(&graph);
        assert_eq!(forest.edges(), &[edge("A", "B", 1.0)]);
    }

    #[test]
    fn graph_with_no_edges_yields_empty_forest() {
        let graph = Graph::new(named(&["A", "B", "C"]), vec![]);
        assert!(minimum_spanning_forest(&graph).is_empty());
    }

    #[test]
    fn empty_graph_yields_empty_forest() {
        let graph = Graph::new(vec![], vec![]);
        assert!(minimum_spanning_forest(&graph).is_empty());
    }

    #[test]
    fn single_node_yields_empty_forest() {
        let graph = Graph::new(named(&["A"]), vec![]);
        assert!(minimum_spanning_forest(&graph).is_empty());
    }

    // --- determinism tests ---

    #[test]
    fn forest_is_deterministic() {
        let graph = Graph::new(
            named(&["A", "B", "C", "D"]),
            vec![
                edge("A", "B", 2.0),
                edge("B", "C", 2.0),
                edge("C", "D", 2.0),
                edge("A", "D", 2.0),
            ],
        );

        let first = minimum_spanning_forest(&graph);
        let second = minimum_spanning_forest(&graph);
        assert_eq!(first, second);
    }
}
