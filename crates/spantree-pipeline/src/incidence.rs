//! Graph construction from an incidence-matrix description.
//!
//! First stage of the pipeline: node names, edge column names, a
//! node-by-edge incidence matrix, and a weight per edge name come in; a
//! validated, deduplicated [`Graph`] comes out.

use std::collections::{HashMap, HashSet};

use crate::types::{Edge, Graph, NodeId, PipelineError};

/// Build a [`Graph`] from incidence data.
///
/// Row `i` of `incidence` describes node `node_names[i]`; column `j`
/// describes edge `edge_names[j]`. A cell equal to `1` marks the row's
/// node as an endpoint of the column's edge; any other cell value marks
/// nothing. A well-formed column marks exactly two endpoints and
/// becomes one undirected edge carrying the weight registered under the
/// column's name in `weights`.
///
/// Columns that describe the same unordered node pair collapse into a
/// single edge. The first such column wins and keeps its weight; later
/// duplicates are dropped after their own validation.
///
/// # Errors
///
/// - [`PipelineError::ShapeMismatch`] when the row count differs from
///   the node count, or any row's width differs from the edge count.
/// - [`PipelineError::MalformedEdgeColumn`] when a column marks fewer
///   or more than two endpoints.
/// - [`PipelineError::UnknownEdgeWeight`] when a column's name has no
///   entry in `weights`.
pub fn build_graph(
    node_names: &[NodeId],
    edge_names: &[String],
    incidence: &[Vec<u8>],
    weights: &HashMap<String, f64>,
) -> Result<Graph, PipelineError> {
    if incidence.len() != node_names.len() {
        return Err(PipelineError::ShapeMismatch(format!(
            "{} matrix rows for {} nodes",
            incidence.len(),
            node_names.len(),
        )));
    }
    for (i, row) in incidence.iter().enumerate() {
        if row.len() != edge_names.len() {
            return Err(PipelineError::ShapeMismatch(format!(
                "row {i} has {} columns for {} edges",
                row.len(),
                edge_names.len(),
            )));
        }
    }

    let mut edges = Vec::with_capacity(edge_names.len());
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::with_capacity(edge_names.len());

    for (j, name) in edge_names.iter().enumerate() {
        let marked: Vec<usize> = (0..node_names.len())
            .filter(|&i| incidence[i][j] == 1)
            .collect();

        let &[u, v] = marked.as_slice() else {
            return Err(PipelineError::MalformedEdgeColumn {
                column: name.clone(),
                endpoints: marked.len(),
            });
        };

        let Some(&weight) = weights.get(name) else {
            return Err(PipelineError::UnknownEdgeWeight(name.clone()));
        };

        let edge = Edge::new(node_names[u].clone(), node_names[v].clone(), weight);
        if seen.insert((edge.a().clone(), edge.b().clone())) {
            edges.push(edge);
        }
    }

    Ok(Graph::new(node_names.to_vec(), edges))
}
