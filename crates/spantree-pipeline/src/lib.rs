//! spantree-pipeline: Pure graph processing pipeline (sans-IO).
//!
//! Reduces a weighted undirected graph described by an incidence matrix
//! to its minimum spanning forest, then re-encodes the forest as a
//! rooted binary tree:
//! incidence matrix -> graph -> spanning forest -> binary tree.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! request values and returns structured data. File and terminal
//! interaction lives in the `spantree` CLI; response-document
//! serialization lives in `spantree-export`.

use std::time::Instant;

pub mod diagnostics;
pub mod encode;
pub mod incidence;
pub mod mst;
pub mod types;

pub use diagnostics::{PipelineDiagnostics, PipelineSummary, StageDiagnostics, StageMetrics};
pub use encode::encode_binary_tree;
pub use incidence::build_graph;
pub use mst::minimum_spanning_forest;
pub use types::{
    Edge, Graph, NodeId, PipelineError, PipelineRequest, ProcessResult, SpanningForest,
    StagedResult, TreeNode,
};

/// Run the full graph processing pipeline.
///
/// Builds the deduplicated graph described by `request`, reduces it to
/// a minimum spanning forest, and re-encodes the forest as a binary
/// tree with its in-order linearization.
///
/// # Pipeline steps
///
/// 1. Graph construction (incidence validation + deduplication)
/// 2. Minimum spanning forest (Kruskal)
/// 3. Binary-tree encoding + in-order traversal
///
/// # Example
///
/// ```
/// use spantree_pipeline::{PipelineRequest, process};
///
/// let request = PipelineRequest {
///     node_names: vec!["A".into(), "B".into()],
///     edge_names: vec!["ab".to_string()],
///     incidence_matrix: vec![vec![1], vec![1]],
///     weights: [("ab".to_string(), 1.0)].into_iter().collect(),
///     root: None,
/// };
///
/// let result = process(&request)?;
/// assert_eq!(result.in_order.len(), 2);
/// # Ok::<(), spantree_pipeline::PipelineError>(())
/// ```
///
/// # Errors
///
/// Returns [`PipelineError::ShapeMismatch`] if the incidence matrix
/// disagrees with the declared node and edge counts.
/// Returns [`PipelineError::MalformedEdgeColumn`] if a column marks a
/// number of endpoints other than two.
/// Returns [`PipelineError::UnknownEdgeWeight`] if an edge column has
/// no weight entry.
/// Returns [`PipelineError::RootNotFound`] if the requested root is not
/// a declared node.
pub fn process(request: &PipelineRequest) -> Result<ProcessResult, PipelineError> {
    // 1. Graph construction.
    let graph = incidence::build_graph(
        &request.node_names,
        &request.edge_names,
        &request.incidence_matrix,
        &request.weights,
    )?;

    // 2. Minimum spanning forest.
    let forest = mst::minimum_spanning_forest(&graph);

    // 3. Binary-tree encoding + in-order traversal.
    let binary_tree = encode::encode_binary_tree(graph.nodes(), &forest, request.root.as_ref())?;
    let in_order = binary_tree
        .as_ref()
        .map_or_else(Vec::new, TreeNode::in_order);

    Ok(ProcessResult {
        mst: forest,
        binary_tree,
        in_order,
    })
}

/// Run the full pipeline, retaining every stage output and per-stage
/// diagnostics.
///
/// Produces the same final outputs as [`process`] plus the intermediate
/// [`Graph`], timing for each stage, and summary counts.
///
/// # Errors
///
/// Same conditions as [`process`].
pub fn process_staged(request: &PipelineRequest) -> Result<StagedResult, PipelineError> {
    let pipeline_start = Instant::now();

    // 1. Graph construction.
    let stage_start = Instant::now();
    let graph = incidence::build_graph(
        &request.node_names,
        &request.edge_names,
        &request.incidence_matrix,
        &request.weights,
    )?;
    let build_stage = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::Build {
            node_count: graph.node_count(),
            column_count: request.edge_names.len(),
            edge_count: graph.edge_count(),
            duplicate_count: request.edge_names.len() - graph.edge_count(),
        },
    };

    // 2. Minimum spanning forest.
    let stage_start = Instant::now();
    let forest = mst::minimum_spanning_forest(&graph);
    let component_count = graph.node_count() - forest.len();
    let span_stage = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::Span {
            candidate_count: graph.edge_count(),
            accepted_count: forest.len(),
            component_count,
            total_weight: forest.total_weight(),
        },
    };

    // 3. Binary-tree encoding + in-order traversal.
    let stage_start = Instant::now();
    let binary_tree = encode::encode_binary_tree(graph.nodes(), &forest, request.root.as_ref())?;
    let in_order = binary_tree
        .as_ref()
        .map_or_else(Vec::new, TreeNode::in_order);
    let root = request
        .root
        .clone()
        .or_else(|| graph.nodes().first().cloned());
    let encode_stage = StageDiagnostics {
        duration: stage_start.elapsed(),
        metrics: StageMetrics::Encode {
            root,
            placed_count: in_order.len(),
            unplaced_count: graph.node_count() - in_order.len(),
            depth: binary_tree.as_ref().map_or(0, TreeNode::depth),
        },
    };

    let summary = PipelineSummary {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        accepted_edge_count: forest.len(),
        component_count,
        total_weight: forest.total_weight(),
        in_order_len: in_order.len(),
    };

    Ok(StagedResult {
        graph,
        mst: forest,
        binary_tree,
        in_order,
        diagnostics: PipelineDiagnostics {
            build: build_stage,
            span: span_stage,
            encode: encode_stage,
            total_duration: pipeline_start.elapsed(),
            summary,
        },
    })
}
