//! JSON response document serializer.
//!
//! Shapes a [`ProcessResult`] into the document a rendering front end
//! consumes: the accepted spanning edges as `[node, node, weight]`
//! triples in acceptance order, the binary tree as nested
//! `{"value", "left", "right"}` objects (`null` for an empty node set),
//! and the in-order node sequence.
//!
//! These are pure functions with no I/O -- they return a `String`.

use serde::{Deserialize, Serialize};

use spantree_pipeline::{NodeId, ProcessResult, TreeNode};

/// The response document for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDocument {
    /// Accepted spanning edges as `[u, v, weight]` triples, in
    /// acceptance order.
    pub mst: Vec<(NodeId, NodeId, f64)>,

    /// Root of the binary re-encoding, or `null` for an empty node set.
    pub binary_tree: Option<TreeNode>,

    /// In-order linearization of `binary_tree`.
    pub in_order: Vec<NodeId>,
}

impl ResponseDocument {
    /// Shape a pipeline result into the response document.
    #[must_use]
    pub fn from_result(result: &ProcessResult) -> Self {
        Self {
            mst: result
                .mst
                .edges()
                .iter()
                .map(|edge| (edge.a().clone(), edge.b().clone(), edge.weight()))
                .collect(),
            binary_tree: result.binary_tree.clone(),
            in_order: result.in_order.clone(),
        }
    }
}

/// Serialize a pipeline result as a compact JSON response document.
///
/// # Examples
///
/// ```
/// use spantree_pipeline::{PipelineRequest, process};
/// use spantree_export::to_json;
///
/// let request = PipelineRequest {
///     node_names: vec!["A".into(), "B".into()],
///     edge_names: vec!["ab".to_string()],
///     incidence_matrix: vec![vec![1], vec![1]],
///     weights: [("ab".to_string(), 1.0)].into_iter().collect(),
///     root: None,
/// };
///
/// let document = to_json(&process(&request)?)?;
/// assert!(document.starts_with("{\"mst\":"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] if serialization fails.
pub fn to_json(result: &ProcessResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ResponseDocument::from_result(result))
}

/// Serialize a pipeline result as a pretty-printed JSON response
/// document.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] if serialization fails.
pub fn to_json_pretty(result: &ProcessResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ResponseDocument::from_result(result))
}
