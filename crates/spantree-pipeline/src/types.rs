//! Shared types for the spantree graph processing pipeline.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::PipelineDiagnostics;

/// Identifier of a graph node: either a number or a name.
///
/// Serializes untagged, so `7` and `"seven"` are both valid node ids in
/// request and response documents. Numeric ids must be integers.
///
/// The derived ordering is total: numbers order numerically, names order
/// lexicographically, and every number orders before every name. The
/// binary-tree encoder relies on this ordering to place children
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    /// Numeric identifier.
    Number(i64),
    /// String identifier.
    Name(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

/// A weighted undirected edge between two distinct nodes.
///
/// Endpoints are stored in ascending [`NodeId`] order, so two edges
/// built from the same unordered pair compare equal regardless of the
/// order their endpoints were given in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    a: NodeId,
    b: NodeId,
    weight: f64,
}

impl Edge {
    /// Create a new edge. Endpoints are swapped into ascending order.
    #[must_use]
    pub fn new(u: NodeId, v: NodeId, weight: f64) -> Self {
        if v < u {
            Self { a: v, b: u, weight }
        } else {
            Self { a: u, b: v, weight }
        }
    }

    /// The lesser endpoint.
    #[must_use]
    pub const fn a(&self) -> &NodeId {
        &self.a
    }

    /// The greater endpoint.
    #[must_use]
    pub const fn b(&self) -> &NodeId {
        &self.b
    }

    /// The edge weight.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Both endpoints, lesser first.
    #[must_use]
    pub const fn endpoints(&self) -> (&NodeId, &NodeId) {
        (&self.a, &self.b)
    }
}

/// Serde-compatible proxy for `Edge`.
///
/// Deserialization goes through [`Edge::new`] so the ascending-endpoint
/// invariant holds even for documents that stored the pair reversed.
#[derive(Deserialize)]
struct EdgeProxy {
    a: NodeId,
    b: NodeId,
    weight: f64,
}

impl<'de> Deserialize<'de> for Edge {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let proxy = EdgeProxy::deserialize(deserializer)?;
        Ok(Self::new(proxy.a, proxy.b, proxy.weight))
    }
}

/// A weighted undirected graph: the declared node set plus its
/// deduplicated edges.
///
/// Produced by [`build_graph`](crate::incidence::build_graph), which
/// guarantees that every edge endpoint is a declared node and that no
/// two edges cover the same unordered node pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create a graph from its parts. Edge endpoints are expected to
    /// refer to `nodes`.
    #[must_use]
    pub const fn new(nodes: Vec<NodeId>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// The declared nodes, in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The deduplicated edges, in first-seen column order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of declared nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// The edges accepted by the minimum-spanning-forest stage, in
/// acceptance (ascending weight) order.
///
/// For a connected input this is a spanning tree; for a disconnected
/// input it is one spanning tree per connected component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningForest(Vec<Edge>);

impl SpanningForest {
    /// Create a new forest from a vector of edges.
    #[must_use]
    pub const fn new(edges: Vec<Edge>) -> Self {
        Self(edges)
    }

    /// Returns `true` if the forest has no edges.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of edges in the forest.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all edges.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.0
    }

    /// Consumes the forest and returns the underlying vector of edges.
    #[must_use]
    pub fn into_edges(self) -> Vec<Edge> {
        self.0
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.0.iter().map(Edge::weight).sum()
    }
}

/// A node of the binary re-encoding of the spanning forest.
///
/// Serializes as nested `{"value", "left", "right"}` objects with
/// `null` for absent children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// The graph node this tree node carries.
    pub value: NodeId,
    /// Left child, if any.
    pub left: Option<Box<TreeNode>>,
    /// Right child, if any.
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// Create a leaf node with no children.
    #[must_use]
    pub const fn leaf(value: NodeId) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// In-order traversal: left subtree, then this node, then right
    /// subtree.
    #[must_use]
    pub fn in_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.node_count());
        self.walk_in_order(&mut out);
        out
    }

    fn walk_in_order(&self, out: &mut Vec<NodeId>) {
        if let Some(left) = &self.left {
            left.walk_in_order(out);
        }
        out.push(self.value.clone());
        if let Some(right) = &self.right {
            right.walk_in_order(out);
        }
    }

    /// Number of nodes in this subtree, including this node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.left.as_deref().map_or(0, Self::node_count)
            + self.right.as_deref().map_or(0, Self::node_count)
    }

    /// Height of this subtree, counted in nodes along the longest
    /// root-to-leaf path. A leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let left = self.left.as_deref().map_or(0, Self::depth);
        let right = self.right.as_deref().map_or(0, Self::depth);
        1 + left.max(right)
    }
}

/// A single structured request for the full pipeline.
///
/// `incidence_matrix` rows align with `node_names` and columns align
/// with `edge_names`; a cell equal to `1` marks the row's node as an
/// endpoint of the column's edge. `weights` maps edge names to weights
/// and may omit names that never appear in `edge_names`. `root` selects
/// the binary-tree root; when absent the first declared node is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineRequest {
    /// Declared nodes, in declaration order.
    pub node_names: Vec<NodeId>,

    /// Edge column names, in column order.
    pub edge_names: Vec<String>,

    /// Node-by-edge incidence matrix. Cells other than `1` mark nothing.
    pub incidence_matrix: Vec<Vec<u8>>,

    /// Weight for each edge name referenced by a column.
    #[serde(default)]
    pub weights: HashMap<String, f64>,

    /// Root node for the binary encoding.
    #[serde(default)]
    pub root: Option<NodeId>,
}

/// Result of running the full pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// The minimum spanning forest, edges in acceptance order.
    pub mst: SpanningForest,

    /// The binary re-encoding of the forest, rooted at the requested
    /// node. `None` only for an empty node set.
    pub binary_tree: Option<TreeNode>,

    /// In-order linearization of `binary_tree`. Empty when the tree is
    /// `None`.
    pub in_order: Vec<NodeId>,
}

/// Result of running the pipeline with all intermediate stage outputs
/// preserved.
///
/// Each field captures the output of one pipeline stage, plus per-stage
/// diagnostics, so callers can inspect or report what each step did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedResult {
    /// Stage 1: the deduplicated graph built from the incidence matrix.
    pub graph: Graph,
    /// Stage 2: the minimum spanning forest.
    pub mst: SpanningForest,
    /// Stage 3: the binary re-encoding of the forest.
    pub binary_tree: Option<TreeNode>,
    /// Stage 3: in-order linearization of the binary tree.
    pub in_order: Vec<NodeId>,
    /// Per-stage timing and counters.
    pub diagnostics: PipelineDiagnostics,
}

impl StagedResult {
    /// The final outputs without the intermediates.
    #[must_use]
    pub fn to_result(&self) -> ProcessResult {
        ProcessResult {
            mst: self.mst.clone(),
            binary_tree: self.binary_tree.clone(),
            in_order: self.in_order.clone(),
        }
    }
}

/// Errors that can occur during pipeline processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The incidence matrix dimensions disagree with the declared node
    /// or edge counts.
    #[error("incidence matrix shape mismatch: {0}")]
    ShapeMismatch(String),

    /// An edge column has no entry in the weight mapping.
    #[error("no weight for edge column {0:?}")]
    UnknownEdgeWeight(String),

    /// An incidence column marks a number of endpoints other than two.
    #[error("edge column {column:?} marks {endpoints} endpoints, expected exactly 2")]
    MalformedEdgeColumn {
        /// Name of the offending column.
        column: String,
        /// Number of endpoints the column marked.
        endpoints: usize,
    },

    /// The requested root is not a declared node.
    #[error("root node {0} is not in the node set")]
    RootNotFound(NodeId),
}
