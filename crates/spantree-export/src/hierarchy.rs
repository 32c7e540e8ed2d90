//! Hierarchy document serializer.
//!
//! Re-shapes the binary tree into the recursive `{name, children}` form
//! hierarchical renderers (d3's tree layout among them) consume. The
//! left child precedes the right child in `children`, and the
//! `children` key is omitted for leaves.
//!
//! These are pure functions with no I/O -- they return a `String`.

use serde::{Deserialize, Serialize};

use spantree_pipeline::{NodeId, TreeNode};

/// One node of the `{name, children}` hierarchy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// The graph node this hierarchy node carries.
    pub name: NodeId,

    /// Child nodes, left before right. Empty for leaves and omitted
    /// from the serialized form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode>,
}

/// Re-shape a binary tree into its hierarchy document form.
#[must_use]
pub fn to_hierarchy(tree: &TreeNode) -> HierarchyNode {
    let mut children = Vec::new();
    if let Some(left) = &tree.left {
        children.push(to_hierarchy(left));
    }
    if let Some(right) = &tree.right {
        children.push(to_hierarchy(right));
    }
    HierarchyNode {
        name: tree.value.clone(),
        children,
    }
}

/// Serialize a binary tree as a compact JSON hierarchy document.
///
/// A missing tree (empty node set) serializes as `null`.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] if serialization fails.
pub fn to_hierarchy_json(tree: Option<&TreeNode>) -> Result<String, serde_json::Error> {
    match tree {
        Some(tree) => serde_json::to_string(&to_hierarchy(tree)),
        None => serde_json::to_string(&Option::<HierarchyNode>::None),
    }
}
