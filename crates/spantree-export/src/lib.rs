//! spantree-export: Pure format serializers (sans-IO)
//!
//! Converts pipeline results into output documents. Currently supports
//! the JSON response document, the `{name, children}` hierarchy form
//! consumed by tree renderers, and Graphviz DOT.

pub mod dot;
pub mod hierarchy;
pub mod json;

pub use dot::{forest_to_dot, tree_to_dot};
pub use hierarchy::{HierarchyNode, to_hierarchy, to_hierarchy_json};
pub use json::{ResponseDocument, to_json, to_json_pretty};
