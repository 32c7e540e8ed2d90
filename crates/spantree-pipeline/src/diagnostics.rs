//! Pipeline diagnostics: timing, counts, and other metrics for each stage.
//!
//! These diagnostics are permanent instrumentation intended for sizing
//! inputs and spotting degenerate graphs. Every call to
//! [`process_staged`](crate::process_staged) collects diagnostics
//! alongside the pipeline results.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single pipeline run.
///
/// Each field captures metrics for one stage of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDiagnostics {
    /// Stage 1: graph construction from the incidence matrix.
    pub build: StageDiagnostics,
    /// Stage 2: minimum spanning forest.
    pub span: StageDiagnostics,
    /// Stage 3: binary-tree encoding and in-order linearization.
    pub encode: StageDiagnostics,
    /// Total wall-clock duration of the entire pipeline (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across all stages.
    pub summary: PipelineSummary,
}

/// Diagnostics for a single pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics (counts, weights, etc.).
    pub metrics: StageMetrics,
}

/// Stage-specific metrics that vary by pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Graph construction metrics.
    Build {
        /// Number of declared nodes.
        node_count: usize,
        /// Number of incidence columns.
        column_count: usize,
        /// Number of edges after deduplication.
        edge_count: usize,
        /// Number of columns dropped as duplicates.
        duplicate_count: usize,
    },
    /// Minimum spanning forest metrics.
    Span {
        /// Number of candidate edges considered.
        candidate_count: usize,
        /// Number of edges accepted into the forest.
        accepted_count: usize,
        /// Number of connected components spanned.
        component_count: usize,
        /// Total weight of the accepted edges.
        total_weight: f64,
    },
    /// Binary-tree encoding metrics.
    Encode {
        /// The root the tree was built from, if any node existed.
        root: Option<NodeId>,
        /// Number of nodes placed in the tree.
        placed_count: usize,
        /// Number of declared nodes the tree does not reach.
        unplaced_count: usize,
        /// Height of the tree in nodes (0 for no tree).
        depth: usize,
    },
}

/// High-level summary counts for the entire pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Number of declared nodes.
    pub node_count: usize,
    /// Number of deduplicated edges in the graph.
    pub edge_count: usize,
    /// Number of edges accepted into the spanning forest.
    pub accepted_edge_count: usize,
    /// Number of connected components.
    pub component_count: usize,
    /// Total weight of the spanning forest.
    pub total_weight: f64,
    /// Length of the in-order sequence.
    pub in_order_len: usize,
}

impl PipelineDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Pipeline Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Graph: {} nodes, {} edges, {} components",
            self.summary.node_count, self.summary.edge_count, self.summary.component_count,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        // Per-stage breakdown.
        lines.push(format!(
            "{:<18} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(72));

        let total_ms = duration_ms(self.total_duration);
        let stages = [
            ("Build Graph", &self.build),
            ("Spanning Forest", &self.span),
            ("Encode Tree", &self.encode),
        ];

        for (name, diag) in stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<18} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "Forest weight: {:.3}  |  In-order nodes: {}",
            self.summary.total_weight, self.summary.in_order_len,
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Build {
            node_count,
            column_count,
            edge_count,
            duplicate_count,
        } => {
            format!(
                "{node_count} nodes, {column_count} columns -> {edge_count} edges (dupes={duplicate_count})",
            )
        }
        StageMetrics::Span {
            candidate_count,
            accepted_count,
            component_count,
            total_weight,
        } => {
            format!(
                "{accepted_count}/{candidate_count} edges, {component_count} components, weight={total_weight:.3}",
            )
        }
        StageMetrics::Encode {
            root,
            placed_count,
            unplaced_count,
            depth,
        } => {
            let root = root
                .as_ref()
                .map_or_else(|| "none".to_string(), ToString::to_string);
            format!("root={root} placed={placed_count} unplaced={unplaced_count} depth={depth}")
        }
    }
}
