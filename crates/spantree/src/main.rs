//! spantree: batch CLI for the graph-to-binary-tree pipeline.
//!
//! Reads a JSON request file describing a weighted undirected graph
//! (node names, edge names, incidence matrix, per-edge weights, and an
//! optional root), runs the pipeline, and writes the selected output
//! document to stdout or a file. Per-stage diagnostics are available
//! on stderr.
//!
//! # Usage
//!
//! ```text
//! spantree request.json
//! spantree request.json --format hierarchy
//! spantree request.json --root 7 --format tree-dot --output tree.dot
//! spantree request.json --stats
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use spantree_pipeline::{NodeId, PipelineRequest};

/// Reduce an incidence-matrix graph to its minimum spanning forest and
/// re-encode the forest as a binary tree.
#[derive(Parser)]
#[command(name = "spantree", version)]
struct Cli {
    /// Path to the JSON request file.
    request_path: PathBuf,

    /// Root node for the binary encoding; overrides the request's root.
    ///
    /// An integer token selects a numeric node id, any other token a
    /// string node id.
    #[arg(long)]
    root: Option<String>,

    /// Output document format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Pretty-print the output (json format only).
    #[arg(long)]
    pretty: bool,

    /// Write the document to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a per-stage diagnostics report to stderr.
    #[arg(long)]
    stats: bool,
}

/// Output document selection.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Response document: spanning edges, binary tree, in-order sequence.
    Json,
    /// `{name, children}` hierarchy of the binary tree.
    Hierarchy,
    /// Graphviz DOT rendering of the spanning forest.
    MstDot,
    /// Graphviz DOT rendering of the binary tree.
    TreeDot,
}

/// Interpret a `--root` token: integers become numeric node ids,
/// everything else a string id.
fn parse_root(token: &str) -> NodeId {
    token
        .parse::<i64>()
        .map_or_else(|_| NodeId::from(token), NodeId::Number)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let request_text = match std::fs::read_to_string(&cli.request_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.request_path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut request: PipelineRequest = match serde_json::from_str(&request_text) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error parsing {}: {e}", cli.request_path.display());
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref token) = cli.root {
        request.root = Some(parse_root(token));
    }

    eprintln!(
        "Request: {} ({} nodes, {} edge columns)",
        cli.request_path.display(),
        request.node_names.len(),
        request.edge_names.len(),
    );

    let staged = match spantree_pipeline::process_staged(&request) {
        Ok(staged) => staged,
        Err(e) => {
            eprintln!("Pipeline error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.stats {
        eprintln!("{}", staged.diagnostics.report());
    }

    let result = staged.to_result();
    let document = match cli.format {
        Format::Json => {
            let rendered = if cli.pretty {
                spantree_export::to_json_pretty(&result)
            } else {
                spantree_export::to_json(&result)
            };
            match rendered {
                Ok(document) => document,
                Err(e) => {
                    eprintln!("Error serializing response: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        Format::Hierarchy => {
            match spantree_export::to_hierarchy_json(result.binary_tree.as_ref()) {
                Ok(document) => document,
                Err(e) => {
                    eprintln!("Error serializing hierarchy: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        Format::MstDot => spantree_export::forest_to_dot(&result.mst),
        Format::TreeDot => match result.binary_tree.as_ref() {
            Some(tree) => spantree_export::tree_to_dot(tree),
            None => {
                eprintln!("Error: empty node set has no binary tree to render");
                return ExitCode::FAILURE;
            }
        },
    };

    match cli.output {
        Some(ref path) => {
            if let Err(e) = std::fs::write(path, &document) {
                eprintln!("Error writing {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
            eprintln!("Wrote {} bytes to {}", document.len(), path.display());
        }
        None => println!("{document}"),
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_root_tokens_become_numeric_ids() {
        assert_eq!(parse_root("7"), NodeId::Number(7));
        assert_eq!(parse_root("-3"), NodeId::Number(-3));
    }

    #[test]
    fn other_root_tokens_become_string_ids() {
        assert_eq!(parse_root("hub"), NodeId::from("hub"));
        assert_eq!(parse_root("1.5"), NodeId::from("1.5"));
        assert_eq!(parse_root(""), NodeId::from(""));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "spantree",
            "request.json",
            "--root",
            "7",
            "--format",
            "tree-dot",
            "--pretty",
            "--stats",
        ]);
        assert_eq!(cli.request_path, PathBuf::from("request.json"));
        assert_eq!(cli.root.as_deref(), Some("7"));
        assert!(matches!(cli.format, Format::TreeDot));
        assert!(cli.pretty);
        assert!(cli.stats);
        assert!(cli.output.is_none());
    }
}
