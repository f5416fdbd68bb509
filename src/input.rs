//! Reading graph descriptions and orders for the CLI.

use crate::error::{Error, Result};
use crate::graph::GraphIndex;
use clap::ValueEnum;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Graph description format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Object mapping each item to an array of prerequisites
    Json,
    /// One `item: prereq, prereq` line per item
    Text,
}

impl Format {
    /// Guess the format from a file extension. Anything but `.json` is text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Text,
        }
    }
}

/// Read a whole file, or standard input when `path` is `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(fs::read_to_string(path)?)
}

/// Load a graph, picking the format from the extension unless one is given.
pub fn load_graph(path: &Path, format: Option<Format>) -> Result<GraphIndex<String>> {
    let format = format.unwrap_or_else(|| Format::from_path(path));
    let source = read_source(path)?;
    let graph = parse_graph(&source, format)?;

    debug!(
        path = %path.display(),
        items = graph.len(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

pub fn parse_graph(source: &str, format: Format) -> Result<GraphIndex<String>> {
    match format {
        Format::Json => Ok(serde_json::from_str(source)?),
        Format::Text => parse_text(source),
    }
}

/// Parse the line-based format.
///
/// ```text
/// # comment
/// algorithms: data structures
/// data structures: discrete math
/// calculus
/// ```
///
/// A line without `:` declares an item with no prerequisites.
pub fn parse_text(source: &str) -> Result<GraphIndex<String>> {
    let mut adjacency: Vec<(String, Vec<String>)> = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (name, rest) = line.split_once(':').unwrap_or((line, ""));
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Parse {
                line: index + 1,
                message: "empty item name".to_string(),
            });
        }
        if rest.contains(':') {
            return Err(Error::Parse {
                line: index + 1,
                message: "unexpected ':' in prerequisite list".to_string(),
            });
        }

        let prerequisites = rest
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        adjacency.push((name.to_string(), prerequisites));
    }

    Ok(GraphIndex::from_adjacency(adjacency))
}

/// Parse an order listing: one item per line, blank lines ignored.
pub fn parse_order(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
