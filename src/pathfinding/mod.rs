mod bidirectional;
mod format;

pub use format::FormattedPath;

use crate::engine_config::EngineConfig;
use crate::graph::CompactGraph;
use crate::lookup::LookupIndex;
use serde::Serialize;

/// Outcome of a shortest-path query. Every condition is a value; the query
/// path never returns an `Err` or panics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSearchResult {
    Paths(Vec<FormattedPath>),
    InvalidIds,
    UnknownEndpoint,
    NoPathFound,
}

impl PathSearchResult {
    /// The sentinel string consumers display for non-path outcomes.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Paths(_) => None,
            Self::InvalidIds => Some("Invalid IDs."),
            Self::UnknownEndpoint => Some("One or both IDs do not exist."),
            Self::NoPathFound => Some("No path found."),
        }
    }
}

/// Finds up to `max_paths` shortest paths between two person IDs using
/// level-synchronized bidirectional BFS. Each distinct meeting node at the
/// terminating level contributes one path; all returned paths have the
/// same minimal length.
pub fn find_shortest_paths(
    graph: &CompactGraph,
    index: &LookupIndex,
    start_id: &str,
    end_id: &str,
    max_paths: usize,
    config: &EngineConfig,
) -> PathSearchResult {
    if start_id.trim().is_empty() || end_id.trim().is_empty() {
        return PathSearchResult::InvalidIds;
    }

    let (Some(start), Some(end)) = (index.person(start_id), index.person(end_id)) else {
        return PathSearchResult::UnknownEndpoint;
    };

    if start == end {
        return PathSearchResult::Paths(vec![format::format_path(graph, &[start])]);
    }

    let max_paths = max_paths.max(1);
    match bidirectional::search(graph, start, end, max_paths, config) {
        Some(node_paths) => {
            let formatted = node_paths
                .iter()
                .map(|nodes| format::format_path(graph, nodes))
                .collect();
            PathSearchResult::Paths(formatted)
        }
        None => PathSearchResult::NoPathFound,
    }
}
