use std::path::PathBuf;

/// Runtime configuration for the engine: data locations and the resource
/// caps that bound every BFS expansion.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Gzip-compressed delimited cast file, one row per title.
    pub cast_path: PathBuf,
    /// Snapshot location; `None` disables caching entirely.
    pub cache_path: Option<PathBuf>,
    /// Abort a search once both sides together have visited this many nodes.
    pub max_visited: usize,
    /// Abort a search once either frontier queue grows past this size.
    pub max_queue: usize,
}

impl EngineConfig {
    pub fn new(cast_path: PathBuf, cache_path: Option<PathBuf>) -> Self {
        Self {
            cast_path,
            cache_path,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let cast_path = std::env::var("CAST_DATA_PATH")
            .unwrap_or_else(|_| "data/cast.csv.gz".to_string());
        let cache_path = std::env::var("GRAPH_CACHE_PATH")
            .unwrap_or_else(|_| "data/graph-cache.bin".to_string());

        Self {
            cast_path: PathBuf::from(cast_path),
            cache_path: Some(PathBuf::from(cache_path)),
            max_visited: read_env_cap("BFS_MAX_VISITED", DEFAULT_MAX_VISITED),
            max_queue: read_env_cap("BFS_MAX_QUEUE", DEFAULT_MAX_QUEUE),
        }
    }
}

const DEFAULT_MAX_VISITED: usize = 5_000_000;
const DEFAULT_MAX_QUEUE: usize = 1_000_000;

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cast_path: PathBuf::from("data/cast.csv.gz"),
            cache_path: Some(PathBuf::from("data/graph-cache.bin")),
            max_visited: DEFAULT_MAX_VISITED,
            max_queue: DEFAULT_MAX_QUEUE,
        }
    }
}

fn read_env_cap(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
