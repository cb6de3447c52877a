pub mod builder;
pub mod engine;
pub mod engine_config;
pub mod error;
pub mod graph;
pub mod lookup;
pub mod parsing;
pub mod pathfinding;
pub mod search;
pub mod snapshot;

// Re-export commonly used items
pub use builder::{GraphBuilder, build_from_cast_file};
pub use engine::{BuildStatus, Engine, EngineStatus};
pub use engine_config::EngineConfig;
pub use error::{EngineError, SnapshotError};
pub use graph::{CompactGraph, GraphStats};
pub use lookup::LookupIndex;
pub use parsing::{CastRow, parse_cast_row, parse_delimited_line, split_id_list};
pub use pathfinding::{FormattedPath, PathSearchResult, find_shortest_paths};
pub use search::search_names;
