use crate::builder::build_from_cast_file;
use crate::engine_config::EngineConfig;
use crate::error::EngineError;
use crate::graph::{CompactGraph, GraphStats};
use crate::lookup::LookupIndex;
use crate::pathfinding::{self, PathSearchResult};
use crate::search;
use crate::snapshot;
use serde::Serialize;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use tracing::{info, warn};

/// Point-in-time view of the build status, exposed to callers polling
/// readiness while the graph is still being constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatus {
    pub building: bool,
    pub message: String,
}

/// Shared build-status flag. Hand a clone of the `Arc` to whatever serves
/// status requests before `Engine::init_with_status` returns.
#[derive(Debug, Default)]
pub struct BuildStatus {
    building: AtomicBool,
    message: Mutex<String>,
}

impl BuildStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_building(&self) -> bool {
        self.building.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> EngineStatus {
        EngineStatus {
            building: self.is_building(),
            message: self.message.lock().expect("status lock poisoned").clone(),
        }
    }

    fn update(&self, building: bool, message: &str) {
        *self.message.lock().expect("status lock poisoned") = message.to_string();
        self.building.store(building, Ordering::Release);
    }
}

/// The query engine: a read-only compact graph plus its lookup index.
/// Immutable after `init`, so one instance can serve any number of
/// concurrent queries without locking.
pub struct Engine {
    graph: CompactGraph,
    index: LookupIndex,
    config: EngineConfig,
    status: Arc<BuildStatus>,
}

impl Engine {
    /// Loads the graph from the snapshot cache or builds it from source,
    /// synchronously. Fails only when the source file is missing and no
    /// usable snapshot exists.
    pub fn init(config: EngineConfig) -> Result<Self, EngineError> {
        Self::init_with_status(config, Arc::new(BuildStatus::new()))
    }

    pub fn init_with_status(
        config: EngineConfig,
        status: Arc<BuildStatus>,
    ) -> Result<Self, EngineError> {
        status.update(true, "Loading graph");

        let graph = match load_or_build(&config, &status) {
            Ok(graph) => graph,
            Err(e) => {
                status.update(false, "Failed");
                return Err(e);
            }
        };
        let index = LookupIndex::build(&graph);

        let stats = graph.stats();
        info!(
            persons = stats.persons,
            titles = stats.titles,
            edges = stats.edges,
            "engine ready"
        );
        status.update(false, "Done");

        Ok(Self {
            graph,
            index,
            config,
            status,
        })
    }

    pub fn status(&self) -> EngineStatus {
        self.status.snapshot()
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }

    pub fn graph(&self) -> &CompactGraph {
        &self.graph
    }

    /// See `pathfinding::find_shortest_paths`. An `Engine` only exists
    /// once init has finished, so queries can never race the build; during
    /// the build window callers hold only the shared `BuildStatus` handle.
    pub fn find_shortest_paths(
        &self,
        start_id: &str,
        end_id: &str,
        max_paths: usize,
    ) -> PathSearchResult {
        pathfinding::find_shortest_paths(
            &self.graph,
            &self.index,
            start_id,
            end_id,
            max_paths,
            &self.config,
        )
    }

    pub fn search_names(&self, query: &str, max_results: usize) -> Vec<(String, String)> {
        search::search_names(&self.graph, query, max_results)
    }
}

/// An existing snapshot is trusted unconditionally (no mtime comparison
/// against the source); any load failure or staleness falls through to a
/// full rebuild.
fn load_or_build(
    config: &EngineConfig,
    status: &BuildStatus,
) -> Result<CompactGraph, EngineError> {
    if let Some(cache_path) = &config.cache_path
        && cache_path.is_file()
    {
        status.update(true, "Loading cached graph");
        match snapshot::load(cache_path) {
            Ok(graph) if snapshot::looks_stale(&graph) => {
                warn!(
                    path = %cache_path.display(),
                    "snapshot predates the current builder, rebuilding"
                );
            }
            Ok(graph) => {
                info!(path = %cache_path.display(), "loaded graph from snapshot");
                return Ok(graph);
            }
            Err(e) => {
                warn!(path = %cache_path.display(), error = %e, "unusable snapshot, rebuilding");
            }
        }
    }

    status.update(true, "Building graph from cast data");
    let graph = build_from_cast_file(&config.cast_path)?;

    if let Some(cache_path) = &config.cache_path
        && let Err(e) = snapshot::save(&graph, cache_path)
    {
        // Save failures are non-fatal; the next start rebuilds again.
        warn!(path = %cache_path.display(), error = %e, "failed to save snapshot");
    }

    Ok(graph)
}
