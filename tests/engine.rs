use castpath_core::{BuildStatus, Engine, EngineConfig, EngineError, PathSearchResult};
use std::sync::Arc;
use flate2::{Compression, write::GzEncoder};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_cast_file(path: &Path, rows: &[&str]) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    writeln!(encoder, "movie_id,title,actor_ids,actor_names").unwrap();
    for row in rows {
        writeln!(encoder, "{row}").unwrap();
    }
    encoder.finish().unwrap();
}

fn fixture() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let cast_path = dir.path().join("cast.csv.gz");
    let cache_path = dir.path().join("graph-cache.bin");
    write_cast_file(
        &cast_path,
        &[
            "P1,First,a;b;c,Alice;Bob;Carol",
            "P2,Second,c;d,Carol;Dan",
            "P3,Solo,e,Eve",
            "bad row",
        ],
    );
    (dir, cast_path, cache_path)
}

fn config(cast_path: &Path, cache_path: &Path) -> EngineConfig {
    EngineConfig::new(cast_path.to_path_buf(), Some(cache_path.to_path_buf()))
}

#[test]
fn test_init_builds_and_serves_queries() {
    let (_dir, cast_path, cache_path) = fixture();
    let engine = Engine::init(config(&cast_path, &cache_path)).unwrap();

    let status = engine.status();
    assert!(!status.building);
    assert_eq!(status.message, "Done");

    let stats = engine.stats();
    assert_eq!(stats.persons, 5);
    assert_eq!(stats.titles, 3);
    assert_eq!(stats.edges, 4);

    match engine.find_shortest_paths("a", "d", 5) {
        PathSearchResult::Paths(paths) => {
            assert_eq!(paths.len(), 1);
            assert_eq!(paths[0].display, "Alice -> Carol -> Dan");
        }
        other => panic!("expected paths, got {other:?}"),
    }
}

#[test]
fn test_init_writes_snapshot_and_reloads_from_it() {
    let (_dir, cast_path, cache_path) = fixture();
    let first = Engine::init(config(&cast_path, &cache_path)).unwrap();
    assert!(cache_path.is_file());

    // Remove the source: the second init must come entirely from the cache.
    std::fs::remove_file(&cast_path).unwrap();
    let second = Engine::init(config(&cast_path, &cache_path)).unwrap();

    assert_eq!(second.graph(), first.graph());
    assert!(matches!(
        second.find_shortest_paths("a", "d", 5),
        PathSearchResult::Paths(_)
    ));
}

#[test]
fn test_corrupt_snapshot_triggers_rebuild() {
    let (_dir, cast_path, cache_path) = fixture();
    std::fs::write(&cache_path, b"not a snapshot").unwrap();

    let engine = Engine::init(config(&cast_path, &cache_path)).unwrap();
    assert_eq!(engine.stats().persons, 5);
    // The rebuild also replaced the bad cache file.
    assert!(castpath_core::snapshot::load(&cache_path).is_ok());
}

#[test]
fn test_stale_snapshot_triggers_rebuild() {
    let (_dir, cast_path, cache_path) = fixture();
    let engine = Engine::init(config(&cast_path, &cache_path)).unwrap();

    let mut stale = engine.graph().clone();
    stale.title_names = stale.title_ids.clone();
    castpath_core::snapshot::save(&stale, &cache_path).unwrap();

    let rebuilt = Engine::init(config(&cast_path, &cache_path)).unwrap();
    assert_eq!(rebuilt.graph().title_names[0], "First");
}

#[test]
fn test_missing_source_without_cache_is_fatal() {
    let dir = TempDir::new().unwrap();
    let status = Arc::new(BuildStatus::new());
    let result = Engine::init_with_status(
        config(
            &dir.path().join("missing.csv.gz"),
            &dir.path().join("graph-cache.bin"),
        ),
        status.clone(),
    );
    assert!(matches!(result, Err(EngineError::MissingSource(_))));

    let external = status.snapshot();
    assert!(!external.building);
    assert_eq!(external.message, "Failed");
}

#[test]
fn test_shared_status_handle_reports_done_after_init() {
    let (_dir, cast_path, cache_path) = fixture();
    let status = Arc::new(BuildStatus::new());
    let engine =
        Engine::init_with_status(config(&cast_path, &cache_path), status.clone()).unwrap();

    // The external handle and the engine agree once init returns, and
    // queries are served immediately, never refused.
    let external = status.snapshot();
    assert!(!external.building);
    assert_eq!(external.message, "Done");
    assert!(matches!(
        engine.find_shortest_paths("a", "d", 5),
        PathSearchResult::Paths(_)
    ));
    assert_eq!(engine.search_names("alice", 5).len(), 1);
}

#[test]
fn test_cache_disabled() {
    let (_dir, cast_path, cache_path) = fixture();
    let engine = Engine::init(EngineConfig::new(cast_path, None)).unwrap();

    assert_eq!(engine.stats().persons, 5);
    assert!(!cache_path.exists());
}

#[test]
fn test_engine_name_search() {
    let (_dir, cast_path, cache_path) = fixture();
    let engine = Engine::init(config(&cast_path, &cache_path)).unwrap();

    let results = engine.search_names("car", 10);
    assert_eq!(results, vec![("c".to_string(), "Carol".to_string())]);
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let (_dir, cast_path, cache_path) = fixture();
    let engine = std::sync::Arc::new(Engine::init(config(&cast_path, &cache_path)).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    assert!(matches!(
                        engine.find_shortest_paths("a", "d", 5),
                        PathSearchResult::Paths(_)
                    ));
                    assert_eq!(engine.search_names("bob", 5).len(), 1);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_malformed_rows_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let cast_path = dir.path().join("cast.csv.gz");
    write_cast_file(
        &cast_path,
        &["garbage", "P1,First,a;b,Alice;Bob", "also,garbage"],
    );

    let engine = Engine::init(EngineConfig::new(cast_path, None)).unwrap();
    assert_eq!(engine.stats().persons, 2);
    assert_eq!(engine.stats().edges, 1);
}
