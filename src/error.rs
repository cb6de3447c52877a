use std::path::PathBuf;
use thiserror::Error;

/// Fatal startup errors: the engine cannot initialize and must not serve
/// queries. Everything recoverable (bad snapshot, malformed rows) is
/// handled internally and never reaches this type.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cast file not found: {0}")]
    MissingSource(PathBuf),

    #[error("failed to read cast data: {0}")]
    Io(#[from] std::io::Error),
}

/// Snapshot load failures. Always recoverable: the caller logs the error
/// and rebuilds the graph from source.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a graph snapshot (bad magic)")]
    BadMagic,

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("snapshot string is not valid UTF-8")]
    InvalidString(#[from] std::string::FromUtf8Error),

    #[error("snapshot references out-of-range index {index} (count {count})")]
    IndexOutOfRange { index: u32, count: usize },
}
