use std::path::PathBuf;

/// Errors produced by the storefront core.
///
/// Cart mutations never surface these: storage and snapshot failures are
/// logged by the store and swallowed. They reach callers only from the
/// lower-level building blocks (storage, snapshot codec, catalog, config).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid cart snapshot: {0}")]
    Snapshot(String),

    #[error("storage error for key {key:?}: {message}")]
    Storage { key: String, message: String },

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}
