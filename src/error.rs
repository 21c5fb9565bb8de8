use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the open protocol.
///
/// Every variant carries the path it failed on so callers can report a
/// diagnosable reason without extra context.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The input path (or `file://` URI) could not be resolved to an
    /// existing, readable file.
    #[error("cannot resolve path '{path}': {reason}")]
    PathResolution { path: String, reason: String },

    /// The file exists but could not be opened or memory-mapped.
    #[error("cannot map '{}': {source}", path.display())]
    Map {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Exhaustive probing found no backend willing to take the file.
    ///
    /// This is the only failure surfaced once the file is mapped; individual
    /// backend rejections along the way are normal negative outcomes.
    #[error("no registered backend accepts '{}'", path.display())]
    NoMatchingBackend { path: PathBuf },
}

/// A backend's init capability rejected the file.
///
/// This is an expected outcome during dispatch, not an exceptional one:
/// the dispatcher handles it by moving on to the next backend.
#[derive(Debug, Clone, Error)]
#[error("backend '{backend}' rejected the file: {reason}")]
pub struct BackendInitError {
    /// Name of the backend that rejected the file.
    pub backend: &'static str,
    /// Why the file's content did not satisfy the backend.
    pub reason: String,
}

impl BackendInitError {
    pub fn new(backend: &'static str, reason: impl Into<String>) -> Self {
        Self {
            backend,
            reason: reason.into(),
        }
    }
}
