//! Errors raised while loading snapshots from disk.
//!
//! Domain findings are never errors; see [`crate::ValidationIssue`].

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {what} from {path}: {source}")]
    Parse {
        what: &'static str,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to parse {what}: {source}")]
    ParseStr {
        what: &'static str,
        source: serde_json::Error,
    },
}
