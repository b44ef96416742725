//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for doc-search operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a search index artifact cannot be read or is inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The artifact is not a recognizable script or JSON payload.
    #[error("unrecognized index artifact: {0}")]
    InvalidArtifact(String),
    /// The embedded JSON failed to parse or serialize.
    #[error("malformed index JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A map references a document id outside `docnames`.
    #[error("{field} references document {id}, but only {len} documents exist")]
    DocumentOutOfRange {
        field: &'static str,
        id: usize,
        len: usize,
    },
}

/// Error returned when loading the configuration file fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
