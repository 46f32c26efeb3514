//! Error types for the launch node.

use thiserror::Error;

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the node.
#[derive(Debug, Error)]
pub enum Error {
    /// The operator's own discovery document failed its startup check.
    #[error("root document rejected: {0}")]
    Preflight(#[from] accord_discovery::PreflightError),

    /// A graph rebuild failed.
    #[error(transparent)]
    Graph(#[from] accord_graph::Error),

    /// Cache setup or access failed.
    #[error(transparent)]
    Cache(#[from] accord_cache::Error),

    /// The background rebuild task died.
    #[error("rebuild task failed: {0}")]
    Rebuild(String),
}
