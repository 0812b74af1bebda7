//! Solver error types.

use std::collections::TryReserveError;

/// Errors that abort a solve or solver setup.
#[derive(thiserror::Error, Debug)]
pub enum SolverError {
    /// Transposition table allocation failed
    #[error("failed to allocate transposition table of {slots} slots: {source}")]
    CacheAlloc {
        slots: usize,
        #[source]
        source: TryReserveError,
    },

    /// Invalid solver configuration
    #[error("invalid solver configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// File I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;
