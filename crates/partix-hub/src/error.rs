//! Error types for partix-hub

use thiserror::Error;

/// Result type for partix-hub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in partix-hub
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Boundary operations need a simulation cell
    #[error("simulation cell is not defined")]
    NoDomain,

    /// Rank index out of range
    #[error("rank {0} does not exist")]
    RankNotFound(crate::RankId),

    /// Core error
    #[error("core error: {0}")]
    Core(#[from] partix_core::Error),
}
