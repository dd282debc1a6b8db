//! Error types for partix-script

use thiserror::Error;

/// Scenario loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Bonded term owner {0} is not a particle of this scenario")]
    UnknownOwner(u64),

    #[error(transparent)]
    Core(#[from] partix_core::Error),

    #[error(transparent)]
    Hub(#[from] partix_hub::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
