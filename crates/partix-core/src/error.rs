//! Error types for partix-core

use crate::{EntityId, ShapeClass};
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid range: {0:?}")]
    InvalidRange(String),

    #[error("Numeric index {spec:?} is out of bounds [1, {max}]")]
    OutOfBounds { spec: String, max: i64 },

    #[error("Per-entity property not found: {0}")]
    PropertyNotFound(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Region not found: {0}")]
    RegionNotFound(String),

    #[error("Too many groups (limit {0})")]
    TooManyGroups(usize),

    #[error("Duplicate entity: {0}")]
    DuplicateEntity(EntityId),

    #[error("Entity {id} is not a {expected} particle")]
    MissingShape { id: EntityId, expected: ShapeClass },

    #[error("Entity {id} already carries a {current} shape record")]
    ShapeConflict { id: EntityId, current: ShapeClass },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
