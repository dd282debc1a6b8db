//! Identity types for particles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, globally-unique identifier of a particle
///
/// Identifiers survive migration between ranks; array indices do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create a new entity ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Check whether the ID lies in the inclusive range `[lo, hi]`
    pub fn in_range(&self, lo: i64, hi: i64) -> bool {
        let id = self.0 as i128;
        id >= lo as i128 && id <= hi as i128
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "atom:{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id() {
        let id = EntityId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "atom:42");
    }

    #[test]
    fn test_in_range() {
        let id = EntityId::new(5);
        assert!(id.in_range(3, 5));
        assert!(id.in_range(5, 5));
        assert!(!id.in_range(6, 10));
        assert!(!id.in_range(1, 4));
    }
}
