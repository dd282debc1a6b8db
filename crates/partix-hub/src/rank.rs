//! Rank - one worker process and the particles it holds

use partix_core::Population;
use serde::{Deserialize, Serialize};

/// Identifier of a rank within a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RankId(pub usize);

impl std::fmt::Display for RankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rank({})", self.0)
    }
}

/// One worker: an id and its owned + ghost particles
#[derive(Debug, Clone)]
pub struct Rank {
    pub id: RankId,
    pub population: Population,
}

impl Rank {
    pub fn new(id: RankId) -> Self {
        Self {
            id,
            population: Population::new(),
        }
    }

    /// Rank 0 reports on behalf of the cluster
    pub fn is_root(&self) -> bool {
        self.id.0 == 0
    }
}
