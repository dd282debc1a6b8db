//! Cluster configuration - rank count and ghost cutoff

use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::Cluster`]
///
/// # Example
///
/// ```
/// use partix_hub::ClusterConfig;
///
/// let config = ClusterConfig::default();
/// assert!(config.is_single_rank());
///
/// let config = ClusterConfig::with_rank_count(4).with_ghost_cutoff(2.5);
/// assert_eq!(config.rank_count(), 4);
/// assert_eq!(config.ghost_cutoff(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Number of ranks, at least 1
    ranks: usize,
    /// Distance within which remote particles are replicated as ghosts
    ghost_cutoff: f64,
}

impl ClusterConfig {
    /// Create a configuration with the given rank count (clamped to at least 1)
    pub fn with_rank_count(ranks: usize) -> Self {
        Self {
            ranks: ranks.max(1),
            ..Self::default()
        }
    }

    /// Set the ghost cutoff; negative values are treated as zero
    pub fn with_ghost_cutoff(mut self, cutoff: f64) -> Self {
        self.ghost_cutoff = cutoff.max(0.0);
        self
    }

    pub fn rank_count(&self) -> usize {
        self.ranks.max(1)
    }

    pub fn ghost_cutoff(&self) -> f64 {
        self.ghost_cutoff
    }

    pub fn is_single_rank(&self) -> bool {
        self.rank_count() == 1
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            ranks: 1,
            ghost_cutoff: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_rank() {
        let config = ClusterConfig::default();
        assert!(config.is_single_rank());
        assert_eq!(config.ghost_cutoff(), 1.0);
    }

    #[test]
    fn test_rank_count_clamped_minimum() {
        let config = ClusterConfig::with_rank_count(0);
        assert_eq!(config.rank_count(), 1);
    }

    #[test]
    fn test_negative_cutoff() {
        let config = ClusterConfig::default().with_ghost_cutoff(-3.0);
        assert_eq!(config.ghost_cutoff(), 0.0);
    }

    #[test]
    fn test_deserialized_zero_ranks() {
        let config: ClusterConfig = ron::from_str("(ranks: 0)").unwrap();
        assert_eq!(config.rank_count(), 1);
    }
}
