//! Partition strategies for distributing particles across ranks
//!
//! Assignment is a pure function of the particle and the cell, so the same
//! configuration always yields the same ownership layout.
//!
//! # Strategies
//!
//! - [`PartitionStrategy::SpatialSlabs`]: equal-width slabs of the cell along one axis
//! - [`PartitionStrategy::ById`]: round-robin by entity id
//! - [`PartitionStrategy::Custom`]: user-defined assignment (e.g. to emulate load balancing)
//!
//! # Example
//!
//! ```
//! use partix_hub::partition::PartitionStrategy;
//! use partix_core::{Axis, Domain, Particle};
//!
//! let domain = Domain::new([0.0; 3], [10.0; 3]);
//! let strategy = PartitionStrategy::slabs(Axis::X);
//!
//! let p = Particle::new(1, 1, [7.5, 0.0, 0.0]);
//! assert_eq!(strategy.assign_rank(&p, Some(&domain), 4), 3);
//! ```

use partix_core::{Axis, Domain, Particle};
use std::sync::Arc;

/// Type alias for the custom partitioner function
pub type PartitionFn = Arc<dyn Fn(&Particle) -> usize + Send + Sync>;

/// Strategy for assigning particles to ranks
#[derive(Clone)]
pub enum PartitionStrategy {
    /// Equal-width slabs of the cell along `axis`
    ///
    /// ```text
    /// ┌────┬────┬────┬────┐
    /// │ R0 │ R1 │ R2 │ R3 │   (axis = X, 4 ranks)
    /// └────┴────┴────┴────┘
    /// ```
    ///
    /// Falls back to [`PartitionStrategy::ById`] when no cell is defined.
    SpatialSlabs { axis: Axis },

    /// Round-robin by entity id: `rank = id % rank_count`
    ById,

    /// Custom assignment; the result is taken modulo the rank count
    Custom(PartitionFn),
}

impl Default for PartitionStrategy {
    fn default() -> Self {
        PartitionStrategy::SpatialSlabs { axis: Axis::X }
    }
}

impl PartitionStrategy {
    pub fn slabs(axis: Axis) -> Self {
        PartitionStrategy::SpatialSlabs { axis }
    }

    pub fn by_id() -> Self {
        PartitionStrategy::ById
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Particle) -> usize + Send + Sync + 'static,
    {
        PartitionStrategy::Custom(Arc::new(f))
    }

    /// Rank index in `0..rank_count` that owns `particle`
    ///
    /// # Panics
    ///
    /// Panics if `rank_count` is 0.
    pub fn assign_rank(&self, particle: &Particle, domain: Option<&Domain>, rank_count: usize) -> usize {
        assert!(rank_count > 0, "rank_count must be at least 1");

        match (self, domain) {
            (PartitionStrategy::SpatialSlabs { axis }, Some(domain)) => {
                let d = axis.index();
                let len = domain.length(d);
                if len <= 0.0 {
                    return 0;
                }
                let frac = (particle.x[d] - domain.lo[d]) / len;
                // particles outside a non-periodic cell go to the nearest slab
                let slab = (frac * rank_count as f64).floor();
                slab.clamp(0.0, (rank_count - 1) as f64) as usize
            }
            (PartitionStrategy::SpatialSlabs { .. }, None) | (PartitionStrategy::ById, _) => {
                (particle.id.raw() % rank_count as u64) as usize
            }
            (PartitionStrategy::Custom(f), _) => f(particle) % rank_count,
        }
    }
}

impl std::fmt::Debug for PartitionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartitionStrategy::SpatialSlabs { axis } => f
                .debug_struct("PartitionStrategy::SpatialSlabs")
                .field("axis", axis)
                .finish(),
            PartitionStrategy::ById => write!(f, "PartitionStrategy::ById"),
            PartitionStrategy::Custom(_) => write!(f, "PartitionStrategy::Custom(...)"),
        }
    }
}
