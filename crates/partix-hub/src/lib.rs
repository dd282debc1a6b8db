//! Partix Hub - Rank-partitioned particle population
//!
//! This crate models the distributed runtime that the mutation engine runs
//! inside of, entirely in-process:
//!
//! ```text
//! Cluster (owns cell, schema, groups, regions)
//!  │
//!  ├── PartitionStrategy ← decides which rank owns which particle
//!  │
//!  └── Rank[]
//!       └── Population (owned particles + ghost replicas)
//! ```
//!
//! ## Key Components
//!
//! - [`Cluster`]: Owns all ranks and the state they share
//! - [`Rank`]: One worker and its [`partix_core::Population`]
//! - [`PartitionStrategy`]: Deterministic particle-to-rank assignment
//! - [`all_reduce_sum`]: Collective sum over per-rank counters
//!
//! ## Boundary operations
//!
//! [`Cluster::synchronize`] runs the full sequence required before
//! adjacency-dependent edits: re-initialization hooks, periodic wrapping,
//! migration of particles to their owners, and ghost construction.

mod cluster;
mod comm;
mod config;
mod error;
pub mod partition;
mod rank;

pub use cluster::{Cluster, Context, InitHook};
pub use comm::all_reduce_sum;
pub use config::ClusterConfig;
pub use error::{Error, Result};
pub use partition::PartitionStrategy;
pub use rank::{Rank, RankId};
