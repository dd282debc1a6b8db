//! Partix Core - Particle population model
//!
//! This crate provides the data model that the attribute-mutation engine
//! reads and overwrites:
//! - Stable entity identifiers (`EntityId`)
//! - Population-level capability flags and declared type counts (`Schema`)
//! - Per-entity particle records with optional shape records and bonded terms
//! - The simulation cell (`Domain`), named groups and named regions
//! - The bounded-range parser used by selection predicates
//! - A position-seeded deterministic RNG
//!
//! ## Ownership
//!
//! A `Population` is the snapshot held by one worker rank: an ordered block of
//! locally-owned particles followed by a trailing block of ghost replicas.
//! Ghosts are read-only; only the local block is ever handed out mutably.

mod bounds;
mod capability;
mod domain;
mod error;
mod group;
mod identity;
mod particle;
mod population;
mod region;
mod rng;
pub mod shape;

pub use bounds::{parse_bounds, BIG};
pub use capability::{Capabilities, PropertySpec, Schema, TypeCounts};
pub use domain::{Dimension, Domain};
pub use error::{Error, Result};
pub use group::{Groups, MAX_GROUPS};
pub use identity::EntityId;
pub use particle::{BondedTerm, Particle, TermKind, Topology};
pub use population::Population;
pub use region::{Axis, Region, RegionShape, Regions, Side};
pub use rng::{hash_seed, Rng};
pub use shape::{ShapeClass, ShapeRecord};
