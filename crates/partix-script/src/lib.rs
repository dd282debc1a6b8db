//! Partix Script - RON scenario loader
//!
//! A scenario file declares everything needed to stand up a [`Cluster`]:
//! - the simulation cell and rank layout
//! - capability flags, type counts and per-entity property arrays
//! - named groups and regions
//! - particles with their bonded terms
//! - set commands to run once the cluster exists
//!
//! [`Cluster`]: partix_hub::Cluster

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use schema::{ParticleDef, PartitionDef, PropertyDef, ScenarioDef, TermDef};
