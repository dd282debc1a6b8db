//! Partix Set - Attribute mutation engine
//!
//! Resolves a selection predicate into the particles it applies to and
//! overwrites one attribute per keyword on every selected particle:
//!
//! ```text
//! set <style> <id> <keyword> <values...> [<keyword> <values...> ...]
//!      │                │
//!      │                └── parse + validate ── Assignment
//!      └── Predicate ─┬── mutate   (direct overwrite, derived mass)
//!                     ├── random   (position-seeded, owner independent)
//!                     └── topology (boundary sync, all-participant rule)
//! ```
//!
//! Keywords are applied left to right; each one reports the cluster-wide
//! number of particles (or bonded terms) it changed.
//!
//! ## Example
//!
//! ```
//! use partix_core::{Capabilities, Domain, Particle, Schema, TypeCounts};
//! use partix_hub::{Cluster, ClusterConfig};
//!
//! let schema = Schema::new(
//!     Capabilities { tags: true, ..Default::default() },
//!     TypeCounts { atom: 2, ..Default::default() },
//! );
//! let mut cluster = Cluster::new(ClusterConfig::with_rank_count(2), schema)
//!     .with_domain(Domain::new([0.0; 3], [10.0; 3]));
//! for i in 1..=10u64 {
//!     cluster.add_particle(Particle::new(i, 1, [i as f64 - 0.5, 1.0, 1.0])).unwrap();
//! }
//!
//! let reports = partix_set::run(&mut cluster, &["atom", "3*5", "z", "2.0"]).unwrap();
//! assert_eq!(reports[0].count, 3);
//! ```

mod command;
mod error;
pub mod mutate;
mod parse;
pub mod random;
mod request;
pub mod select;
pub mod topology;

pub use command::{run, run_line, SetReport};
pub use error::{Error, Result, Severity};
pub use parse::parse_keyword;
pub use request::{Assignment, ImageFlags, Route, Selection, Style};
pub use select::Predicate;
