//! Scenario file schema

use indexmap::IndexMap;
use partix_core::{Axis, Capabilities, Domain, Region, ShapeRecord, TermKind, TypeCounts};
use partix_hub::partition::PartitionStrategy;
use partix_hub::ClusterConfig;
use serde::{Deserialize, Serialize};

/// A complete particle system: cell, layout, population and set commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDef {
    /// Rank count and ghost cutoff
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub partition: PartitionDef,
    pub cell: Domain,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub types: TypeCounts,
    /// Coarse-graining factor applied to `diameter` values
    #[serde(default = "default_coarse_grain")]
    pub coarse_grain: f64,
    /// Group names, in declaration order
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub regions: IndexMap<String, Region>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    pub particles: Vec<ParticleDef>,
    #[serde(default)]
    pub terms: Vec<TermDef>,
    /// Set commands to run after the cluster is built
    #[serde(default)]
    pub commands: Vec<String>,
}

fn default_coarse_grain() -> f64 {
    1.0
}

/// Serializable choice of partition strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionDef {
    Slabs(Axis),
    ById,
}

impl Default for PartitionDef {
    fn default() -> Self {
        PartitionDef::Slabs(Axis::X)
    }
}

impl From<PartitionDef> for PartitionStrategy {
    fn from(def: PartitionDef) -> Self {
        match def {
            PartitionDef::Slabs(axis) => PartitionStrategy::slabs(axis),
            PartitionDef::ById => PartitionStrategy::by_id(),
        }
    }
}

/// Declaration of a per-entity property array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub width: usize,
    /// Uninitialized arrays reject `property/atom` until values are written
    #[serde(default = "default_initialized")]
    pub initialized: bool,
}

fn default_initialized() -> bool {
    true
}

/// One particle and its initial attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleDef {
    pub id: u64,
    pub type_id: i32,
    pub x: [f64; 3],
    #[serde(default)]
    pub v: [f64; 3],
    #[serde(default)]
    pub molecule: i64,
    #[serde(default)]
    pub charge: f64,
    /// Per-particle mass; defaults to 1
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub density: f64,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub shape: Option<ShapeRecord>,
    /// Initial values of declared property arrays
    #[serde(default)]
    pub properties: IndexMap<String, Vec<f64>>,
}

/// A bonded term stored on `owner`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermDef {
    pub owner: u64,
    pub kind: TermKind,
    pub type_id: i32,
    /// Partner ids; for a bond, the other end only
    pub atoms: Vec<u64>,
}
