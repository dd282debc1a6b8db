//! Population-level capability flags and declared type counts

use crate::{Error, Result, TermKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Switches indicating which optional per-entity attributes are allocated
///
/// A keyword may only write an attribute whose owning capability is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Entity identifiers are meaningful (required by `atom` selection)
    pub tags: bool,
    /// Molecule ids
    pub molecule: bool,
    /// Per-entity charge
    pub charge: bool,
    /// Per-entity mass (as opposed to per-type mass)
    pub rmass: bool,
    /// Finite-size spheres
    pub radius: bool,
    /// Density stored as a primary attribute
    pub density: bool,
    /// Angular velocity
    pub omega: bool,
    /// Point dipoles
    pub dipole: bool,
    /// Ellipsoid shape records
    pub ellipsoid: bool,
    /// Line segment shape records
    pub line: bool,
    /// Triangle shape records
    pub tri: bool,
    /// Volume fraction
    pub vfrac: bool,
    /// SPH internal energy
    pub meso_e: bool,
    /// SPH heat capacity
    pub meso_cv: bool,
    /// SPH density
    pub meso_rho: bool,
    /// Bonded terms the population may carry
    pub bonds: bool,
    pub angles: bool,
    pub dihedrals: bool,
    pub impropers: bool,
}

impl Capabilities {
    /// Whether the population may carry terms of the given kind
    pub fn allows(&self, kind: TermKind) -> bool {
        match kind {
            TermKind::Bond => self.bonds,
            TermKind::Angle => self.angles,
            TermKind::Dihedral => self.dihedrals,
            TermKind::Improper => self.impropers,
        }
    }

    /// Whether any orientation-bearing shape is enabled
    pub fn orientable(&self) -> bool {
        self.ellipsoid || self.tri
    }
}

/// Number of declared types for entities and each bonded-term kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeCounts {
    pub atom: i32,
    pub bond: i32,
    pub angle: i32,
    pub dihedral: i32,
    pub improper: i32,
}

impl TypeCounts {
    /// Declared number of types for a bonded-term kind
    pub fn for_term(&self, kind: TermKind) -> i32 {
        match kind {
            TermKind::Bond => self.bond,
            TermKind::Angle => self.angle,
            TermKind::Dihedral => self.dihedral,
            TermKind::Improper => self.improper,
        }
    }
}

/// Declaration of a free-form per-entity property array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Number of values stored per entity
    pub width: usize,
    /// Whether default values have been written to every entity
    #[serde(default = "default_initialized")]
    pub initialized: bool,
}

fn default_initialized() -> bool {
    true
}

/// Everything that is shared by all ranks about the population layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub capabilities: Capabilities,
    pub types: TypeCounts,
    /// Coarse-graining factor applied to user-supplied diameters
    pub coarse_grain: f64,
    properties: IndexMap<String, PropertySpec>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::default(),
            types: TypeCounts::default(),
            coarse_grain: 1.0,
            properties: IndexMap::new(),
        }
    }
}

impl Schema {
    /// Create a schema from capabilities and type counts
    pub fn new(capabilities: Capabilities, types: TypeCounts) -> Self {
        Self {
            capabilities,
            types,
            ..Self::default()
        }
    }

    /// Declare a per-entity property array
    pub fn add_property(&mut self, name: impl Into<String>, width: usize) -> Result<()> {
        let name = name.into();
        if width == 0 {
            return Err(Error::InvalidOperation(format!(
                "property {name} must hold at least one value"
            )));
        }
        self.properties.insert(
            name,
            PropertySpec {
                width,
                initialized: true,
            },
        );
        Ok(())
    }

    /// Look up a property array by name
    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.get(name)
    }

    /// Mutable access to a property declaration
    pub fn property_mut(&mut self, name: &str) -> Option<&mut PropertySpec> {
        self.properties.get_mut(name)
    }

    /// All declared property arrays in declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertySpec)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows() {
        let caps = Capabilities {
            bonds: true,
            impropers: true,
            ..Default::default()
        };
        assert!(caps.allows(TermKind::Bond));
        assert!(!caps.allows(TermKind::Angle));
        assert!(!caps.allows(TermKind::Dihedral));
        assert!(caps.allows(TermKind::Improper));
    }

    #[test]
    fn test_properties() {
        let mut schema = Schema::default();
        schema.add_property("temp", 1).unwrap();
        schema.add_property("flux", 3).unwrap();
        assert!(schema.add_property("empty", 0).is_err());

        assert_eq!(schema.property("flux").map(|p| p.width), Some(3));
        assert!(schema.property("missing").is_none());
        let names: Vec<_> = schema.properties().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["temp", "flux"]);
    }

    #[test]
    fn test_schema_from_ron() {
        let schema: Schema = ron::from_str(
            "(capabilities: (tags: true, rmass: true), types: (atom: 3), coarse_grain: 2.0)",
        )
        .unwrap();
        assert!(schema.capabilities.tags);
        assert!(schema.capabilities.rmass);
        assert!(!schema.capabilities.dipole);
        assert_eq!(schema.types.atom, 3);
        assert_eq!(schema.coarse_grain, 2.0);
    }
}
