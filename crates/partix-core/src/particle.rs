//! Per-entity particle record and bonded-term tables

use crate::shape::{equilateral_corners, identity_quat};
use crate::{Capabilities, EntityId, Error, Result, ShapeClass, ShapeRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of bonded term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    Bond,
    Angle,
    Dihedral,
    Improper,
}

impl TermKind {
    pub const ALL: [TermKind; 4] = [
        TermKind::Bond,
        TermKind::Angle,
        TermKind::Dihedral,
        TermKind::Improper,
    ];

    /// Number of partner ids stored with each term
    ///
    /// Bonds store only the partner; the owning particle is the other end.
    pub fn stored_atoms(self) -> usize {
        match self {
            TermKind::Bond => 1,
            TermKind::Angle => 3,
            TermKind::Dihedral | TermKind::Improper => 4,
        }
    }

    /// Whether the owning particle is an implicit participant
    pub fn includes_owner(self) -> bool {
        matches!(self, TermKind::Bond)
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TermKind::Bond => "Bond",
            TermKind::Angle => "Angle",
            TermKind::Dihedral => "Dihedral",
            TermKind::Improper => "Improper",
        };
        f.write_str(name)
    }
}

/// One bonded term stored on its owning particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondedTerm {
    pub type_id: i32,
    pub atoms: Vec<EntityId>,
}

impl BondedTerm {
    pub fn new(type_id: i32, atoms: impl Into<Vec<EntityId>>) -> Self {
        Self {
            type_id,
            atoms: atoms.into(),
        }
    }
}

/// Bonded-term tables of one particle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topology {
    pub bonds: Vec<BondedTerm>,
    pub angles: Vec<BondedTerm>,
    pub dihedrals: Vec<BondedTerm>,
    pub impropers: Vec<BondedTerm>,
}

impl Topology {
    pub fn terms(&self, kind: TermKind) -> &[BondedTerm] {
        match kind {
            TermKind::Bond => &self.bonds,
            TermKind::Angle => &self.angles,
            TermKind::Dihedral => &self.dihedrals,
            TermKind::Improper => &self.impropers,
        }
    }

    pub fn terms_mut(&mut self, kind: TermKind) -> &mut Vec<BondedTerm> {
        match kind {
            TermKind::Bond => &mut self.bonds,
            TermKind::Angle => &mut self.angles,
            TermKind::Dihedral => &mut self.dihedrals,
            TermKind::Improper => &mut self.impropers,
        }
    }

    /// Append a term after checking its arity
    pub fn push(&mut self, kind: TermKind, term: BondedTerm) -> Result<()> {
        if term.atoms.len() != kind.stored_atoms() {
            return Err(Error::InvalidOperation(format!(
                "{kind} expects {} atom ids, got {}",
                kind.stored_atoms(),
                term.atoms.len()
            )));
        }
        self.terms_mut(kind).push(term);
        Ok(())
    }
}

/// A simulated particle
///
/// Every optional attribute is always present in memory; whether it is
/// meaningful is decided by the population's [`Capabilities`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: EntityId,
    pub type_id: i32,
    /// Group membership bitmask
    pub mask: u32,
    pub molecule: i64,
    pub x: [f64; 3],
    pub v: [f64; 3],
    pub omega: [f64; 3],
    pub angmom: [f64; 3],
    /// Periodic image counters
    pub image: [i32; 3],
    pub charge: f64,
    pub rmass: f64,
    pub radius: f64,
    pub density: f64,
    pub vfrac: f64,
    /// Dipole components followed by its magnitude
    pub mu: [f64; 4],
    pub meso_e: f64,
    pub meso_cv: f64,
    pub meso_rho: f64,
    pub shape: Option<ShapeRecord>,
    pub topology: Topology,
    /// Free-form per-entity property arrays
    pub properties: IndexMap<String, Vec<f64>>,
}

impl Particle {
    /// Create a particle of the given type at a position
    pub fn new(id: impl Into<EntityId>, type_id: i32, x: [f64; 3]) -> Self {
        Self {
            id: id.into(),
            type_id,
            mask: 1,
            molecule: 0,
            x,
            v: [0.0; 3],
            omega: [0.0; 3],
            angmom: [0.0; 3],
            image: [0; 3],
            charge: 0.0,
            rmass: 1.0,
            radius: 0.0,
            density: 0.0,
            vfrac: 0.0,
            mu: [0.0; 4],
            meso_e: 0.0,
            meso_cv: 0.0,
            meso_rho: 0.0,
            shape: None,
            topology: Topology::default(),
            properties: IndexMap::new(),
        }
    }

    /// Shape classification under the population's capabilities
    pub fn shape_class(&self, caps: &Capabilities) -> ShapeClass {
        if caps.radius && self.radius > 0.0 {
            return ShapeClass::Sphere;
        }
        match &self.shape {
            Some(ShapeRecord::Ellipsoid { .. }) if caps.ellipsoid => ShapeClass::Ellipsoid,
            Some(ShapeRecord::Line { .. }) if caps.line => ShapeClass::Line,
            Some(ShapeRecord::Triangle { .. }) if caps.tri => ShapeClass::Triangle,
            _ => ShapeClass::Point,
        }
    }

    /// Orientation quaternion of an ellipsoid or triangle
    pub fn quat_mut(&mut self) -> Result<&mut [f64; 4]> {
        let id = self.id;
        self.shape
            .as_mut()
            .and_then(ShapeRecord::quat_mut)
            .ok_or(Error::MissingShape {
                id,
                expected: ShapeClass::Ellipsoid,
            })
    }

    /// Set ellipsoid semi-axes; all-zero axes remove the record
    pub fn set_ellipsoid(&mut self, semi_axes: [f64; 3]) -> Result<()> {
        self.ensure_shape_slot(ShapeClass::Ellipsoid)?;
        if semi_axes.iter().all(|&a| a == 0.0) {
            self.shape = None;
            return Ok(());
        }
        match &mut self.shape {
            Some(ShapeRecord::Ellipsoid { semi_axes: axes, .. }) => *axes = semi_axes,
            _ => {
                self.shape = Some(ShapeRecord::Ellipsoid {
                    semi_axes,
                    quat: identity_quat(),
                })
            }
        }
        Ok(())
    }

    /// Set line length; zero removes the record
    pub fn set_line_length(&mut self, length: f64) -> Result<()> {
        self.ensure_shape_slot(ShapeClass::Line)?;
        if length == 0.0 {
            self.shape = None;
            return Ok(());
        }
        match &mut self.shape {
            Some(ShapeRecord::Line { length: l, .. }) => *l = length,
            _ => self.shape = Some(ShapeRecord::Line { length, theta: 0.0 }),
        }
        Ok(())
    }

    /// Set line orientation angle (radians); the particle must be a line
    pub fn set_line_theta(&mut self, angle: f64) -> Result<()> {
        match &mut self.shape {
            Some(ShapeRecord::Line { theta, .. }) => {
                *theta = angle;
                Ok(())
            }
            _ => Err(Error::MissingShape {
                id: self.id,
                expected: ShapeClass::Line,
            }),
        }
    }

    /// Make the particle an equilateral triangle of edge `size`; zero removes the record
    pub fn set_equilateral(&mut self, size: f64) -> Result<()> {
        self.ensure_shape_slot(ShapeClass::Triangle)?;
        if size == 0.0 {
            self.shape = None;
            return Ok(());
        }
        match &mut self.shape {
            Some(ShapeRecord::Triangle { corners, .. }) => *corners = equilateral_corners(size),
            _ => {
                self.shape = Some(ShapeRecord::Triangle {
                    corners: equilateral_corners(size),
                    quat: identity_quat(),
                })
            }
        }
        Ok(())
    }

    /// A particle holds at most one shape record
    fn ensure_shape_slot(&self, wanted: ShapeClass) -> Result<()> {
        match &self.shape {
            Some(record) if record.class() != wanted => Err(Error::ShapeConflict {
                id: self.id,
                current: record.class(),
            }),
            _ => Ok(()),
        }
    }
}
