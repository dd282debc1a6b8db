//! Per-invocation request types
//!
//! A set command is one [`Selection`] plus a sequence of [`Assignment`]s.
//! Each assignment carries exactly the validated values its keyword needs.

use crate::error::{Error, Result};
use partix_core::TermKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selection style token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    /// Entity id range
    Atom,
    /// Molecule id range
    Mol,
    /// Type id range
    Type,
    /// Named group
    Group,
    /// Named region
    Region,
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "atom" => Ok(Style::Atom),
            "mol" => Ok(Style::Mol),
            "type" => Ok(Style::Type),
            "group" => Ok(Style::Group),
            "region" => Ok(Style::Region),
            other => Err(Error::Illegal(format!("unknown selection style {other}"))),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Style::Atom => "atom",
            Style::Mol => "mol",
            Style::Type => "type",
            Style::Group => "group",
            Style::Region => "region",
        };
        f.write_str(name)
    }
}

/// Selection style plus its identifier string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub style: Style,
    pub id: String,
}

impl Selection {
    pub fn new(style: Style, id: impl Into<String>) -> Self {
        Self {
            style,
            id: id.into(),
        }
    }
}

/// Per-axis image counter overrides; `None` leaves the axis unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageFlags(pub [Option<i32>; 3]);

/// How an assignment is carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Overwrite owned particles directly
    Direct,
    /// Position-seeded random values on owned particles
    Random,
    /// Bonded-term edit after a boundary resynchronization
    Topology { kind: TermKind, type_id: i32 },
}

/// One validated keyword with its values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Assignment {
    Type(i32),
    TypeFraction {
        type_id: i32,
        fraction: f64,
        seed: u64,
    },
    Molecule(i64),
    /// Axis index and coordinate
    Position(usize, f64),
    Velocity(usize, f64),
    Omega(usize, f64),
    Charge(f64),
    Mass(f64),
    /// Ellipsoid diameters
    Shape([f64; 3]),
    Length(f64),
    /// Equilateral triangle edge
    Tri(f64),
    Dipole([f64; 3]),
    DipoleRandom {
        seed: u64,
        magnitude: f64,
    },
    /// Rotation of `angle` degrees about `axis`
    Quat {
        axis: [f64; 3],
        angle: f64,
    },
    QuatRandom {
        seed: u64,
    },
    /// Line orientation in radians
    Theta(f64),
    Angmom([f64; 3]),
    /// Diameter after coarse-grain scaling
    Diameter(f64),
    Density(f64),
    Volume(f64),
    Image(ImageFlags),
    Topology {
        kind: TermKind,
        type_id: i32,
    },
    MesoE(f64),
    MesoCv(f64),
    MesoRho(f64),
    Property {
        name: String,
        values: Vec<f64>,
    },
}

impl Assignment {
    pub fn route(&self) -> Route {
        match self {
            Assignment::TypeFraction { .. }
            | Assignment::DipoleRandom { .. }
            | Assignment::QuatRandom { .. } => Route::Random,
            Assignment::Topology { kind, type_id } => Route::Topology {
                kind: *kind,
                type_id: *type_id,
            },
            _ => Route::Direct,
        }
    }
}
