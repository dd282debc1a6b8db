//! Named spatial regions and their point-containment tests

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Cartesian axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Geometric body of a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionShape {
    /// Axis-aligned box, bounds inclusive
    Block { lo: [f64; 3], hi: [f64; 3] },
    Sphere { center: [f64; 3], radius: f64 },
    /// Cylinder along `axis`; `center` holds the two remaining coordinates
    Cylinder {
        axis: Axis,
        center: [f64; 2],
        radius: f64,
        lo: f64,
        hi: f64,
    },
}

/// Which side of the body counts as inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub shape: RegionShape,
    #[serde(default)]
    pub side: Side,
}

impl Region {
    pub fn new(shape: RegionShape) -> Self {
        Self {
            shape,
            side: Side::In,
        }
    }

    pub fn outside(mut self) -> Self {
        self.side = Side::Out;
        self
    }

    /// Point-containment test honoring the region side
    pub fn contains(&self, x: &[f64; 3]) -> bool {
        let inside = match &self.shape {
            RegionShape::Block { lo, hi } => (0..3).all(|d| x[d] >= lo[d] && x[d] <= hi[d]),
            RegionShape::Sphere { center, radius } => {
                let r2: f64 = (0..3).map(|d| (x[d] - center[d]).powi(2)).sum();
                r2 <= radius * radius
            }
            RegionShape::Cylinder {
                axis,
                center,
                radius,
                lo,
                hi,
            } => {
                let a = axis.index();
                let (u, v) = match axis {
                    Axis::X => (1, 2),
                    Axis::Y => (0, 2),
                    Axis::Z => (0, 1),
                };
                let r2 = (x[u] - center[0]).powi(2) + (x[v] - center[1]).powi(2);
                r2 <= radius * radius && x[a] >= *lo && x[a] <= *hi
            }
        };
        match self.side {
            Side::In => inside,
            Side::Out => !inside,
        }
    }
}

/// Registry of named regions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Regions {
    regions: IndexMap<String, Region>,
}

impl Regions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region; names are unique
    pub fn define(&mut self, name: impl Into<String>, region: Region) -> Result<()> {
        let name = name.into();
        if self.regions.contains_key(&name) {
            return Err(Error::InvalidOperation(format!(
                "region {name} already exists"
            )));
        }
        self.regions.insert(name, region);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block() {
        let region = Region::new(RegionShape::Block {
            lo: [0.0; 3],
            hi: [1.0, 2.0, 3.0],
        });
        assert!(region.contains(&[0.5, 2.0, 0.0]));
        assert!(!region.contains(&[0.5, 2.1, 0.0]));
        assert!(region.clone().outside().contains(&[0.5, 2.1, 0.0]));
    }

    #[test]
    fn test_sphere_and_cylinder() {
        let sphere = Region::new(RegionShape::Sphere {
            center: [1.0, 1.0, 1.0],
            radius: 1.0,
        });
        assert!(sphere.contains(&[1.0, 1.0, 2.0]));
        assert!(!sphere.contains(&[2.0, 2.0, 1.0]));

        let cylinder = Region::new(RegionShape::Cylinder {
            axis: Axis::Z,
            center: [0.0, 0.0],
            radius: 2.0,
            lo: -1.0,
            hi: 1.0,
        });
        assert!(cylinder.contains(&[1.0, 1.0, 0.5]));
        assert!(!cylinder.contains(&[1.0, 1.0, 1.5]));
        assert!(!cylinder.contains(&[2.0, 1.0, 0.0]));
    }

    #[test]
    fn test_registry() {
        let mut regions = Regions::new();
        let block = Region::new(RegionShape::Block {
            lo: [0.0; 3],
            hi: [1.0; 3],
        });
        regions.define("box", block.clone()).unwrap();
        assert!(regions.define("box", block).is_err());
        assert!(regions.find("box").is_some());
        assert!(regions.find("ball").is_none());
    }
}
