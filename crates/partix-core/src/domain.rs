//! Simulation cell

use serde::{Deserialize, Serialize};

/// Dimensionality of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dimension {
    Two,
    #[default]
    Three,
}

/// Orthogonal simulation cell with per-axis periodicity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default)]
    pub dimension: Dimension,
    pub lo: [f64; 3],
    pub hi: [f64; 3],
    #[serde(default)]
    pub periodic: [bool; 3],
}

impl Domain {
    /// Create a fully periodic 3-d cell
    pub fn new(lo: [f64; 3], hi: [f64; 3]) -> Self {
        Self {
            dimension: Dimension::Three,
            lo,
            hi,
            periodic: [true; 3],
        }
    }

    pub fn with_periodic(mut self, periodic: [bool; 3]) -> Self {
        self.periodic = periodic;
        self
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn is_2d(&self) -> bool {
        self.dimension == Dimension::Two
    }

    /// Edge length along an axis
    pub fn length(&self, axis: usize) -> f64 {
        self.hi[axis] - self.lo[axis]
    }

    /// Fold a position back into the primary cell along periodic axes,
    /// updating the image counters accordingly
    pub fn wrap(&self, x: &mut [f64; 3], image: &mut [i32; 3]) {
        for d in 0..3 {
            if !self.periodic[d] {
                continue;
            }
            let len = self.length(d);
            if len <= 0.0 {
                continue;
            }
            let shift = ((x[d] - self.lo[d]) / len).floor();
            if shift != 0.0 {
                x[d] -= shift * len;
                image[d] += shift as i32;
                // rounding can land exactly on hi
                if x[d] >= self.hi[d] {
                    x[d] = self.lo[d];
                }
            }
        }
    }

    /// Periodic image of `x` closest to `reference`
    pub fn nearest_image(&self, reference: &[f64; 3], x: &[f64; 3]) -> [f64; 3] {
        let mut out = *x;
        for d in 0..3 {
            if !self.periodic[d] {
                continue;
            }
            let len = self.length(d);
            if len <= 0.0 {
                continue;
            }
            let delta = out[d] - reference[d];
            out[d] -= (delta / len).round() * len;
        }
        out
    }

    /// Minimum-image distance between two points
    pub fn distance(&self, a: &[f64; 3], b: &[f64; 3]) -> f64 {
        let b = self.nearest_image(a, b);
        ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> Domain {
        Domain::new([0.0; 3], [10.0; 3]).with_periodic([false, true, true])
    }

    #[test]
    fn test_wrap_periodic_axis() {
        let domain = cell();
        let mut x = [1.0, 12.5, -0.5];
        let mut image = [0; 3];
        domain.wrap(&mut x, &mut image);
        assert_eq!(x, [1.0, 2.5, 9.5]);
        assert_eq!(image, [0, 1, -1]);
    }

    #[test]
    fn test_wrap_leaves_non_periodic_axis() {
        let domain = cell();
        let mut x = [-3.0, 5.0, 5.0];
        let mut image = [0; 3];
        domain.wrap(&mut x, &mut image);
        assert_eq!(x, [-3.0, 5.0, 5.0]);
        assert_eq!(image, [0; 3]);
    }

    #[test]
    fn test_nearest_image() {
        let domain = cell();
        let near = domain.nearest_image(&[0.5, 0.5, 5.0], &[9.5, 9.5, 5.0]);
        assert_eq!(near, [9.5, -0.5, 5.0]);
        assert!((domain.distance(&[5.0, 0.5, 5.0], &[5.0, 9.5, 5.0]) - 1.0).abs() < 1e-12);
    }
}
