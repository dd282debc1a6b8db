//! Shape records and shape-dependent geometry
//!
//! A particle is classified as exactly one of sphere, ellipsoid, line,
//! triangle or point mass. Spheres are recognised by a positive radius; the
//! three non-spherical kinds carry an auxiliary [`ShapeRecord`]. When more
//! than one applies, classification follows the fixed priority
//! sphere > ellipsoid > line > triangle > point mass.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Shape classification of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeClass {
    Sphere,
    Ellipsoid,
    Line,
    Triangle,
    Point,
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeClass::Sphere => "sphere",
            ShapeClass::Ellipsoid => "ellipsoid",
            ShapeClass::Line => "line",
            ShapeClass::Triangle => "triangle",
            ShapeClass::Point => "point",
        };
        f.write_str(name)
    }
}

/// Auxiliary record of a non-spherical particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeRecord {
    Ellipsoid {
        semi_axes: [f64; 3],
        #[serde(default = "identity_quat")]
        quat: [f64; 4],
    },
    Line {
        length: f64,
        /// Orientation angle in the xy plane, radians
        #[serde(default)]
        theta: f64,
    },
    Triangle {
        corners: [[f64; 3]; 3],
        #[serde(default = "identity_quat")]
        quat: [f64; 4],
    },
}

impl ShapeRecord {
    pub fn class(&self) -> ShapeClass {
        match self {
            ShapeRecord::Ellipsoid { .. } => ShapeClass::Ellipsoid,
            ShapeRecord::Line { .. } => ShapeClass::Line,
            ShapeRecord::Triangle { .. } => ShapeClass::Triangle,
        }
    }

    /// Orientation quaternion, if this shape carries one
    pub fn quat(&self) -> Option<&[f64; 4]> {
        match self {
            ShapeRecord::Ellipsoid { quat, .. } | ShapeRecord::Triangle { quat, .. } => Some(quat),
            ShapeRecord::Line { .. } => None,
        }
    }

    pub fn quat_mut(&mut self) -> Option<&mut [f64; 4]> {
        match self {
            ShapeRecord::Ellipsoid { quat, .. } | ShapeRecord::Triangle { quat, .. } => Some(quat),
            ShapeRecord::Line { .. } => None,
        }
    }

    /// Mass of this shape at the given density
    pub fn mass_at(&self, density: f64) -> f64 {
        match self {
            ShapeRecord::Ellipsoid { semi_axes, .. } => ellipsoid_volume(semi_axes) * density,
            ShapeRecord::Line { length, .. } => length * density,
            ShapeRecord::Triangle { corners, .. } => triangle_area(corners) * density,
        }
    }
}

pub fn identity_quat() -> [f64; 4] {
    [1.0, 0.0, 0.0, 0.0]
}

/// Volume of a sphere, or area of a disk when `planar`
pub fn sphere_volume(radius: f64, planar: bool) -> f64 {
    if planar {
        PI * radius * radius
    } else {
        4.0 * PI / 3.0 * radius * radius * radius
    }
}

pub fn ellipsoid_volume(semi_axes: &[f64; 3]) -> f64 {
    4.0 * PI / 3.0 * semi_axes[0] * semi_axes[1] * semi_axes[2]
}

/// Area of a triangle from its corners (half the cross-product norm)
pub fn triangle_area(corners: &[[f64; 3]; 3]) -> f64 {
    let [c1, c2, c3] = corners;
    let a = sub3(c2, c1);
    let b = sub3(c3, c1);
    0.5 * len3(&cross3(&a, &b))
}

/// Corners of an equilateral triangle of edge `size` centered on the origin
pub fn equilateral_corners(size: f64) -> [[f64; 3]; 3] {
    let s3 = 3.0f64.sqrt();
    [
        [-0.5 * size, -s3 / 6.0 * size, 0.0],
        [0.5 * size, -s3 / 6.0 * size, 0.0],
        [0.0, s3 / 3.0 * size, 0.0],
    ]
}

pub fn sub3(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn cross3(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn len3(a: &[f64; 3]) -> f64 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

/// Normalize a quaternion in place; a zero quaternion becomes the identity
pub fn qnormalize(q: &mut [f64; 4]) {
    let norm = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
    if norm == 0.0 {
        *q = identity_quat();
        return;
    }
    for c in q.iter_mut() {
        *c /= norm;
    }
}
