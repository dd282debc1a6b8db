//! Position-seeded random assignment
//!
//! The generator is reset from `(seed, position)` before each particle, so
//! a particle receives the same values whichever rank owns it and in
//! whatever order the owned block is visited.

use crate::mutate::{norm, MutateContext};
use crate::request::Assignment;
use partix_core::{Error, Particle, Population, Result, Rng, ShapeClass, ShapeRecord};
use std::f64::consts::PI;

/// Apply a random assignment to every masked owned particle
///
/// Returns the number of particles changed; for a type fraction that is the
/// number actually reassigned.
pub fn apply_random(
    pop: &mut Population,
    mask: &[bool],
    assignment: &Assignment,
    ctx: MutateContext<'_>,
) -> Result<u64> {
    let mut rng = Rng::default();
    let mut count = 0;
    for (p, _) in pop
        .locals_mut()
        .iter_mut()
        .zip(mask)
        .filter(|(_, selected)| **selected)
    {
        match *assignment {
            Assignment::TypeFraction {
                type_id,
                fraction,
                seed,
            } => {
                rng.reset(seed, &p.x);
                if rng.uniform() > fraction {
                    continue;
                }
                p.type_id = type_id;
            }
            Assignment::DipoleRandom { seed, magnitude } => {
                rng.reset(seed, &p.x);
                let mu = random_direction(&mut rng, ctx.planar);
                let scale = magnitude / norm(&mu);
                p.mu = [mu[0] * scale, mu[1] * scale, mu[2] * scale, magnitude];
            }
            Assignment::QuatRandom { seed } => {
                rng.reset(seed, &p.x);
                *random_quat_slot(p, ctx)? = if ctx.planar {
                    planar_quat(&mut rng)
                } else {
                    uniform_quat(&mut rng)
                };
            }
            _ => {
                return Err(Error::InvalidOperation(format!(
                    "{assignment:?} is not a random assignment"
                )))
            }
        }
        count += 1;
    }
    Ok(count)
}

/// Vector drawn from the unit cube centered on the origin; z is zero in 2-D
fn random_direction(rng: &mut Rng, planar: bool) -> [f64; 3] {
    loop {
        let x = rng.uniform() - 0.5;
        let y = rng.uniform() - 0.5;
        let z = if planar { 0.0 } else { rng.uniform() - 0.5 };
        let mu = [x, y, z];
        if norm(&mu) > 0.0 {
            return mu;
        }
    }
}

/// Uniformly distributed rotation
fn uniform_quat(rng: &mut Rng) -> [f64; 4] {
    let s = rng.uniform();
    let t1 = (1.0 - s).sqrt();
    let t2 = s.sqrt();
    let theta1 = 2.0 * PI * rng.uniform();
    let theta2 = 2.0 * PI * rng.uniform();
    [
        theta2.cos() * t2,
        theta1.sin() * t1,
        theta1.cos() * t1,
        theta2.sin() * t2,
    ]
}

/// Rotation about z by a uniform angle
fn planar_quat(rng: &mut Rng) -> [f64; 4] {
    let half = PI * rng.uniform();
    [half.cos(), 0.0, 0.0, half.sin()]
}

/// Orientation slot a random quaternion may be written to
///
/// In 2-D only ellipsoids rotate.
fn random_quat_slot<'p>(p: &'p mut Particle, ctx: MutateContext<'_>) -> Result<&'p mut [f64; 4]> {
    if ctx.planar {
        let id = p.id;
        return match &mut p.shape {
            Some(ShapeRecord::Ellipsoid { quat, .. }) => Ok(quat),
            _ => Err(Error::MissingShape {
                id,
                expected: ShapeClass::Ellipsoid,
            }),
        };
    }
    p.quat_mut()
}
