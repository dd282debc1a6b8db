//! Direct attribute overwrite
//!
//! Each masked owned particle receives the assignment's values. Mass is
//! rederived from density where the particle's shape makes that meaningful:
//!
//! ```text
//! density d  ─┬─ sphere (radius > 0)   rmass = d · V(r)   (disk area in 2-D)
//!             ├─ density array enabled  density = d
//!             ├─ ellipsoid              rmass = d · 4/3 π abc
//!             ├─ line                   rmass = d · length
//!             ├─ triangle               rmass = d · area
//!             └─ point mass             rmass = d
//! ```

use crate::request::Assignment;
use partix_core::shape::{qnormalize, sphere_volume};
use partix_core::{Error, Particle, Population, Result, Schema, ShapeClass};
use partix_hub::Context;

/// What the mutator needs to know about the population as a whole
#[derive(Debug, Clone, Copy)]
pub struct MutateContext<'a> {
    pub schema: &'a Schema,
    /// Two-dimensional cell
    pub planar: bool,
}

impl<'a> MutateContext<'a> {
    pub fn from_context(ctx: Context<'a>) -> Self {
        Self {
            schema: ctx.schema,
            planar: ctx.domain.is_some_and(|d| d.is_2d()),
        }
    }
}

/// Apply `assignment` to every owned particle whose mask entry is set
///
/// `mask` covers the owned block of `pop`. Returns the number of particles
/// changed. Stops at the first particle that cannot take the assignment.
pub fn apply(
    pop: &mut Population,
    mask: &[bool],
    assignment: &Assignment,
    ctx: MutateContext<'_>,
) -> Result<u64> {
    let mut count = 0;
    for (p, _) in pop
        .locals_mut()
        .iter_mut()
        .zip(mask)
        .filter(|(_, selected)| **selected)
    {
        assign(p, assignment, ctx)?;
        count += 1;
    }
    Ok(count)
}

fn assign(p: &mut Particle, assignment: &Assignment, ctx: MutateContext<'_>) -> Result<()> {
    let caps = &ctx.schema.capabilities;
    match assignment {
        Assignment::Type(t) => p.type_id = *t,
        Assignment::Molecule(m) => p.molecule = *m,
        Assignment::Position(d, v) => p.x[*d] = *v,
        Assignment::Velocity(d, v) => p.v[*d] = *v,
        Assignment::Omega(d, v) => p.omega[*d] = *v,
        Assignment::Charge(q) => p.charge = *q,
        Assignment::Mass(m) => p.rmass = *m,
        Assignment::Shape(diameters) => {
            p.set_ellipsoid(diameters.map(|d| 0.5 * d))?;
        }
        Assignment::Length(length) => p.set_line_length(*length)?,
        Assignment::Tri(size) => p.set_equilateral(*size)?,
        Assignment::Dipole(mu) => {
            p.mu = [mu[0], mu[1], mu[2], norm(mu)];
        }
        Assignment::Quat { axis, angle } => {
            if ctx.planar && (axis[0] != 0.0 || axis[1] != 0.0) {
                return Err(Error::InvalidOperation(
                    "cannot set quaternion with xy components for 2d system".to_string(),
                ));
            }
            let half = 0.5 * angle.to_radians();
            let (s, c) = half.sin_cos();
            let quat = p.quat_mut()?;
            *quat = [c, axis[0] * s, axis[1] * s, axis[2] * s];
            qnormalize(quat);
        }
        Assignment::Theta(theta) => p.set_line_theta(*theta)?,
        Assignment::Angmom(l) => p.angmom = *l,
        Assignment::Diameter(d) => {
            p.radius = 0.5 * d;
            if caps.rmass && caps.density && p.density > 0.0 {
                p.rmass = p.density * sphere_volume(p.radius, ctx.planar);
            }
        }
        Assignment::Density(d) => set_density(p, *d, ctx),
        Assignment::Volume(v) => p.vfrac = *v,
        Assignment::Image(flags) => {
            for (image, flag) in p.image.iter_mut().zip(flags.0) {
                if let Some(value) = flag {
                    *image = value;
                }
            }
        }
        Assignment::MesoE(e) => p.meso_e = *e,
        Assignment::MesoCv(cv) => p.meso_cv = *cv,
        Assignment::MesoRho(rho) => p.meso_rho = *rho,
        Assignment::Property { name, values } => {
            p.properties.insert(name.clone(), values.clone());
        }
        Assignment::TypeFraction { .. }
        | Assignment::DipoleRandom { .. }
        | Assignment::QuatRandom { .. }
        | Assignment::Topology { .. } => {
            return Err(Error::InvalidOperation(format!(
                "{assignment:?} is not a direct assignment"
            )));
        }
    }
    Ok(())
}

fn set_density(p: &mut Particle, d: f64, ctx: MutateContext<'_>) {
    let caps = &ctx.schema.capabilities;
    let class = p.shape_class(caps);
    if class == ShapeClass::Sphere {
        if caps.density {
            p.density = d;
        }
        if caps.rmass {
            p.rmass = d * sphere_volume(p.radius, ctx.planar);
        }
        return;
    }
    if caps.density {
        p.density = d;
        return;
    }
    p.rmass = match (&p.shape, class) {
        (Some(shape), ShapeClass::Ellipsoid | ShapeClass::Line | ShapeClass::Triangle) => {
            shape.mass_at(d)
        }
        _ => d,
    };
}

pub(crate) fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
