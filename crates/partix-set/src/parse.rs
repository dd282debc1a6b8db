//! Keyword parsing and validation
//!
//! Every check that can fail without looking at individual particles happens
//! here, before anything is mutated: argument count, numeric syntax, value
//! ranges, capability flags and image-flag periodicity.

use crate::error::{Error, Result};
use crate::request::{Assignment, ImageFlags};
use partix_core::{Capabilities, TermKind, TypeCounts};
use partix_hub::Context;

/// Parse the keyword at `args[0]` and its values
///
/// Returns the validated assignment and the number of tokens consumed,
/// keyword included.
pub fn parse_keyword(args: &[&str], ctx: Context<'_>) -> Result<(Assignment, usize)> {
    let keyword = *args
        .first()
        .ok_or_else(|| Error::Illegal("missing keyword".to_string()))?;
    let caps = &ctx.schema.capabilities;
    let types = &ctx.schema.types;

    let assignment = match keyword {
        "type" => {
            let v = values(args, 1)?;
            Assignment::Type(type_id(v[0], types.atom)?)
        }
        "type/fraction" => {
            let v = values(args, 3)?;
            let type_id = type_id(v[0], types.atom)?;
            let fraction = float(v[1])?;
            if !(0.0..=1.0).contains(&fraction) {
                return Err(invalid("fraction", v[1]));
            }
            let seed = seed(v[2])?;
            Assignment::TypeFraction {
                type_id,
                fraction,
                seed,
            }
        }
        "mol" => {
            let v = values(args, 1)?;
            let molecule = int(v[0])?;
            require(caps.molecule, keyword)?;
            Assignment::Molecule(molecule)
        }
        "x" | "y" | "z" => Assignment::Position(axis_of(keyword), float(values(args, 1)?[0])?),
        "vx" | "vy" | "vz" => Assignment::Velocity(axis_of(keyword), float(values(args, 1)?[0])?),
        "omegax" | "omegay" | "omegaz" => {
            let value = float(values(args, 1)?[0])?;
            require(caps.omega, keyword)?;
            Assignment::Omega(axis_of(keyword), value)
        }
        "charge" => {
            let value = float(values(args, 1)?[0])?;
            require(caps.charge, keyword)?;
            Assignment::Charge(value)
        }
        "mass" => {
            let v = values(args, 1)?;
            let mass = float(v[0])?;
            require(caps.rmass, keyword)?;
            if mass <= 0.0 {
                return Err(invalid("mass", v[0]));
            }
            Assignment::Mass(mass)
        }
        "shape" => {
            let v = values(args, 3)?;
            let diameters = vec3(v)?;
            require(caps.ellipsoid, keyword)?;
            let any_zero = diameters.iter().any(|&d| d == 0.0);
            let any_positive = diameters.iter().any(|&d| d > 0.0);
            if diameters.iter().any(|&d| d < 0.0) || (any_positive && any_zero) {
                return Err(invalid("shape", &v.join(" ")));
            }
            Assignment::Shape(diameters)
        }
        "length" => {
            let v = values(args, 1)?;
            let length = float(v[0])?;
            require(caps.line, keyword)?;
            if length < 0.0 {
                return Err(invalid("length", v[0]));
            }
            Assignment::Length(length)
        }
        "tri" => {
            let v = values(args, 1)?;
            let size = float(v[0])?;
            require(caps.tri, keyword)?;
            if size < 0.0 {
                return Err(invalid("length", v[0]));
            }
            Assignment::Tri(size)
        }
        "dipole" => {
            let moment = vec3(values(args, 3)?)?;
            require(caps.dipole, keyword)?;
            Assignment::Dipole(moment)
        }
        "dipole/random" => {
            let v = values(args, 2)?;
            let seed = seed(v[0])?;
            let magnitude = float(v[1])?;
            require(caps.dipole, keyword)?;
            if magnitude <= 0.0 {
                return Err(invalid("dipole length", v[1]));
            }
            Assignment::DipoleRandom { seed, magnitude }
        }
        "quat" => {
            let v = values(args, 4)?;
            let axis = vec3(&v[..3])?;
            let angle = float(v[3])?;
            require(caps.orientable(), keyword)?;
            Assignment::Quat { axis, angle }
        }
        "quat/random" => {
            let v = values(args, 1)?;
            let seed = seed(v[0])?;
            require(caps.orientable(), keyword)?;
            Assignment::QuatRandom { seed }
        }
        "theta" => {
            let degrees = float(values(args, 1)?[0])?;
            require(caps.line, keyword)?;
            Assignment::Theta(degrees.to_radians())
        }
        "angmom" => {
            let angmom = vec3(values(args, 3)?)?;
            require(caps.orientable(), keyword)?;
            Assignment::Angmom(angmom)
        }
        "diameter" => {
            let v = values(args, 1)?;
            let diameter = float(v[0])? * ctx.schema.coarse_grain;
            require(caps.radius, keyword)?;
            if diameter < 0.0 {
                return Err(invalid("diameter", v[0]));
            }
            Assignment::Diameter(diameter)
        }
        "density" => {
            let value = float(values(args, 1)?[0])?;
            require(caps.rmass || caps.density, keyword)?;
            Assignment::Density(value)
        }
        "volume" => {
            let value = float(values(args, 1)?[0])?;
            require(caps.vfrac, keyword)?;
            Assignment::Volume(value)
        }
        "image" => Assignment::Image(image_flags(values(args, 3)?, ctx)?),
        "bond" => topology(args, caps, types, TermKind::Bond)?,
        "angle" => topology(args, caps, types, TermKind::Angle)?,
        "dihedral" => topology(args, caps, types, TermKind::Dihedral)?,
        "improper" => topology(args, caps, types, TermKind::Improper)?,
        "meso_e" => {
            let value = float(values(args, 1)?[0])?;
            require(caps.meso_e, keyword)?;
            Assignment::MesoE(value)
        }
        "meso_cv" => {
            let value = float(values(args, 1)?[0])?;
            require(caps.meso_cv, keyword)?;
            Assignment::MesoCv(value)
        }
        "meso_rho" => {
            let value = float(values(args, 1)?[0])?;
            require(caps.meso_rho, keyword)?;
            Assignment::MesoRho(value)
        }
        "property/atom" => return property(args, ctx),
        other => return Err(Error::Illegal(format!("unknown keyword {other}"))),
    };

    let consumed = 1 + arity(&assignment);
    Ok((assignment, consumed))
}

/// Number of value tokens each keyword consumes
fn arity(assignment: &Assignment) -> usize {
    match assignment {
        Assignment::TypeFraction { .. }
        | Assignment::Shape(_)
        | Assignment::Dipole(_)
        | Assignment::Angmom(_)
        | Assignment::Image(_) => 3,
        Assignment::DipoleRandom { .. } => 2,
        Assignment::Quat { .. } => 4,
        Assignment::Property { values, .. } => 1 + values.len(),
        _ => 1,
    }
}

/// The `n` value tokens following the keyword
fn values<'a, 'b>(args: &'a [&'b str], n: usize) -> Result<&'a [&'b str]> {
    args.get(1..=n).ok_or_else(|| {
        Error::Illegal(format!(
            "{} expects {n} value(s), got {}",
            args[0],
            args.len() - 1
        ))
    })
}

fn float(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|_| Error::Illegal(format!("expected a number, got {s}")))
}

fn int(s: &str) -> Result<i64> {
    s.parse::<i64>()
        .map_err(|_| Error::Illegal(format!("expected an integer, got {s}")))
}

fn vec3(v: &[&str]) -> Result<[f64; 3]> {
    Ok([float(v[0])?, float(v[1])?, float(v[2])?])
}

fn invalid(what: &'static str, value: &str) -> Error {
    Error::InvalidValue {
        what,
        value: value.to_string(),
    }
}

fn require(enabled: bool, keyword: &str) -> Result<()> {
    if enabled {
        Ok(())
    } else {
        Err(Error::Unsupported(keyword.to_string()))
    }
}

fn type_id(s: &str, max: i32) -> Result<i32> {
    let t = int(s)?;
    if t <= 0 || t > max as i64 {
        return Err(invalid("value", s));
    }
    Ok(t as i32)
}

fn seed(s: &str) -> Result<u64> {
    match int(s)? {
        seed if seed > 0 => Ok(seed as u64),
        _ => Err(Error::InvalidSeed(s.to_string())),
    }
}

fn axis_of(keyword: &str) -> usize {
    match keyword.as_bytes().last() {
        Some(b'y') => 1,
        Some(b'z') => 2,
        _ => 0,
    }
}

fn image_flags(v: &[&str], ctx: Context<'_>) -> Result<ImageFlags> {
    let domain = ctx.domain.ok_or(Error::NoDomain)?;
    let mut flags = ImageFlags::default();
    for (d, token) in v.iter().enumerate() {
        if *token == "NULL" {
            continue;
        }
        let image = int(token)?;
        if image != 0 && !domain.periodic[d] {
            return Err(Error::NonPeriodicImage(['x', 'y', 'z'][d]));
        }
        flags.0[d] = Some(
            i32::try_from(image).map_err(|_| invalid("image flag", token))?,
        );
    }
    Ok(flags)
}

fn topology(
    args: &[&str],
    caps: &Capabilities,
    types: &TypeCounts,
    kind: TermKind,
) -> Result<Assignment> {
    let v = values(args, 1)?;
    let t = int(v[0])?;
    require(caps.allows(kind), args[0])?;
    if t <= 0 || t > types.for_term(kind) as i64 {
        return Err(invalid("value", v[0]));
    }
    Ok(Assignment::Topology {
        kind,
        type_id: t as i32,
    })
}

fn property(args: &[&str], ctx: Context<'_>) -> Result<(Assignment, usize)> {
    let name = *args
        .get(1)
        .ok_or_else(|| Error::Illegal("property/atom needs a property name".to_string()))?;
    let spec = ctx
        .schema
        .property(name)
        .ok_or_else(|| Error::UnknownProperty(name.to_string()))?;
    let available = args.len() - 2;
    if available < spec.width {
        return Err(Error::PropertyArity {
            name: name.to_string(),
            expected: spec.width,
            got: available,
        });
    }
    if !spec.initialized {
        return Err(Error::PropertyUninitialized(name.to_string()));
    }
    let values = args[2..2 + spec.width]
        .iter()
        .map(|s| float(s))
        .collect::<Result<Vec<_>>>()?;
    let consumed = 2 + values.len();
    Ok((
        Assignment::Property {
            name: name.to_string(),
            values,
        },
        consumed,
    ))
}
