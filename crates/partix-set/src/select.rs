//! Selection predicates
//!
//! A [`Predicate`] is compiled once per keyword from the selection style and
//! its identifier string, then evaluated against particles to build a mask
//! the same length as the index space it is given.

use crate::error::{Error, Result};
use crate::request::{Selection, Style};
use partix_core::{parse_bounds, Particle, Region, BIG};
use partix_hub::Context;

/// A compiled selection predicate
#[derive(Debug, Clone, Copy)]
pub enum Predicate<'a> {
    /// Inclusive entity id range
    Ids(i64, i64),
    /// Inclusive molecule id range
    Molecules(i64, i64),
    /// Inclusive type id range
    Types(i64, i64),
    /// Group membership bitmask
    Group(u32),
    Region(&'a Region),
}

impl<'a> Predicate<'a> {
    /// Resolve a selection against the shared cluster state
    pub fn compile(selection: &Selection, ctx: Context<'a>) -> Result<Self> {
        let caps = &ctx.schema.capabilities;
        let id = selection.id.as_str();
        match selection.style {
            Style::Atom => {
                if !caps.tags {
                    return Err(Error::SelectionUnsupported {
                        style: "atom",
                        what: "atom IDs",
                    });
                }
                let (lo, hi) = parse_bounds(id, BIG)?;
                Ok(Predicate::Ids(lo, hi))
            }
            Style::Mol => {
                if !caps.molecule {
                    return Err(Error::SelectionUnsupported {
                        style: "mol",
                        what: "molecule IDs",
                    });
                }
                // molecule 0 marks unassigned particles and is outside [1, BIG]
                if id == "0" {
                    return Ok(Predicate::Molecules(0, 0));
                }
                let (lo, hi) = parse_bounds(id, BIG)?;
                Ok(Predicate::Molecules(lo, hi))
            }
            Style::Type => {
                let (lo, hi) = parse_bounds(id, ctx.schema.types.atom as i64)?;
                Ok(Predicate::Types(lo, hi))
            }
            Style::Group => ctx
                .groups
                .find(id)
                .map(Predicate::Group)
                .ok_or_else(|| Error::UnknownGroup(id.to_string())),
            Style::Region => ctx
                .regions
                .find(id)
                .map(Predicate::Region)
                .ok_or_else(|| Error::UnknownRegion(id.to_string())),
        }
    }

    pub fn matches(&self, p: &Particle) -> bool {
        match *self {
            Predicate::Ids(lo, hi) => p.id.in_range(lo, hi),
            Predicate::Molecules(lo, hi) => (lo..=hi).contains(&p.molecule),
            Predicate::Types(lo, hi) => (lo..=hi).contains(&(p.type_id as i64)),
            Predicate::Group(bit) => p.mask & bit != 0,
            Predicate::Region(region) => region.contains(&p.x),
        }
    }

    /// One entry per particle, in index order
    pub fn mask(&self, particles: &[Particle]) -> Vec<bool> {
        particles.iter().map(|p| self.matches(p)).collect()
    }
}
