//! Named groups backed by membership bitmasks

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum number of groups a population can declare
pub const MAX_GROUPS: usize = 32;

/// Registry mapping group names to membership bits
///
/// The `all` group always exists and owns bit 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Groups {
    bits: IndexMap<String, u32>,
}

impl Default for Groups {
    fn default() -> Self {
        let mut bits = IndexMap::new();
        bits.insert("all".to_string(), 1);
        Self { bits }
    }
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bitmask of the `all` group
    pub fn all_bit() -> u32 {
        1
    }

    /// Declare a group, returning its bitmask (idempotent)
    pub fn define(&mut self, name: impl Into<String>) -> Result<u32> {
        let name = name.into();
        if let Some(bit) = self.bits.get(&name) {
            return Ok(*bit);
        }
        if self.bits.len() >= MAX_GROUPS {
            return Err(Error::TooManyGroups(MAX_GROUPS));
        }
        let bit = 1u32 << self.bits.len();
        self.bits.insert(name, bit);
        Ok(bit)
    }

    /// Look up a group's bitmask
    pub fn find(&self, name: &str) -> Option<u32> {
        self.bits.get(name).copied()
    }

    /// Combined bitmask of the named groups
    pub fn mask_of<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<u32> {
        let mut mask = Self::all_bit();
        for name in names {
            mask |= self
                .find(name)
                .ok_or_else(|| Error::GroupNotFound(name.to_string()))?;
        }
        Ok(mask)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}
