//! RON scenario loader

use crate::error::{Error, Result};
use crate::schema::{ParticleDef, ScenarioDef, TermDef};
use partix_core::{BondedTerm, EntityId, Particle, Schema};
use partix_hub::Cluster;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

impl ScenarioDef {
    /// Parse a scenario from a RON string
    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Load a scenario from a RON file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Population schema declared by this scenario
    pub fn schema(&self) -> Result<Schema> {
        let mut schema = Schema::new(self.capabilities.clone(), self.types);
        schema.coarse_grain = self.coarse_grain;
        for def in &self.properties {
            schema.add_property(def.name.clone(), def.width)?;
            if let Some(spec) = schema.property_mut(&def.name) {
                spec.initialized = def.initialized;
            }
        }
        Ok(schema)
    }

    /// Build the cluster: cell, groups, regions, then particles with their terms
    pub fn build(&self) -> Result<Cluster> {
        let schema = self.schema()?;
        let mut cluster = Cluster::new(self.cluster.clone(), schema).with_domain(self.cell.clone());
        cluster.redistribute(self.partition.into())?;

        for name in &self.groups {
            cluster.groups_mut().define(name.clone())?;
        }
        for (name, region) in &self.regions {
            cluster.regions_mut().define(name.clone(), region.clone())?;
        }

        let mut terms: HashMap<u64, Vec<&TermDef>> = HashMap::new();
        for term in &self.terms {
            terms.entry(term.owner).or_default().push(term);
        }

        for def in &self.particles {
            let mut particle = self.particle(def, &cluster)?;
            for term in terms.remove(&def.id).unwrap_or_default() {
                let atoms: Vec<EntityId> = term.atoms.iter().map(|&id| EntityId(id)).collect();
                particle
                    .topology
                    .push(term.kind, BondedTerm::new(term.type_id, atoms))?;
            }
            cluster.add_particle(particle)?;
        }

        if let Some(owner) = terms.keys().min() {
            return Err(Error::UnknownOwner(*owner));
        }

        debug!(
            particles = cluster.natoms(),
            ranks = cluster.rank_count(),
            "scenario built"
        );
        Ok(cluster)
    }

    fn particle(&self, def: &ParticleDef, cluster: &Cluster) -> Result<Particle> {
        let mut p = Particle::new(def.id, def.type_id, def.x);
        p.v = def.v;
        p.molecule = def.molecule;
        p.charge = def.charge;
        if let Some(mass) = def.mass {
            p.rmass = mass;
        }
        p.radius = def.radius;
        p.density = def.density;
        p.shape = def.shape.clone();
        p.mask = cluster
            .groups()
            .mask_of(def.groups.iter().map(String::as_str))?;

        for (name, spec) in cluster.schema().properties() {
            let values = match def.properties.get(name) {
                Some(values) if values.len() != spec.width => {
                    return Err(Error::InvalidScenario(format!(
                        "particle {} gives {} values for property {name} of width {}",
                        def.id,
                        values.len(),
                        spec.width
                    )));
                }
                Some(values) => values.clone(),
                None if spec.initialized => vec![0.0; spec.width],
                None => continue,
            };
            p.properties.insert(name.to_string(), values);
        }
        if let Some(name) = def
            .properties
            .keys()
            .find(|name| cluster.schema().property(name).is_none())
        {
            return Err(Error::InvalidScenario(format!(
                "particle {} sets undeclared property {name}",
                def.id
            )));
        }
        Ok(p)
    }
}
