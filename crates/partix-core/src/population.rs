//! Per-rank particle store: owned particles followed by ghost replicas

use crate::{EntityId, Error, Particle, Result};
use std::collections::HashMap;

/// Particles held by one rank
///
/// Indices `0..nlocal` are owned; indices `nlocal..len` are ghosts. Only the
/// owned block is exposed mutably.
#[derive(Debug, Clone, Default)]
pub struct Population {
    particles: Vec<Particle>,
    nlocal: usize,
    /// id -> index, owned copies win over ghosts
    map: HashMap<EntityId, usize>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a population from owned particles
    pub fn from_locals(particles: Vec<Particle>) -> Result<Self> {
        let mut pop = Self::new();
        for p in particles {
            pop.push_local(p)?;
        }
        Ok(pop)
    }

    /// Add an owned particle; drops any ghosts first
    pub fn push_local(&mut self, particle: Particle) -> Result<()> {
        self.clear_ghosts();
        if self.map.contains_key(&particle.id) {
            return Err(Error::DuplicateEntity(particle.id));
        }
        self.map.insert(particle.id, self.particles.len());
        self.particles.push(particle);
        self.nlocal += 1;
        Ok(())
    }

    /// Replace the ghost block
    pub fn set_ghosts(&mut self, ghosts: Vec<Particle>) {
        self.clear_ghosts();
        for ghost in ghosts {
            let index = self.particles.len();
            self.map.entry(ghost.id).or_insert(index);
            self.particles.push(ghost);
        }
    }

    pub fn clear_ghosts(&mut self) {
        if self.particles.len() == self.nlocal {
            return;
        }
        self.particles.truncate(self.nlocal);
        let nlocal = self.nlocal;
        self.map.retain(|_, index| *index < nlocal);
    }

    /// Remove and return all owned particles (ghosts are discarded)
    pub fn drain_locals(&mut self) -> Vec<Particle> {
        self.clear_ghosts();
        self.map.clear();
        self.nlocal = 0;
        std::mem::take(&mut self.particles)
    }

    /// Number of owned particles
    pub fn nlocal(&self) -> usize {
        self.nlocal
    }

    /// Number of ghost replicas
    pub fn nghost(&self) -> usize {
        self.particles.len() - self.nlocal
    }

    /// Size of the owned + ghost index space
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Owned particles
    pub fn locals(&self) -> &[Particle] {
        &self.particles[..self.nlocal]
    }

    pub fn locals_mut(&mut self) -> &mut [Particle] {
        &mut self.particles[..self.nlocal]
    }

    pub fn ghosts(&self) -> &[Particle] {
        &self.particles[self.nlocal..]
    }

    /// Owned particles followed by ghosts
    pub fn all(&self) -> &[Particle] {
        &self.particles
    }

    /// Index of a particle by id, owned copies first
    pub fn map(&self, id: EntityId) -> Option<usize> {
        self.map.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(id: u64) -> Particle {
        Particle::new(id, 1, [id as f64, 0.0, 0.0])
    }

    #[test]
    fn test_locals_and_ghosts() {
        let mut pop = Population::from_locals(vec![particle(1), particle(2)]).unwrap();
        pop.set_ghosts(vec![particle(7), particle(8)]);

        assert_eq!(pop.nlocal(), 2);
        assert_eq!(pop.nghost(), 2);
        assert_eq!(pop.len(), 4);
        assert_eq!(pop.map(EntityId(2)), Some(1));
        assert_eq!(pop.map(EntityId(8)), Some(3));
        assert_eq!(pop.map(EntityId(9)), None);

        pop.clear_ghosts();
        assert_eq!(pop.len(), 2);
        assert_eq!(pop.map(EntityId(8)), None);
    }

    #[test]
    fn test_owned_copy_wins() {
        let mut pop = Population::from_locals(vec![particle(1)]).unwrap();
        pop.set_ghosts(vec![particle(1)]);
        assert_eq!(pop.map(EntityId(1)), Some(0));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut pop = Population::new();
        pop.push_local(particle(1)).unwrap();
        assert_eq!(
            pop.push_local(particle(1)),
            Err(Error::DuplicateEntity(EntityId(1)))
        );
    }

    #[test]
    fn test_drain() {
        let mut pop = Population::from_locals(vec![particle(1), particle(2)]).unwrap();
        pop.set_ghosts(vec![particle(3)]);
        let drained = pop.drain_locals();
        assert_eq!(drained.len(), 2);
        assert!(pop.is_empty());
        assert_eq!(pop.map(EntityId(1)), None);
    }
}
