//! Cluster - all ranks plus the state they share
//!
//! The cluster owns the simulation cell, the population schema, group and
//! region registries, and one [`Rank`] per worker. It never mutates particle
//! attributes itself; it only moves particles between ranks and builds ghost
//! replicas.

use crate::config::ClusterConfig;
use crate::error::{Error, Result};
use crate::partition::PartitionStrategy;
use crate::rank::{Rank, RankId};
use partix_core::{Domain, EntityId, Groups, Particle, Regions, Schema};
use tracing::debug;

/// Hook run when the host engine re-initializes before boundary operations
pub type InitHook = Box<dyn FnMut() + Send>;

/// Read-only view of the state shared by all ranks
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub schema: &'a Schema,
    pub domain: Option<&'a Domain>,
    pub groups: &'a Groups,
    pub regions: &'a Regions,
}

/// A set of ranks each owning a disjoint partition of the population
pub struct Cluster {
    config: ClusterConfig,
    domain: Option<Domain>,
    schema: Schema,
    groups: Groups,
    regions: Regions,
    ranks: Vec<Rank>,
    strategy: PartitionStrategy,
    init_hooks: Vec<InitHook>,
}

impl Cluster {
    /// Create an empty cluster with no cell defined
    pub fn new(config: ClusterConfig, schema: Schema) -> Self {
        let ranks = (0..config.rank_count()).map(|i| Rank::new(RankId(i))).collect();
        Self {
            config,
            domain: None,
            schema,
            groups: Groups::new(),
            regions: Regions::new(),
            ranks,
            strategy: PartitionStrategy::default(),
            init_hooks: Vec::new(),
        }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn set_domain(&mut self, domain: Domain) {
        self.domain = Some(domain);
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.domain.as_ref()
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut Groups {
        &mut self.groups
    }

    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    pub fn regions_mut(&mut self) -> &mut Regions {
        &mut self.regions
    }

    pub fn strategy(&self) -> &PartitionStrategy {
        &self.strategy
    }

    pub fn rank_count(&self) -> usize {
        self.ranks.len()
    }

    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    pub fn ranks_mut(&mut self) -> &mut [Rank] {
        &mut self.ranks
    }

    pub fn rank(&self, id: RankId) -> Result<&Rank> {
        self.ranks.get(id.0).ok_or(Error::RankNotFound(id))
    }

    /// Shared state alongside mutable access to every rank
    pub fn split_mut(&mut self) -> (Context<'_>, &mut [Rank]) {
        let ctx = Context {
            schema: &self.schema,
            domain: self.domain.as_ref(),
            groups: &self.groups,
            regions: &self.regions,
        };
        (ctx, &mut self.ranks)
    }

    pub fn context(&self) -> Context<'_> {
        Context {
            schema: &self.schema,
            domain: self.domain.as_ref(),
            groups: &self.groups,
            regions: &self.regions,
        }
    }

    /// Add a particle to the rank chosen by the partition strategy
    pub fn add_particle(&mut self, mut particle: Particle) -> Result<RankId> {
        if self.locate(particle.id).is_some() {
            return Err(partix_core::Error::DuplicateEntity(particle.id).into());
        }
        particle.mask |= Groups::all_bit();
        let r = self
            .strategy
            .assign_rank(&particle, self.domain.as_ref(), self.ranks.len());
        self.ranks[r].population.push_local(particle)?;
        Ok(RankId(r))
    }

    /// Total number of owned particles across ranks
    pub fn natoms(&self) -> usize {
        self.ranks.iter().map(|r| r.population.nlocal()).sum()
    }

    /// All owned particles, rank by rank
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.ranks.iter().flat_map(|r| r.population.locals())
    }

    /// Owning rank and owned copy of a particle
    pub fn locate(&self, id: EntityId) -> Option<(RankId, &Particle)> {
        self.ranks.iter().find_map(|rank| {
            let pop = &rank.population;
            pop.map(id)
                .filter(|&i| i < pop.nlocal())
                .map(|i| (rank.id, &pop.all()[i]))
        })
    }

    /// Register a re-initialization hook
    pub fn on_init(&mut self, hook: InitHook) {
        self.init_hooks.push(hook);
    }

    /// Run every re-initialization hook in registration order
    pub fn reinit(&mut self) {
        for hook in &mut self.init_hooks {
            hook();
        }
    }

    /// Wrap owned positions into the primary cell
    pub fn pbc(&mut self) -> Result<()> {
        let domain = self.domain.as_ref().ok_or(Error::NoDomain)?;
        for rank in &mut self.ranks {
            for p in rank.population.locals_mut() {
                domain.wrap(&mut p.x, &mut p.image);
            }
        }
        Ok(())
    }

    /// Move every owned particle to the rank the strategy assigns it to
    ///
    /// Ghosts are discarded.
    pub fn exchange(&mut self) -> Result<()> {
        let n = self.ranks.len();
        let mut moving = Vec::with_capacity(self.natoms());
        for rank in &mut self.ranks {
            moving.extend(rank.population.drain_locals());
        }
        for particle in moving {
            let r = self.strategy.assign_rank(&particle, self.domain.as_ref(), n);
            self.ranks[r].population.push_local(particle)?;
        }
        Ok(())
    }

    /// Rebuild ghost replicas on every rank
    ///
    /// A remote particle becomes a ghost on a rank when it lies within the
    /// ghost cutoff (minimum image) of any particle that rank owns. The ghost
    /// is stored at the periodic image nearest that owned particle.
    pub fn borders(&mut self) -> Result<()> {
        let domain = self.domain.as_ref().ok_or(Error::NoDomain)?;
        let cutoff = self.config.ghost_cutoff();

        let mut ghost_sets: Vec<Vec<Particle>> = vec![Vec::new(); self.ranks.len()];
        for (r, rank) in self.ranks.iter().enumerate() {
            let owned = rank.population.locals();
            for other in self.ranks.iter().filter(|o| o.id != rank.id) {
                for q in other.population.locals() {
                    if let Some(anchor) = owned.iter().find(|p| domain.distance(&p.x, &q.x) <= cutoff) {
                        let mut ghost = q.clone();
                        ghost.x = domain.nearest_image(&anchor.x, &q.x);
                        ghost_sets[r].push(ghost);
                    }
                }
            }
        }

        for (rank, ghosts) in self.ranks.iter_mut().zip(ghost_sets) {
            rank.population.set_ghosts(ghosts);
        }
        Ok(())
    }

    /// Switch partition strategy and migrate particles accordingly
    pub fn redistribute(&mut self, strategy: PartitionStrategy) -> Result<()> {
        debug!(?strategy, "redistributing particles");
        self.strategy = strategy;
        self.exchange()
    }

    /// Full resynchronization: re-init, wrap, migrate, build ghosts
    pub fn synchronize(&mut self) -> Result<()> {
        debug!(hooks = self.init_hooks.len(), "system init before boundary exchange");
        self.reinit();
        self.pbc()?;
        self.exchange()?;
        self.borders()?;
        debug!(
            ghosts = self.ranks.iter().map(|r| r.population.nghost()).sum::<usize>(),
            "boundary exchange complete"
        );
        Ok(())
    }
}

impl std::fmt::Debug for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cluster")
            .field("ranks", &self.ranks.len())
            .field("natoms", &self.natoms())
            .field("domain", &self.domain)
            .field("strategy", &self.strategy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partix_core::Axis;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn cluster(ranks: usize) -> Cluster {
        let config = ClusterConfig::with_rank_count(ranks).with_ghost_cutoff(1.5);
        let domain = Domain::new([0.0; 3], [8.0; 3]).with_periodic([false, true, true]);
        let mut cluster = Cluster::new(config, Schema::default()).with_domain(domain);
        for i in 0..8u64 {
            cluster
                .add_particle(Particle::new(i + 1, 1, [i as f64 + 0.5, 4.0, 4.0]))
                .unwrap();
        }
        cluster
    }

    #[test]
    fn test_add_assigns_by_slab() {
        let cluster = cluster(4);
        assert_eq!(cluster.natoms(), 8);
        for rank in cluster.ranks() {
            assert_eq!(rank.population.nlocal(), 2);
        }
        assert_eq!(cluster.locate(EntityId(5)).map(|(r, _)| r), Some(RankId(2)));
        assert!(cluster.locate(EntityId(42)).is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut cluster = cluster(2);
        let err = cluster
            .add_particle(Particle::new(3, 1, [0.0; 3]))
            .unwrap_err();
        assert_eq!(err, Error::Core(partix_core::Error::DuplicateEntity(EntityId(3))));
    }

    #[test]
    fn test_redistribute_keeps_everything() {
        let mut cluster = cluster(4);
        cluster.redistribute(PartitionStrategy::by_id()).unwrap();
        assert_eq!(cluster.natoms(), 8);
        assert_eq!(cluster.locate(EntityId(5)).map(|(r, _)| r), Some(RankId(1)));
    }

    #[test]
    fn test_borders_replicates_neighbors() {
        let mut cluster = cluster(4);
        cluster.borders().unwrap();

        // rank 1 owns x = 2.5, 3.5 and sees 1.5 and 4.5 within 1.5
        let rank1 = cluster.rank(RankId(1)).unwrap();
        let mut ghost_ids: Vec<_> = rank1.population.ghosts().iter().map(|p| p.id.raw()).collect();
        ghost_ids.sort();
        assert_eq!(ghost_ids, vec![2, 5]);
        assert!(rank1.population.map(EntityId(8)).is_none());
    }

    #[test]
    fn test_borders_periodic_image() {
        let config = ClusterConfig::with_rank_count(2).with_ghost_cutoff(1.0);
        let domain = Domain::new([0.0; 3], [8.0; 3]);
        let mut cluster = Cluster::new(config, Schema::default()).with_domain(domain);
        cluster.redistribute(PartitionStrategy::slabs(Axis::Y)).unwrap();
        cluster.add_particle(Particle::new(1, 1, [4.0, 0.2, 4.0])).unwrap();
        cluster.add_particle(Particle::new(2, 1, [4.0, 7.8, 4.0])).unwrap();
        cluster.borders().unwrap();

        let rank0 = cluster.rank(RankId(0)).unwrap();
        assert_eq!(rank0.population.nghost(), 1);
        let ghost = &rank0.population.ghosts()[0];
        assert_eq!(ghost.id, EntityId(2));
        assert!((ghost.x[1] - -0.2).abs() < 1e-12);
    }

    #[test]
    fn test_synchronize_runs_hooks_and_wraps() {
        let mut cluster = cluster(2);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        cluster.on_init(Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        let idx = cluster.ranks()[0].population.map(EntityId(1)).unwrap();
        cluster.ranks_mut()[0].population.locals_mut()[idx].x[1] = 9.0;

        cluster.synchronize().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let (_, p) = cluster.locate(EntityId(1)).unwrap();
        assert_eq!(p.x[1], 1.0);
        assert_eq!(p.image[1], 1);
    }

    #[test]
    fn test_boundary_ops_need_domain() {
        let mut cluster = Cluster::new(ClusterConfig::default(), Schema::default());
        assert_eq!(cluster.pbc(), Err(Error::NoDomain));
        assert_eq!(cluster.synchronize(), Err(Error::NoDomain));
    }
}
