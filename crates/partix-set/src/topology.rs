//! Bonded-term type edits
//!
//! Partners of a term may be owned by another rank, so the cluster is fully
//! resynchronized first and the predicate is evaluated over owned particles
//! and ghosts alike. A term changes type only when every participant is
//! selected; for bonds the owning particle counts as a participant.

use crate::error::{Error, Result};
use crate::request::Selection;
use crate::select::Predicate;
use partix_core::{Population, TermKind};
use partix_hub::{all_reduce_sum, Cluster, RankId};
use tracing::debug;

/// Retype every `kind` term whose participants all match `selection`
///
/// Returns the cluster-wide number of terms changed.
pub fn apply_topology(
    cluster: &mut Cluster,
    selection: &Selection,
    kind: TermKind,
    type_id: i32,
) -> Result<u64> {
    cluster.synchronize()?;

    let (ctx, ranks) = cluster.split_mut();
    let predicate = Predicate::compile(selection, ctx)?;

    let mut pending = Vec::with_capacity(ranks.len());
    for rank in ranks.iter() {
        pending.push(selected_terms(&rank.population, rank.id, &predicate, kind)?);
    }

    let mut counts = Vec::with_capacity(ranks.len());
    for (rank, updates) in ranks.iter_mut().zip(pending) {
        let locals = rank.population.locals_mut();
        for &(i, t) in &updates {
            locals[i].topology.terms_mut(kind)[t].type_id = type_id;
        }
        debug!(rank = %rank.id, %kind, changed = updates.len(), "bonded terms retyped");
        counts.push(updates.len() as u64);
    }
    Ok(all_reduce_sum(counts))
}

/// `(particle index, term index)` of every term whose participants all match
fn selected_terms(
    pop: &Population,
    rank: RankId,
    predicate: &Predicate<'_>,
    kind: TermKind,
) -> Result<Vec<(usize, usize)>> {
    let mask = predicate.mask(pop.all());
    let mut updates = Vec::new();
    for (i, p) in pop.locals().iter().enumerate() {
        for (t, term) in p.topology.terms(kind).iter().enumerate() {
            let mut selected = !kind.includes_owner() || mask[i];
            for &id in &term.atoms {
                let index = pop
                    .map(id)
                    .ok_or(Error::MissingPartner { rank, kind, id })?;
                selected &= mask[index];
            }
            if selected {
                updates.push((i, t));
            }
        }
    }
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Style;
    use partix_core::{
        BondedTerm, Capabilities, Domain, EntityId, Particle, Schema, TypeCounts,
    };
    use partix_hub::ClusterConfig;

    /// A chain of 6 particles along x, each bonded to the next, with one angle per triple
    fn chain(ranks: usize, cutoff: f64) -> Cluster {
        let schema = Schema::new(
            Capabilities {
                tags: true,
                bonds: true,
                angles: true,
                ..Default::default()
            },
            TypeCounts {
                atom: 1,
                bond: 3,
                angle: 3,
                ..Default::default()
            },
        );
        let config = ClusterConfig::with_rank_count(ranks).with_ghost_cutoff(cutoff);
        let mut cluster =
            Cluster::new(config, schema).with_domain(Domain::new([0.0; 3], [6.0; 3]));
        for i in 1..=6u64 {
            let mut p = Particle::new(i, 1, [i as f64 - 0.5, 3.0, 3.0]);
            if i < 6 {
                p.topology
                    .push(TermKind::Bond, BondedTerm::new(1, vec![EntityId(i + 1)]))
                    .unwrap();
            }
            if (2..6).contains(&i) {
                let atoms = vec![EntityId(i - 1), EntityId(i), EntityId(i + 1)];
                p.topology
                    .push(TermKind::Angle, BondedTerm::new(1, atoms))
                    .unwrap();
            }
            cluster.add_particle(p).unwrap();
        }
        cluster
    }

    fn types(cluster: &Cluster, kind: TermKind) -> Vec<(u64, i32)> {
        let mut out: Vec<_> = cluster
            .particles()
            .flat_map(|p| p.topology.terms(kind).iter().map(move |t| (p.id.raw(), t.type_id)))
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_bond_needs_both_ends() {
        let mut cluster = chain(3, 1.5);
        let n = apply_topology(&mut cluster, &Selection::new(Style::Atom, "2*4"), TermKind::Bond, 2)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            types(&cluster, TermKind::Bond),
            vec![(1, 1), (2, 2), (3, 2), (4, 1), (5, 1)]
        );
    }

    #[test]
    fn test_angle_needs_all_three() {
        let mut cluster = chain(2, 1.5);
        let n = apply_topology(&mut cluster, &Selection::new(Style::Atom, "1*4"), TermKind::Angle, 3)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            types(&cluster, TermKind::Angle),
            vec![(2, 3), (3, 3), (4, 1), (5, 1)]
        );

        // dropping one participant blocks the edit
        let mut cluster = chain(2, 1.5);
        let n = apply_topology(&mut cluster, &Selection::new(Style::Atom, "2*4"), TermKind::Angle, 3)
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn test_missing_partner_is_process_local() {
        let mut cluster = chain(3, 0.1);
        let err = apply_topology(&mut cluster, &Selection::new(Style::Atom, "*"), TermKind::Bond, 2)
            .unwrap_err();
        assert!(matches!(err, Error::MissingPartner { kind: TermKind::Bond, .. }));
        assert!(!err.is_run_fatal());
        assert!(types(&cluster, TermKind::Bond).iter().all(|&(_, t)| t == 1));
    }
}
