//! Set command dispatch
//!
//! Checks the command-level preconditions, then parses and applies keywords
//! one at a time, left to right. A keyword is fully validated before any
//! particle is touched; a failure stops the command, leaving the keywords
//! already applied in place.

use crate::error::{Error, Result};
use crate::mutate::{self, MutateContext};
use crate::parse::parse_keyword;
use crate::random::apply_random;
use crate::request::{Assignment, Route, Selection, Style};
use crate::select::Predicate;
use crate::topology::apply_topology;
use partix_core::Population;
use partix_hub::{all_reduce_sum, Cluster};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Cluster-wide outcome of one keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReport {
    /// Keyword token as given on the command line
    pub keyword: String,
    /// Particles (or bonded terms) changed across all ranks
    pub count: u64,
}

impl fmt::Display for SetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {} settings made for {}", self.count, self.keyword)
    }
}

/// Run one set command: `<style> <id> <keyword> <values...> ...`
pub fn run(cluster: &mut Cluster, args: &[&str]) -> Result<Vec<SetReport>> {
    let result = dispatch(cluster, args);
    if let Err(e) = &result {
        warn!(error = %e, severity = ?e.severity(), "set command failed");
    }
    result
}

/// Run a whitespace-separated set command, with or without the leading `set`
pub fn run_line(cluster: &mut Cluster, line: &str) -> Result<Vec<SetReport>> {
    let mut args: Vec<&str> = line.split_whitespace().collect();
    if args.first() == Some(&"set") {
        args.remove(0);
    }
    run(cluster, &args)
}

fn dispatch(cluster: &mut Cluster, args: &[&str]) -> Result<Vec<SetReport>> {
    if cluster.domain().is_none() {
        return Err(Error::NoDomain);
    }
    if cluster.natoms() == 0 {
        return Err(Error::NoAtoms);
    }
    if args.len() < 3 {
        return Err(Error::Illegal(format!(
            "expected a style, an id and at least one keyword, got {} argument(s)",
            args.len()
        )));
    }
    let style: Style = args[0].parse()?;
    let selection = Selection::new(style, args[1]);

    let mut reports = Vec::new();
    let mut i = 2;
    while i < args.len() {
        let (assignment, consumed) = parse_keyword(&args[i..], cluster.context())?;
        debug!(keyword = args[i], ?assignment, "keyword validated");

        let count = execute(cluster, &selection, &assignment)?;
        let report = SetReport {
            keyword: args[i].to_string(),
            count,
        };
        info!(keyword = %report.keyword, count, "{report}");
        reports.push(report);
        i += consumed;
    }
    Ok(reports)
}

fn execute(cluster: &mut Cluster, selection: &Selection, assignment: &Assignment) -> Result<u64> {
    match assignment.route() {
        Route::Direct => apply_owned(cluster, selection, assignment, mutate::apply),
        Route::Random => apply_owned(cluster, selection, assignment, apply_random),
        Route::Topology { kind, type_id } => apply_topology(cluster, selection, kind, type_id),
    }
}

type ApplyFn =
    fn(&mut Population, &[bool], &Assignment, MutateContext<'_>) -> partix_core::Result<u64>;

/// Run `apply` over the owned particles of every rank and sum the counts
fn apply_owned(
    cluster: &mut Cluster,
    selection: &Selection,
    assignment: &Assignment,
    apply: ApplyFn,
) -> Result<u64> {
    let (ctx, ranks) = cluster.split_mut();
    let predicate = Predicate::compile(selection, ctx)?;
    let mctx = MutateContext::from_context(ctx);

    let mut counts = Vec::with_capacity(ranks.len());
    for rank in ranks.iter_mut() {
        let mask = predicate.mask(rank.population.locals());
        let changed =
            apply(&mut rank.population, &mask, assignment, mctx).map_err(|source| Error::Local {
                rank: rank.id,
                source,
            })?;
        counts.push(changed);
    }
    Ok(all_reduce_sum(counts))
}
