//! Set Runner Demo
//!
//! Loads a RON scenario into a multi-rank cluster, runs the scenario's own
//! set commands followed by any given with `--set`, and prints the report of
//! each keyword plus a per-rank summary.

mod logging;

use clap::Parser;
use partix_core::TermKind;
use partix_hub::partition::PartitionStrategy;
use partix_hub::Cluster;
use partix_script::ScenarioDef;
use partix_set::Severity;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "set_runner",
    version,
    about = "Run set commands against a particle scenario"
)]
struct Cli {
    /// Scenario file (RON)
    scenario: PathBuf,

    /// Extra set command, e.g. "atom 1*5 charge 0.5"; may be repeated
    #[arg(short, long = "set", value_name = "COMMAND")]
    set: Vec<String>,

    /// Redistribute round-robin by id before running commands
    #[arg(long)]
    by_id: bool,

    /// Skip the commands stored in the scenario file
    #[arg(long)]
    skip_scenario_commands: bool,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let scenario = match ScenarioDef::load_file(&cli.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("{}: {e}", cli.scenario.display());
            return ExitCode::from(2);
        }
    };
    let mut cluster = match scenario.build() {
        Ok(cluster) => cluster,
        Err(e) => {
            eprintln!("{}: {e}", cli.scenario.display());
            return ExitCode::from(2);
        }
    };
    if cli.by_id {
        if let Err(e) = cluster.redistribute(PartitionStrategy::by_id()) {
            eprintln!("redistribute: {e}");
            return ExitCode::from(2);
        }
    }

    println!("=== partix set runner ===");
    println!(
        "{} particles on {} ranks\n",
        cluster.natoms(),
        cluster.rank_count()
    );

    let stored = if cli.skip_scenario_commands {
        &[][..]
    } else {
        &scenario.commands[..]
    };
    for line in stored.iter().chain(&cli.set) {
        println!("set {line}");
        match partix_set::run_line(&mut cluster, line) {
            Ok(reports) => {
                for report in reports {
                    println!("{report}");
                }
            }
            Err(e) => {
                error!(command = %line, "aborting run");
                let scope = match e.severity() {
                    Severity::RunFatal => "ERROR",
                    Severity::ProcessLocal => "ERROR on proc",
                };
                eprintln!("{scope}: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    print_summary(&cluster);
    ExitCode::SUCCESS
}

fn print_summary(cluster: &Cluster) {
    println!("\n{:<8} {:>6} {:>6} {:>6}", "rank", "owned", "ghost", "terms");
    for rank in cluster.ranks() {
        let terms: usize = rank
            .population
            .locals()
            .iter()
            .map(|p| {
                TermKind::ALL
                    .iter()
                    .map(|&k| p.topology.terms(k).len())
                    .sum::<usize>()
            })
            .sum();
        println!(
            "{:<8} {:>6} {:>6} {:>6}",
            rank.id.to_string(),
            rank.population.nlocal(),
            rank.population.nghost(),
            terms
        );
    }
}
