//! `mwsat`: run Simulated Annealing on a weighted CNF instance.
//!
//! ```sh
//! mwsat -i data/wuf-small.mwcnf -t 50 -n 1000 -c 0.95
//! ```
//!
//! Prints one line to stdout:
//! `<satisfying:0|1> <sat> <unsat> <weight> <iterations> <seconds>`.
//! Progress is logged to stderr; set `RUST_LOG` or pass `-v`/`-vv`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_mwsat::formula::{self, WeightScoring};
use u_mwsat::sa::{NeighborStrategy, SaConfig, SaRunner};

#[derive(Parser, Debug)]
#[command(
    name = "mwsat",
    version,
    about = "Simulated Annealing for weighted MAX-SAT"
)]
struct Cli {
    /// Path to the `.mwcnf` instance file.
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Initial temperature.
    #[arg(short = 't', long = "init-temp", default_value_t = 50.0)]
    init_temp: f64,

    /// Final temperature.
    #[arg(short = 'f', long = "final-temp", default_value_t = 0.05)]
    final_temp: f64,

    /// Iteration budget.
    #[arg(short = 'n', long = "iterations", default_value_t = 1000)]
    iterations: usize,

    /// Geometric cooling factor in (0, 1).
    #[arg(short = 'c', long = "cool-factor", default_value_t = 0.95)]
    cool_factor: f64,

    /// Random seed. Defaults to the wall clock.
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Neighbor move.
    #[arg(long, value_enum, default_value_t = Neighbor::Mixed)]
    neighbor: Neighbor,

    /// Weight rule used for ordering and reporting.
    #[arg(long, value_enum, default_value_t = Scoring::Clauses)]
    scoring: Scoring,

    /// Also print the best assignment as signed literals.
    #[arg(short = 'a', long)]
    print_assignment: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Neighbor {
    Single,
    Uniform,
    Quarter,
    Mixed,
}

impl From<Neighbor> for NeighborStrategy {
    fn from(n: Neighbor) -> Self {
        match n {
            Neighbor::Single => NeighborStrategy::SingleFlip,
            Neighbor::Uniform => NeighborStrategy::UniformFlip,
            Neighbor::Quarter => NeighborStrategy::QuarterFlip,
            Neighbor::Mixed => NeighborStrategy::TemperatureMixed,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Scoring {
    /// Clause-local weight of true positive literals in satisfied clauses.
    Clauses,
    /// Sum of weights of true variables.
    Assignment,
}

impl From<Scoring> for WeightScoring {
    fn from(s: Scoring) -> Self {
        match s {
            Scoring::Clauses => WeightScoring::SatisfiedClauses,
            Scoring::Assignment => WeightScoring::Assignment,
        }
    }
}

impl Cli {
    fn config(&self) -> SaConfig {
        let mut config = SaConfig::default()
            .with_initial_temperature(self.init_temp)
            .with_final_temperature(self.final_temp)
            .with_max_iterations(self.iterations)
            .with_cool_factor(self.cool_factor)
            .with_neighbor(self.neighbor.into())
            .with_scoring(self.scoring.into());
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> u_mwsat::Result<()> {
    let instance = formula::load(&cli.input)?;
    info!(
        name = %instance.name,
        path = %cli.input.display(),
        "instance loaded"
    );

    let result = SaRunner::run(&instance.formula, &cli.config())?;
    println!("{result}");
    if cli.print_assignment {
        println!("{}", result.best.assignment());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
