use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use seir_model::{
    EpidemicModel, InitialSusceptible, ModelConfig, OBSERVED_RATE_COUNT, SolverConfig, SolverMethod,
};

mod output;

use output::Format;

#[derive(Parser)]
#[command(name = "seir-sim")]
#[command(about = "Simulate an SEIR epidemic with scheduled interventions", long_about = None)]
struct Cli {
    /// Model config TOML file (defaults to the built-in demo population)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of days to simulate, reported on a daily grid starting at day 0
    #[arg(short, long, default_value_t = 365)]
    days: u32,

    /// Reproduction number applied to every intervention interval
    #[arg(short, long, default_value_t = 3.0)]
    rate: f64,

    /// Initial exposed count
    #[arg(long, default_value_t = 0.0)]
    e0: f64,

    /// Derive the initial susceptible count so the starting state sums to N
    #[arg(long)]
    corrected: bool,

    /// Integration method
    #[arg(long, value_enum, default_value_t = Method::Dop853)]
    method: Method,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Tsv)]
    format: Format,

    /// Print the aggregate E + I + R series instead of all four compartments
    #[arg(long)]
    observe: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    Dopri5,
    Dop853,
}

impl From<Method> for SolverMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Dopri5 => SolverMethod::Dopri5,
            Method::Dop853 => SolverMethod::Dop853,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = if let Some(path) = &cli.config {
        ModelConfig::from_file(path)?
    } else {
        ModelConfig::default()
    };
    if cli.corrected {
        config.initial_susceptible = InitialSusceptible::Corrected;
    }

    let model = EpidemicModel::new(config).context("invalid model configuration")?;
    let solver = SolverConfig::default().with_method(cli.method.into());

    let times: Vec<f64> = (0..cli.days).map(f64::from).collect();
    let rates = vec![cli.rate; model.schedule().rate_count()];

    // Same series as `EpidemicModel::observe` with every rate equal.
    ensure!(
        !cli.observe || rates.len() == OBSERVED_RATE_COUNT,
        "--observe needs {OBSERVED_RATE_COUNT} intervention intervals, config has {}",
        rates.len(),
    );

    log::info!(
        "simulating {} day(s) of N={} at R={} (e0={})",
        cli.days,
        model.population(),
        cli.rate,
        cli.e0,
    );

    let trajectory = model
        .integrate_with(&times, &rates, cli.e0, &solver)
        .context("integration failed")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.observe {
        output::write_affected(&mut out, &trajectory, cli.format)?;
    } else {
        output::write_trajectory(&mut out, &trajectory, cli.format)?;
    }

    out.flush()?;
    Ok(())
}
