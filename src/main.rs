use anyhow::Result;
use cellula_lib::model::metrics::init_logging;
use cellula_lib::model::simulation::Simulation;
use cellula_lib::runner::{self, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Generations to run (overrides `[simulation].generations`)
    #[arg(short, long)]
    generations: Option<u64>,

    /// Output format for each generation
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print only the final population
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = runner::load_config(&args.config)?;
    let generations = args.generations.unwrap_or(config.simulation.generations);
    let mut sim = Simulation::from_config(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner::run(&mut sim, generations, args.format, args.quiet, &mut out)
}
