//! AHP Team Simulation
//!
//! Generates (or loads) a world, assesses every member of one team and prints
//! how their chosen activities shift as the secure-to-invasive ratio moves.

use ahp_reasoning::{World, WorldFactory};
use ahp_sim::{format_table, SimConfig, Simulation};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "ahp-sim")]
#[command(about = "Sweep a team's strategic preference over a generated world")]
struct Args {
    /// Tuning file; built-in defaults are used when it is missing
    #[arg(long, default_value = ahp_sim::DEFAULT_TUNING_PATH)]
    config: PathBuf,

    /// Random seed for world generation, overrides the tuning file
    #[arg(long)]
    seed: Option<u64>,

    /// Load a saved world instead of generating one
    #[arg(long)]
    world: Option<PathBuf>,

    /// Save the world used for this run
    #[arg(long)]
    save_world: Option<PathBuf>,

    /// First secure-to-invasive ratio of the sweep
    #[arg(long)]
    sweep_start: Option<f64>,

    /// Last secure-to-invasive ratio of the sweep
    #[arg(long)]
    sweep_end: Option<f64>,

    /// Number of ratios in the sweep
    #[arg(long)]
    sweep_steps: Option<usize>,

    /// Write the sweep report as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut config = if args.config.exists() {
        SimConfig::load(&args.config)?
    } else {
        warn!(path = %args.config.display(), "tuning file not found, using defaults");
        SimConfig::default()
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    let sweep = &mut config.simulation.sweep;
    sweep.start = args.sweep_start.unwrap_or(sweep.start);
    sweep.end = args.sweep_end.unwrap_or(sweep.end);
    sweep.steps = args.sweep_steps.unwrap_or(sweep.steps);
    config.validate()?;

    let world = match &args.world {
        Some(path) => {
            info!(path = %path.display(), "loading world");
            World::load(path)?
        }
        None => {
            info!(seed = config.simulation.seed, "generating world");
            WorldFactory::new(config.world.clone(), config.simulation.seed).populate()?
        }
    };
    info!(
        agents = world.agent_count(),
        teams = world.team_count(),
        resources = world.resources().len(),
        "world ready"
    );

    if let Some(path) = &args.save_world {
        world.save(path)?;
        info!(path = %path.display(), "saved world");
    }

    let mut simulation = Simulation::new(&config, &world)?;
    let ratios = config.simulation.sweep.ratios();
    let report = simulation.sweep(config.simulation.seed, &ratios)?;

    println!("{}", format_table(&report));

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!(path = %path.display(), "wrote report");
    }

    Ok(())
}
