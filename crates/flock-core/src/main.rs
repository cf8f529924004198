//! Headless flocking simulation runner.
//!
//! Runs a fixed number of ticks and writes JSON snapshots for an
//! external renderer to pick up.

use clap::Parser;
use std::path::{Path, PathBuf};

use flock_core::config::{ConfigError, SimParams};
use flock_core::output;
use flock_core::Simulation;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "flock_sim")]
#[command(about = "A headless flocking simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Interval between world snapshots (in ticks)
    #[arg(long, default_value_t = 50)]
    snapshot_interval: u64,

    /// Parameter file (TOML); built-in defaults apply when it is absent
    #[arg(long, default_value = flock_core::config::DEFAULT_PARAMS_PATH)]
    params: PathBuf,

    /// Override the number of agents
    #[arg(long)]
    n_agents: Option<u32>,

    /// Override the world side length
    #[arg(long)]
    world_side: Option<f32>,

    /// Output directory for snapshots
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_params(args: &Args) -> Result<SimParams, ConfigError> {
    let mut params = if args.params.exists() {
        SimParams::from_file(&args.params)?
    } else {
        SimParams::default()
    };
    if let Some(n_agents) = args.n_agents {
        params.n_agents = n_agents;
    }
    if let Some(world_side) = args.world_side {
        params.world_side = world_side;
    }
    params.validate()?;
    Ok(params)
}

fn write_outputs(sim: &mut Simulation, triggered_by: &str, output_dir: &Path) {
    let snapshot = sim.snapshot(triggered_by);
    if let Err(e) = output::write_snapshot_to_dir(&snapshot, output_dir) {
        eprintln!("Warning: could not write snapshot: {}", e);
    }
    if let Err(e) = output::write_current_state(&snapshot, output_dir) {
        eprintln!("Warning: could not write current state: {}", e);
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let params = match load_params(&args) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Invalid parameters: {}", e);
            std::process::exit(1);
        }
    };

    println!("Flock Simulation");
    println!("================");
    println!("Seed: {}", args.seed);
    println!("Ticks: {}", args.ticks);
    println!("Snapshot interval: {}", args.snapshot_interval);
    println!("Agents: {}", params.n_agents);
    println!("World side: {}", params.world_side);
    println!();

    let mut sim = Simulation::new(params, args.seed);
    sim.set_snapshot_interval(args.snapshot_interval);
    println!("Spawned {} agents", sim.agent_count());

    write_outputs(&mut sim, "simulation_start", &args.output_dir);

    println!();
    println!("Starting simulation...");
    sim.start();
    while sim.current_tick() < args.ticks {
        if !sim.try_tick() {
            break;
        }
        if sim.should_snapshot() {
            write_outputs(&mut sim, "interval", &args.output_dir);
            println!("  tick {}: snapshot written", sim.current_tick());
        }
    }
    sim.stop();

    write_outputs(&mut sim, "simulation_end", &args.output_dir);
    println!();
    println!(
        "Finished at tick {} with {} agents",
        sim.current_tick(),
        sim.agent_count()
    );
}
