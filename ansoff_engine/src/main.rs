/// Ansoff Engine — Scripted Run Harness
///
/// Plays a seeded run from the command line and prints each quarter,
/// then the canonical hash of the final state.

use std::error::Error;
use std::fs;
use std::process;

use clap::Parser;
use serde_json::{Map, Value};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ansoff_engine::domain::Kpi;
use ansoff_engine::invariants::validate_invariants;
use ansoff_engine::{Allocation, EngineError, QuarterEngine, SimulationConfig};

/// Ansoff growth-strategy simulation harness
#[derive(Parser, Debug)]
#[command(name = "ansoff-sim")]
#[command(about = "Play a seeded Ansoff strategy run", long_about = None)]
struct Args {
    /// Seed for the engine RNG
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Points per quarter (overrides the config file)
    #[arg(short, long)]
    budget: Option<i64>,

    /// Number of quarters (overrides the config file)
    #[arg(short = 'q', long)]
    max_quarters: Option<u32>,

    /// JSON config file with `budget` and/or `max_quarters`
    #[arg(short, long)]
    config: Option<String>,

    /// Allocation for one quarter as A,B,C,D; repeat per quarter
    #[arg(short, long = "alloc", value_parser = parse_allocation)]
    allocations: Vec<Allocation>,

    /// Verbose output (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,

    /// Print the final run as JSON
    #[arg(long)]
    json: bool,
}

fn parse_allocation(s: &str) -> Result<Allocation, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!("expected A,B,C,D, got {:?}", s));
    }
    let mut points = [0i64; 4];
    for (slot, part) in points.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("bad points {:?}: {}", part, e))?;
    }
    Ok(Allocation::new(points[0], points[1], points[2], points[3]))
}

fn load_config(args: &Args) -> Result<SimulationConfig, EngineError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                EngineError::InvalidConfig(format!("cannot read {}: {}", path, e))
            })?;
            SimulationConfig::from_json_str(&text)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(budget) = args.budget {
        config.budget = budget;
    }
    if let Some(max_quarters) = args.max_quarters {
        config.max_quarters = max_quarters;
    }
    config.validate()?;
    Ok(config)
}

/// Final run as a snapshot document: config, quarter, capabilities, kpis,
/// last_shock, history.
fn snapshot_document(engine: &QuarterEngine) -> Result<Map<String, Value>, serde_json::Error> {
    let state = engine.state();
    let mut doc = Map::new();
    doc.insert("config".to_string(), serde_json::to_value(engine.config())?);
    doc.insert("quarter".to_string(), Value::from(state.quarter));
    doc.insert("capabilities".to_string(), serde_json::to_value(&state.capabilities)?);
    doc.insert("kpis".to_string(), serde_json::to_value(&state.kpis)?);
    doc.insert("last_shock".to_string(), serde_json::to_value(&state.last_shock)?);
    doc.insert("history".to_string(), serde_json::to_value(engine.history())?);
    Ok(doc)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let mut engine = QuarterEngine::from_seed(config.clone(), args.seed)?;

    let plan: Vec<Allocation> = if args.allocations.is_empty() {
        vec![Allocation::even_split(config.budget); config.max_quarters as usize]
    } else {
        args.allocations.clone()
    };

    info!(seed = args.seed, quarters = plan.len(), "starting run");

    for alloc in &plan {
        let outcome = engine.advance(alloc)?;
        if !args.json {
            println!(
                "Quarter {} | A {} B {} C {} D {} | shock: {}",
                outcome.quarter, alloc.a, alloc.b, alloc.c, alloc.d, outcome.shock.title
            );
            for kpi in Kpi::ALL {
                println!("  {:<16} {:>8.2}", kpi.label(), engine.kpis().get(kpi));
            }
        }
    }

    validate_invariants(engine.state(), engine.history());

    if args.json {
        info!(hash = %engine.current_hash(), "final state");
        let doc = Value::Object(snapshot_document(&engine)?);
        println!("{}", doc);
    } else {
        println!(
            "\nQuarter {} of {} | hash {}",
            engine.display_quarter(),
            config.max_quarters,
            engine.current_hash()
        );
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if let Err(err) = run(&args) {
        error!(%err, "run failed");
        process::exit(1);
    }
}
