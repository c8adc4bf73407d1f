use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use snake_sim::{EvaluationPlan, RandomBrain, SimulationConfig, evaluate_population, log, summarize};

/// Optional JSON file: `{ "simulation": {...}, "evaluation": {...} }`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RunFile {
    simulation: SimulationConfig,
    evaluation: EvaluationPlan,
}

fn main() -> Result<()> {
    log::init();

    let run = match std::env::args().nth(1) {
        Some(path) => {
            let content =
                std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            let run: RunFile =
                serde_json::from_str(&content).with_context(|| format!("parsing {path}"))?;
            info!(%path, "loaded run file");
            run
        }
        None => {
            warn!("no run file given, using defaults");
            RunFile::default()
        }
    };
    run.simulation.validate()?;

    let plan = &run.evaluation;
    let mut brains: Vec<RandomBrain> = (0..plan.population_size as u64)
        .map(|i| RandomBrain::new(plan.master_seed.wrapping_add(i)))
        .collect();

    let reports = evaluate_population(plan, &run.simulation, &mut brains)?;
    let stats = summarize(&reports);
    info!(min = stats.min, max = stats.max, mean = stats.mean, "🐍 batch done");

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
