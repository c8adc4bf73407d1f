use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::brain::Brain;
use crate::config::SimulationConfig;
use crate::error::ConfigurationError;
use crate::game::{EndReason, Simulation, Status};
use crate::utils::{Stats, vec_stats};

/// How a population gets evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationPlan {
    pub population_size: usize,
    /// Seeds the generator that hands out per-run seeds.
    pub master_seed: u64,
    /// Every individual plays the same board when set.
    pub same_environment: bool,
    /// Caller-side cap on ticks per run. The engine itself has none.
    pub tick_limit: Option<u64>,
}

impl Default for EvaluationPlan {
    fn default() -> Self {
        Self {
            population_size: 20,
            master_seed: 777,
            same_environment: false,
            tick_limit: Some(2000),
        }
    }
}

/// Outcome of one run, in the order brains were given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub score: f64,
    pub ticks: u64,
    pub length: usize,
    pub status: Status,
    pub end_reason: Option<EndReason>,
}

/// Seeds for `count` runs drawn from `master_seed`: one shared seed when
/// `same_environment`, otherwise one per run.
pub fn derive_seeds(master_seed: u64, count: usize, same_environment: bool) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(master_seed);
    if same_environment {
        let shared = rng.gen_range(1..=1_000_000u64);
        vec![shared; count]
    } else {
        (0..count).map(|_| rng.gen_range(1..=1_000_000u64)).collect()
    }
}

/// Runs one simulation per brain in parallel. Each run gets `base` with its
/// own derived seed; nothing is shared between runs.
pub fn evaluate_population<B>(
    plan: &EvaluationPlan,
    base: &SimulationConfig,
    brains: &mut [B],
) -> Result<Vec<RunReport>, ConfigurationError>
where
    B: Brain + Send,
{
    base.validate()?;
    let start = Instant::now();
    let seeds = derive_seeds(plan.master_seed, brains.len(), plan.same_environment);

    let reports = brains
        .par_iter_mut()
        .zip(seeds.into_par_iter())
        .map(|(brain, seed)| {
            let config = base.clone().with_seed(seed);
            let mut sim = Simulation::new(&config)?;
            match plan.tick_limit {
                Some(limit) => {
                    sim.run_for(brain, limit);
                }
                None => {
                    sim.run(brain);
                }
            }
            Ok(RunReport {
                seed,
                score: sim.score(),
                ticks: sim.ticks(),
                length: sim.snake().len(),
                status: sim.status(),
                end_reason: sim.end_reason(),
            })
        })
        .collect::<Result<Vec<_>, ConfigurationError>>()?;

    let summary = summarize(&reports);
    info!(
        runs = reports.len(),
        best = summary.max,
        mean = summary.mean,
        elapsed = ?start.elapsed(),
        "population evaluated"
    );
    Ok(reports)
}

pub fn summarize(reports: &[RunReport]) -> Stats {
    let scores: Vec<f64> = reports.iter().map(|r| r.score).collect();
    vec_stats(&scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::RandomBrain;

    #[test]
    fn seeds_are_reproducible() {
        let a = derive_seeds(777, 8, false);
        assert_eq!(a, derive_seeds(777, 8, false));
        assert_eq!(a.len(), 8);
        assert!(a.iter().all(|s| (1..=1_000_000).contains(s)));

        let shared = derive_seeds(777, 5, true);
        assert!(shared.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn population_reports_in_order() {
        let plan = EvaluationPlan {
            population_size: 6,
            master_seed: 11,
            same_environment: false,
            tick_limit: Some(500),
        };
        let base = SimulationConfig::default();
        let mut brains: Vec<RandomBrain> = (0..6).map(RandomBrain::new).collect();
        let reports = evaluate_population(&plan, &base, &mut brains).unwrap();

        assert_eq!(reports.len(), 6);
        let seeds: Vec<u64> = reports.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, derive_seeds(11, 6, false));
        for r in &reports {
            assert!(r.ticks <= 500);
            assert!(r.length >= base.initial_snake_length);
        }

        let mut again: Vec<RandomBrain> = (0..6).map(RandomBrain::new).collect();
        assert_eq!(reports, evaluate_population(&plan, &base, &mut again).unwrap());
    }

    #[test]
    fn invalid_base_config_is_rejected() {
        let plan = EvaluationPlan::default();
        let base = SimulationConfig::new(0, 0, 1);
        let mut brains = vec![RandomBrain::new(1)];
        assert!(evaluate_population(&plan, &base, &mut brains).is_err());
    }

    #[test]
    fn summary_covers_scores() {
        let report = |score| RunReport {
            seed: 1,
            score,
            ticks: 1,
            length: 5,
            status: Status::Ended,
            end_reason: Some(EndReason::WallCollision),
        };
        let stats = summarize(&[report(1.0), report(3.0)]);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 2.0);
    }
}
