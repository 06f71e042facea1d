use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::error::{ForecastError, Result};
use crate::forecast::ForecastConfig;
use crate::state::Dataset;
use crate::tuner::evaluation::{
    EvaluationResult, HillClimbConfig, evaluate_config, hill_climb, holdout_days,
};
use crate::tuner::knobs::{KnobRanges, display, random_config};

/// Configuration for the tuner.
#[derive(Debug, Clone)]
pub struct TunerConfig {
    pub iterations: usize,
    pub seed: u64,
    /// Number of latest menu days to backtest on.
    pub holdout: usize,
    pub ranges: KnobRanges,
    /// Hill climbing configuration. Set to None to disable.
    pub hill_climb: Option<HillClimbConfig>,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            seed: 123,
            holdout: 20,
            ranges: KnobRanges::default(),
            hill_climb: Some(HillClimbConfig::default()),
        }
    }
}

/// Results from a tuning run.
#[derive(Debug)]
pub struct TunerResults {
    /// All evaluation results, best first.
    pub results: Vec<EvaluationResult>,
    /// The baseline result using default constants.
    pub baseline: EvaluationResult,
}

impl TunerResults {
    pub fn best(&self) -> &EvaluationResult {
        self.results.first().unwrap_or(&self.baseline)
    }
}

/// Run random search, then refine the best result by hill climbing.
pub fn run_tuner(config: &TunerConfig, dataset: &Dataset) -> Result<TunerResults> {
    let holdout = holdout_days(dataset, config.holdout);
    if holdout.is_empty() {
        return Err(ForecastError::InvalidInput(
            "no historical days with a menu and weather to backtest on".to_string(),
        ));
    }
    info!(days = holdout.len(), "backtesting on held-out days");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut results = Vec::with_capacity(config.iterations + 2);

    let baseline = evaluate_config(&ForecastConfig::default(), dataset, &holdout)?;
    println!(
        "Baseline: MAE={:.4} RMSE={:.4} bias={:+.3}",
        baseline.mae, baseline.rmse, baseline.bias
    );
    println!("    {}\n", display(&baseline.config));

    println!("Running {} iterations...", config.iterations);
    let mut best_mae = baseline.mae;

    for i in 0..config.iterations {
        let candidate = random_config(&mut rng, &config.ranges);
        let result = evaluate_config(&candidate, dataset, &holdout)?;

        if result.mae < best_mae {
            best_mae = result.mae;
            println!(
                "[{}/{}] New best: MAE={:.4} RMSE={:.4} bias={:+.3}  {}",
                i + 1,
                config.iterations,
                result.mae,
                result.rmse,
                result.bias,
                display(&result.config)
            );
        }

        results.push(result);

        if (i + 1) % (config.iterations / 10).max(1) == 0 {
            let pct = ((i + 1) as f64 / config.iterations as f64) * 100.0;
            eprint!("\r{:.0}% complete", pct);
        }
    }
    eprintln!();

    results.push(baseline.clone());
    results.sort_by(|a, b| b.cmp_score(a));

    if let Some(hc) = &config.hill_climb {
        println!("Refining best result with hill climbing...");
        let refined = hill_climb(&results[0], dataset, &holdout, &config.ranges, hc)?;
        if refined.cmp_score(&results[0]) == std::cmp::Ordering::Greater {
            println!(
                "  Improved: MAE {:.4} -> {:.4}",
                results[0].mae, refined.mae
            );
            results.insert(0, refined);
        } else {
            println!("  No improvements found (already at a local optimum)");
        }
    }

    Ok(TunerResults { results, baseline })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tuner_requires_holdout() {
        let config = TunerConfig {
            iterations: 2,
            ..Default::default()
        };
        assert!(matches!(
            run_tuner(&config, &Dataset::default()),
            Err(ForecastError::InvalidInput(_))
        ));
    }
}
