use std::collections::{BTreeSet, HashMap};

use crate::error::{ForecastError, Result};
use crate::forecast::{ForecastConfig, Forecaster};
use crate::models::{DayRecord, ForecastRequest, OptionId};
use crate::state::Dataset;
use crate::tuner::knobs::{KnobRanges, NUM_KNOBS, perturb};

/// Forecast error on one held-out day.
#[derive(Debug, Clone)]
pub struct DayResult {
    pub day_id: u32,
    pub timestamp: i64,
    pub options: usize,
    pub actual_total: f64,
    pub predicted_total: f64,
    /// Sum of |predicted - actual| over the day's options.
    pub abs_error: f64,
    /// Sum of (predicted - actual)^2 over the day's options.
    pub sq_error: f64,
}

/// Aggregated backtest of one config across held-out days.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub config: ForecastConfig,
    /// Mean absolute error per (day, option).
    pub mae: f64,
    /// Root mean squared error per (day, option).
    pub rmse: f64,
    /// Mean signed error per day (positive = over-forecast).
    pub bias: f64,
    pub per_day: Vec<DayResult>,
}

impl EvaluationResult {
    /// Ordering where `Greater` means better: lower MAE, then lower RMSE, then smaller |bias|.
    pub fn cmp_score(&self, other: &Self) -> std::cmp::Ordering {
        match other.mae.partial_cmp(&self.mae) {
            Some(std::cmp::Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        match other.rmse.partial_cmp(&self.rmse) {
            Some(std::cmp::Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        other
            .bias
            .abs()
            .partial_cmp(&self.bias.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// The latest `count` days that had a menu and recorded weather.
pub fn holdout_days(dataset: &Dataset, count: usize) -> Vec<DayRecord> {
    let with_menu: BTreeSet<u32> = dataset.menu_options.iter().map(|m| m.day_id).collect();

    let mut days: Vec<DayRecord> = dataset
        .days
        .iter()
        .filter(|d| d.temperature.is_some() && with_menu.contains(&d.day_id))
        .cloned()
        .collect();
    days.sort_by_key(|d| d.timestamp);

    let skip = days.len().saturating_sub(count);
    days.split_off(skip)
}

/// Forecast one historical day from the history before it and score it.
pub fn evaluate_day(
    forecaster: &Forecaster,
    dataset: &Dataset,
    day: &DayRecord,
) -> Result<DayResult> {
    let temperature = day.temperature.ok_or(ForecastError::MissingWeather {
        day_id: day.day_id,
        timestamp: day.timestamp,
    })?;

    let menu: BTreeSet<OptionId> = dataset
        .menu_options
        .iter()
        .filter(|m| m.day_id == day.day_id)
        .map(|m| m.option_id)
        .collect();

    let mut actual: HashMap<OptionId, f64> = HashMap::new();
    for order in dataset.orders.iter().filter(|o| o.timestamp == day.timestamp) {
        if menu.contains(&order.option_id) {
            *actual.entry(order.option_id).or_insert(0.0) += 1.0;
        }
    }

    let request = ForecastRequest::new(day.timestamp, temperature, menu.iter().copied());
    let forecast = forecaster.forecast(dataset, &request)?;

    let mut abs_error = 0.0;
    let mut sq_error = 0.0;
    for (option_id, predicted) in forecast.iter() {
        let err = predicted - actual.get(&option_id).copied().unwrap_or(0.0);
        abs_error += err.abs();
        sq_error += err * err;
    }

    Ok(DayResult {
        day_id: day.day_id,
        timestamp: day.timestamp,
        options: menu.len(),
        actual_total: actual.values().sum(),
        predicted_total: forecast.total(),
        abs_error,
        sq_error,
    })
}

/// Backtest a config over the held-out days.
pub fn evaluate_config(
    config: &ForecastConfig,
    dataset: &Dataset,
    holdout: &[DayRecord],
) -> Result<EvaluationResult> {
    let forecaster = Forecaster::new(config.clone());
    let per_day = holdout
        .iter()
        .map(|day| evaluate_day(&forecaster, dataset, day))
        .collect::<Result<Vec<DayResult>>>()?;

    let pairs: usize = per_day.iter().map(|d| d.options).sum();
    let (mae, rmse) = if pairs > 0 {
        let n = pairs as f64;
        (
            per_day.iter().map(|d| d.abs_error).sum::<f64>() / n,
            (per_day.iter().map(|d| d.sq_error).sum::<f64>() / n).sqrt(),
        )
    } else {
        (0.0, 0.0)
    };
    let bias = if per_day.is_empty() {
        0.0
    } else {
        per_day
            .iter()
            .map(|d| d.predicted_total - d.actual_total)
            .sum::<f64>()
            / per_day.len() as f64
    };

    Ok(EvaluationResult {
        config: config.clone(),
        mae,
        rmse,
        bias,
        per_day,
    })
}

/// Hill-climbing parameters.
#[derive(Debug, Clone)]
pub struct HillClimbConfig {
    /// Multiplicative steps tried on each knob.
    pub factors: Vec<f64>,
    /// Maximum passes over all knobs.
    pub max_rounds: usize,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            factors: vec![0.5, 0.8, 0.95, 1.05, 1.25, 2.0],
            max_rounds: 10,
        }
    }
}

/// Greedily improve a result one knob at a time until no step helps.
pub fn hill_climb(
    start: &EvaluationResult,
    dataset: &Dataset,
    holdout: &[DayRecord],
    ranges: &KnobRanges,
    hc: &HillClimbConfig,
) -> Result<EvaluationResult> {
    let mut best = start.clone();

    for _ in 0..hc.max_rounds {
        let mut improved = false;
        for knob in 0..NUM_KNOBS {
            for &factor in &hc.factors {
                let candidate = perturb(&best.config, knob, factor, ranges);
                if candidate == best.config {
                    continue;
                }
                let result = evaluate_config(&candidate, dataset, holdout)?;
                if result.cmp_score(&best) == std::cmp::Ordering::Greater {
                    best = result;
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }

    Ok(best)
}
