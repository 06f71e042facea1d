use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::tuner::evaluation::EvaluationResult;
use crate::tuner::knobs::display;

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write all results to a CSV file, best first.
pub fn write_csv(results: &[EvaluationResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "bandwidth",
        "default_order_likelihood",
        "mae",
        "rmse",
        "bias",
        "days",
    ])?;

    for (i, result) in results.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            format!("{:.3}", result.config.bandwidth),
            format!("{:.3}", result.config.default_order_likelihood),
            format!("{:.4}", result.mae),
            format!("{:.4}", result.rmse),
            format!("{:.4}", result.bias),
            result.per_day.len().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the best result as JSON; its `config` field loads with `--config`.
pub fn write_best_json(best: &EvaluationResult, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "config": {
            "bandwidth": truncate(best.config.bandwidth, 3),
            "default_order_likelihood": truncate(best.config.default_order_likelihood, 3),
        },
        "metrics": {
            "mae": truncate(best.mae, 4),
            "rmse": truncate(best.rmse, 4),
            "bias": truncate(best.bias, 4),
        },
        "per_day": best.per_day.iter().map(|d| {
            serde_json::json!({
                "day_id": d.day_id,
                "timestamp": d.timestamp,
                "actual": d.actual_total,
                "predicted": truncate(d.predicted_total, 3),
                "abs_error": truncate(d.abs_error, 3),
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print top-k results to stdout.
pub fn print_topk(results: &[EvaluationResult], k: usize) {
    println!("\n=== Top {} Results (by MAE) ===\n", k.min(results.len()));

    for (i, result) in results.iter().take(k).enumerate() {
        println!(
            "#{}: MAE={:.4} RMSE={:.4} bias={:+.3}",
            i + 1,
            result.mae,
            result.rmse,
            result.bias
        );
        println!("    {}", display(&result.config));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::ForecastConfig;
    use tempfile::NamedTempFile;

    fn result() -> EvaluationResult {
        EvaluationResult {
            config: ForecastConfig {
                bandwidth: 24.12345,
                default_order_likelihood: 0.4,
            },
            mae: 0.123456,
            rmse: 0.2,
            bias: -0.05,
            per_day: vec![],
        }
    }

    #[test]
    fn test_best_json_loads_as_config() {
        let out = NamedTempFile::new().unwrap();
        write_best_json(&result(), out.path()).unwrap();

        let config = ForecastConfig::load(out.path()).unwrap();
        assert_eq!(config.bandwidth, 24.123);
        assert_eq!(config.default_order_likelihood, 0.4);
    }

    #[test]
    fn test_write_csv() {
        let out = NamedTempFile::new().unwrap();
        write_csv(&[result()], out.path()).unwrap();

        let content = std::fs::read_to_string(out.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("rank,bandwidth"));
        assert_eq!(lines[1], "1,24.123,0.400,0.1235,0.2000,-0.0500,0");
    }
}
