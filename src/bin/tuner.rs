use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use canteen_forecast::state::load_dataset;
use canteen_forecast::tuner::{
    HillClimbConfig, KnobRanges, TunerConfig, print_topk, run_tuner, write_best_json, write_csv,
};

#[derive(Parser, Debug)]
#[command(name = "tuner")]
#[command(about = "Calibrates the forecast config by backtesting on recent history")]
struct Args {
    /// Number of random search iterations
    #[arg(long, default_value = "200")]
    iters: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Number of latest menu days to backtest on
    #[arg(long, default_value = "20")]
    holdout: usize,

    /// Path to the dataset JSON
    #[arg(long, default_value = "canteen.json")]
    data: PathBuf,

    /// Output CSV file for all results
    #[arg(long, default_value = "tuner_results.csv")]
    csv: PathBuf,

    /// Output JSON file for the best config
    #[arg(long, default_value = "tuner_best.json")]
    json: PathBuf,

    /// Number of top results to display
    #[arg(long, default_value = "10")]
    topk: usize,

    /// Skip historical days without weather instead of failing
    #[arg(long)]
    skip_missing_weather: bool,

    /// Disable hill climbing refinement
    #[arg(long)]
    no_hill_climb: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut dataset = match load_dataset(&args.data) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error loading dataset {:?}: {}", args.data, e);
            std::process::exit(1);
        }
    };

    if args.skip_missing_weather {
        let dropped = dataset.without_missing_weather();
        if dropped > 0 {
            println!("Skipped {} days without weather data", dropped);
        }
    }

    println!(
        "Loaded {} students, {} orders, {} days from {:?}",
        dataset.students.len(),
        dataset.orders.len(),
        dataset.days.len(),
        args.data
    );

    let hill_climb = if args.no_hill_climb {
        None
    } else {
        Some(HillClimbConfig::default())
    };

    let config = TunerConfig {
        iterations: args.iters,
        seed: args.seed,
        holdout: args.holdout,
        ranges: KnobRanges::default(),
        hill_climb,
    };

    let tuner_results = match run_tuner(&config, &dataset) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    print_topk(&tuner_results.results, args.topk);

    let best = tuner_results.best();
    let baseline = &tuner_results.baseline;

    let mae_change = best.mae - baseline.mae;
    let mae_pct = if baseline.mae > 0.0 {
        (mae_change / baseline.mae) * 100.0
    } else {
        0.0
    };

    println!("=== Comparison: Best vs Baseline ===");
    println!(
        "Baseline: MAE={:.4} RMSE={:.4} bias={:+.3}",
        baseline.mae, baseline.rmse, baseline.bias
    );
    println!(
        "Best:     MAE={:.4} RMSE={:.4} bias={:+.3}",
        best.mae, best.rmse, best.bias
    );
    println!("Change:   MAE {:+.4} ({:+.2}%)", mae_change, mae_pct);
    println!();

    if let Err(e) = write_csv(&tuner_results.results, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all results to {:?}", args.csv);
    }

    if let Err(e) = write_best_json(best, &args.json) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote best config to {:?} (use with --config)", args.json);
    }
}
