use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use canteen_forecast::cli::{Cli, Command, ForecastArgs};
use canteen_forecast::error::Result;
use canteen_forecast::forecast::{ForecastConfig, Forecaster, SECONDS_PER_DAY};
use canteen_forecast::interface::{
    display_forecast, display_students, prompt_menu, prompt_temperature, prompt_yes_no,
};
use canteen_forecast::models::ForecastRequest;
use canteen_forecast::state::{Dataset, load_dataset, write_forecast_csv};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Predict {
            forecast,
            options,
            csv,
        } => cmd_predict(&cli.data, &forecast, options, csv.as_deref()),
        Command::Students { forecast, top } => cmd_students(&cli.data, &forecast, top),
        Command::Validate => cmd_validate(&cli.data),
    }
}

/// Load the dataset, optionally dropping days without weather.
fn load(file_path: &str, skip_missing_weather: bool) -> Result<Option<Dataset>> {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Dataset file not found: {}", file_path);
        return Ok(None);
    }

    let mut dataset = load_dataset(path)?;
    println!(
        "Loaded {} students, {} orders, {} options, {} days",
        dataset.students.len(),
        dataset.orders.len(),
        dataset.options.len(),
        dataset.days.len()
    );

    if skip_missing_weather {
        let dropped = dataset.without_missing_weather();
        if dropped > 0 {
            println!("Skipped {} days without weather data", dropped);
        }
    }

    Ok(Some(dataset))
}

/// Build the forecaster and resolve date and temperature.
fn prepare(dataset: &Dataset, args: &ForecastArgs) -> Result<(Forecaster, i64, f64)> {
    let config = match &args.config {
        Some(path) => ForecastConfig::load(path)?,
        None => ForecastConfig::default(),
    };

    let date = args.date.unwrap_or_else(|| {
        dataset
            .latest_day()
            .map(|ts| ts + SECONDS_PER_DAY)
            .unwrap_or(0)
    });

    let temp = match args.temp {
        Some(t) => t,
        None => prompt_temperature()?,
    };

    Ok((Forecaster::new(config), date, temp))
}

/// Forecast expected orders for a menu.
fn cmd_predict(
    file_path: &str,
    args: &ForecastArgs,
    options: Vec<u32>,
    csv_path: Option<&str>,
) -> Result<()> {
    let Some(dataset) = load(file_path, args.skip_missing_weather)? else {
        return Ok(());
    };

    if dataset.options.is_empty() {
        println!("No options in the dataset. Add options before forecasting.");
        return Ok(());
    }

    let (forecaster, date, temp) = prepare(&dataset, args)?;

    let menu = if options.is_empty() {
        prompt_menu(&dataset.options)?
    } else {
        options
    };

    let request = ForecastRequest::new(date, temp, menu);
    let forecast = forecaster.forecast(&dataset, &request)?;

    display_forecast(&forecast, &request, &dataset);

    match csv_path {
        Some(path) => {
            write_forecast_csv(path, &forecast, &dataset)?;
            println!("Forecast written to {}", path);
        }
        None if args.temp.is_none() => {
            // Interactive session: offer to keep the result
            if prompt_yes_no("Save forecast to forecast.csv?", false)? {
                write_forecast_csv("forecast.csv", &forecast, &dataset)?;
                println!("Forecast written to forecast.csv");
            }
        }
        None => {}
    }

    Ok(())
}

/// Show per-student likelihoods and priorities.
fn cmd_students(file_path: &str, args: &ForecastArgs, top: usize) -> Result<()> {
    let Some(dataset) = load(file_path, args.skip_missing_weather)? else {
        return Ok(());
    };

    let (forecaster, date, temp) = prepare(&dataset, args)?;
    let request = ForecastRequest::new(date, temp, []);
    let students = forecaster.build_ledger(&dataset, &request)?;

    display_students(&students, &dataset, top);
    Ok(())
}

/// Check the dataset without forecasting.
fn cmd_validate(file_path: &str) -> Result<()> {
    let Some(dataset) = load(file_path, false)? else {
        return Ok(());
    };

    dataset.validate()?;
    println!("Dataset is valid.");
    Ok(())
}
