use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::Forecast;
use crate::state::dataset::Dataset;

/// Load a dataset from a JSON file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let content = fs::read_to_string(path)?;
    let dataset: Dataset = serde_json::from_str(&content)?;
    Ok(dataset)
}

/// Save a dataset to a JSON file.
pub fn save_dataset<P: AsRef<Path>>(path: P, dataset: &Dataset) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write a forecast as CSV: `option_id,name,expected,rounded`.
pub fn write_forecast_csv<P: AsRef<Path>>(
    path: P,
    forecast: &Forecast,
    dataset: &Dataset,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["option_id", "name", "expected", "rounded"])?;

    for (option_id, quantity) in forecast.iter() {
        wtr.write_record([
            option_id.to_string(),
            dataset.option_name(option_id),
            format!("{:.3}", quantity),
            forecast.rounded(option_id).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
