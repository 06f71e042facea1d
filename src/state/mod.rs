mod dataset;
mod persistence;

pub use dataset::Dataset;
pub use persistence::{load_dataset, save_dataset, write_forecast_csv};
