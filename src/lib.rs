pub mod cli;
pub mod error;
pub mod forecast;
pub mod interface;
pub mod models;
pub mod state;
pub mod tuner;

pub use error::{ForecastError, Result};
pub use forecast::{ForecastConfig, Forecaster};
pub use models::{Forecast, ForecastRequest};
pub use state::Dataset;
