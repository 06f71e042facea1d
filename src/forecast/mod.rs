pub mod constants;
pub mod grouping;
pub mod importance;
pub mod ledger;
pub mod menu;
pub mod orchestrator;

pub use constants::*;
pub use grouping::Grouped;
pub use importance::{WeatherModel, weather_importance};
pub use ledger::{OptionPriority, Order, ScaledOption, Student, option_priority, order_likelihood};
pub use menu::{Menu, MenuDay, MenuHistory};
pub use orchestrator::{ForecastConfig, Forecaster, aggregate};
