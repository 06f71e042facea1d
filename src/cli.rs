use clap::{Args, Parser, Subcommand};

/// Canteen forecast: predicts how many portions of each option will be ordered.
#[derive(Parser, Debug)]
#[command(name = "canteen_forecast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the dataset JSON file.
    #[arg(short, long, global = true, default_value = "canteen.json")]
    pub data: String,
}

/// Options shared by commands that run the forecaster.
#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    /// Date to forecast (timestamp). Defaults to the day after the latest history.
    #[arg(long)]
    pub date: Option<i64>,

    /// Forecast temperature for the date. Prompted for if omitted.
    #[arg(short, long, allow_negative_numbers = true)]
    pub temp: Option<f64>,

    /// Forecast config JSON (as written by the tuner).
    #[arg(long)]
    pub config: Option<String>,

    /// Drop historical days without weather instead of failing.
    #[arg(long)]
    pub skip_missing_weather: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forecast expected orders for a menu.
    Predict {
        #[command(flatten)]
        forecast: ForecastArgs,

        /// Option on the menu (repeatable). Prompted for if omitted.
        #[arg(short, long = "option")]
        options: Vec<u32>,

        /// Also write the forecast to this CSV file.
        #[arg(long)]
        csv: Option<String>,
    },

    /// Show each student's order likelihood and option priorities.
    Students {
        #[command(flatten)]
        forecast: ForecastArgs,

        /// Number of preferences to show per student.
        #[arg(long, default_value = "3")]
        top: usize,
    },

    /// Check the dataset for records the forecaster would reject.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict() {
        let cli = Cli::parse_from([
            "canteen_forecast",
            "predict",
            "--temp",
            "-2.5",
            "-o",
            "3",
            "-o",
            "5",
            "--data",
            "history.json",
        ]);
        assert_eq!(cli.data, "history.json");
        match cli.command {
            Command::Predict {
                forecast, options, ..
            } => {
                assert_eq!(forecast.temp, Some(-2.5));
                assert_eq!(options, vec![3, 5]);
                assert!(forecast.date.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_validate_default_data() {
        let cli = Cli::parse_from(["canteen_forecast", "validate"]);
        assert_eq!(cli.data, "canteen.json");
        assert!(matches!(cli.command, Command::Validate));
    }
}
