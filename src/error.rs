use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Duplicate student: {0}")]
    DuplicateStudent(u32),

    #[error("Duplicate option: {0}")]
    DuplicateOption(u32),

    #[error("Duplicate day timestamp {timestamp} (days {first} and {second})")]
    DuplicateDay { timestamp: i64, first: u32, second: u32 },

    #[error("Menu of day {day_id} lists option {option_id} more than once")]
    DuplicateMenuOption { day_id: u32, option_id: u32 },

    #[error("Order {order_id} references unknown student {student_id}")]
    UnknownStudent { order_id: u32, student_id: u32 },

    #[error("{context} references unknown option {option_id}")]
    UnknownOption { context: String, option_id: u32 },

    #[error("{context} has no day at timestamp {timestamp}")]
    UnknownDay { context: String, timestamp: i64 },

    #[error("Menu option {option_id} references unknown day {day_id}")]
    UnknownMenuDay { day_id: u32, option_id: u32 },

    #[error("Day {day_id} (timestamp {timestamp}) has no recorded temperature")]
    MissingWeather { day_id: u32, timestamp: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
