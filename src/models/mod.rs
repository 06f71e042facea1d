pub mod forecast;
pub mod records;

pub use forecast::{Forecast, ForecastRequest};
pub use records::{
    DayId, DayRecord, MenuOptionRecord, OptionId, OptionRecord, OrderId, OrderRecord, StudentId,
    StudentRecord, Timestamp,
};
