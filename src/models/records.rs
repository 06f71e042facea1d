use serde::{Deserialize, Serialize};

pub type StudentId = u32;
pub type OptionId = u32;
pub type DayId = u32;
pub type OrderId = u32;

/// Seconds since the epoch, one constant per cafeteria day.
pub type Timestamp = i64;

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "studentID")]
    pub student_id: StudentId,
}

/// A historical order joined with the day it was placed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "orderID")]
    pub order_id: OrderId,

    #[serde(rename = "optionID")]
    pub option_id: OptionId,

    #[serde(rename = "studentID")]
    pub student_id: StudentId,

    #[serde(rename = "timestamp")]
    pub timestamp: Timestamp,
}

/// A menu option the kitchen can serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    #[serde(rename = "optionID")]
    pub option_id: OptionId,

    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl OptionRecord {
    /// Display label: the name when known, otherwise `#<id>`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.option_id),
        }
    }
}

/// A historical day and the temperature recorded for it.
///
/// `temperature` is `None` when no weather was entered for the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(rename = "dayID")]
    pub day_id: DayId,

    #[serde(rename = "timestamp")]
    pub timestamp: Timestamp,

    #[serde(rename = "temperature", default)]
    pub temperature: Option<f64>,
}

/// Links an option to the menu of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOptionRecord {
    #[serde(rename = "dayID")]
    pub day_id: DayId,

    #[serde(rename = "optionID")]
    pub option_id: OptionId,
}
