use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ForecastError, Result};
use crate::forecast::grouping::Grouped;
use crate::models::{
    DayId, DayRecord, MenuOptionRecord, OptionId, OptionRecord, OrderRecord, StudentRecord,
    Timestamp,
};

/// The five record sets the forecaster reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub students: Vec<StudentRecord>,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
    #[serde(default)]
    pub options: Vec<OptionRecord>,
    #[serde(default)]
    pub days: Vec<DayRecord>,
    #[serde(default)]
    pub menu_options: Vec<MenuOptionRecord>,
}

impl Dataset {
    /// Restrict to history strictly before `date`.
    ///
    /// Menu links survive only if their day does.
    pub fn history_before(&self, date: Timestamp) -> Dataset {
        let days: Vec<DayRecord> = self
            .days
            .iter()
            .filter(|d| d.timestamp < date)
            .cloned()
            .collect();
        let kept: HashSet<DayId> = days.iter().map(|d| d.day_id).collect();

        Dataset {
            students: self.students.clone(),
            orders: self
                .orders
                .iter()
                .filter(|o| o.timestamp < date)
                .cloned()
                .collect(),
            options: self.options.clone(),
            menu_options: self
                .menu_options
                .iter()
                .filter(|m| kept.contains(&m.day_id))
                .cloned()
                .collect(),
            days,
        }
    }

    /// Drop days without a recorded temperature, with their orders and menu links.
    ///
    /// Returns the number of days dropped.
    pub fn without_missing_weather(&mut self) -> usize {
        let missing: Vec<&DayRecord> = self
            .days
            .iter()
            .filter(|d| d.temperature.is_none())
            .collect();
        if missing.is_empty() {
            return 0;
        }

        let missing_ids: HashSet<DayId> = missing.iter().map(|d| d.day_id).collect();
        let missing_ts: HashSet<Timestamp> = missing.iter().map(|d| d.timestamp).collect();
        let dropped = missing_ids.len();

        self.days.retain(|d| d.temperature.is_some());
        self.orders.retain(|o| !missing_ts.contains(&o.timestamp));
        self.menu_options.retain(|m| !missing_ids.contains(&m.day_id));

        debug!(dropped, "dropped days without weather");
        dropped
    }

    /// Timestamp of the latest historical day.
    pub fn latest_day(&self) -> Option<Timestamp> {
        self.days.iter().map(|d| d.timestamp).max()
    }

    pub fn option(&self, option_id: OptionId) -> Option<&OptionRecord> {
        self.options.iter().find(|o| o.option_id == option_id)
    }

    /// Display name of an option, falling back to `#<id>`.
    pub fn option_name(&self, option_id: OptionId) -> String {
        self.option(option_id)
            .map(|o| o.label())
            .unwrap_or_else(|| format!("#{}", option_id))
    }

    /// Map each distinct day timestamp to its temperature.
    ///
    /// Fails on duplicate timestamps and on days without weather.
    pub fn temperature_lookup(&self) -> Result<HashMap<Timestamp, f64>> {
        let grouped = Grouped::by_key(self.days.clone(), |d| d.timestamp);
        let mut lookup = HashMap::with_capacity(grouped.key_count());

        for (&timestamp, days) in grouped.groups() {
            if let [first, second, ..] = days {
                return Err(ForecastError::DuplicateDay {
                    timestamp,
                    first: first.day_id,
                    second: second.day_id,
                });
            }
            let day = &days[0];
            let temperature = day.temperature.ok_or(ForecastError::MissingWeather {
                day_id: day.day_id,
                timestamp,
            })?;
            lookup.insert(timestamp, temperature);
        }

        Ok(lookup)
    }

    /// Check every precondition the forecaster relies on.
    pub fn validate(&self) -> Result<()> {
        let mut students = HashSet::new();
        for s in &self.students {
            if !students.insert(s.student_id) {
                return Err(ForecastError::DuplicateStudent(s.student_id));
            }
        }

        let mut options = HashSet::new();
        for o in &self.options {
            if !options.insert(o.option_id) {
                return Err(ForecastError::DuplicateOption(o.option_id));
            }
        }

        let weather = self.temperature_lookup()?;
        let day_ids: HashMap<DayId, Timestamp> =
            self.days.iter().map(|d| (d.day_id, d.timestamp)).collect();

        for order in &self.orders {
            if !students.contains(&order.student_id) {
                return Err(ForecastError::UnknownStudent {
                    order_id: order.order_id,
                    student_id: order.student_id,
                });
            }
            if !options.contains(&order.option_id) {
                return Err(ForecastError::UnknownOption {
                    context: format!("Order {}", order.order_id),
                    option_id: order.option_id,
                });
            }
            if !weather.contains_key(&order.timestamp) {
                return Err(ForecastError::UnknownDay {
                    context: format!("Order {}", order.order_id),
                    timestamp: order.timestamp,
                });
            }
        }

        let mut links: HashSet<(DayId, OptionId)> = HashSet::new();
        let mut offered: HashSet<(Timestamp, OptionId)> = HashSet::new();
        for link in &self.menu_options {
            let Some(&timestamp) = day_ids.get(&link.day_id) else {
                return Err(ForecastError::UnknownMenuDay {
                    day_id: link.day_id,
                    option_id: link.option_id,
                });
            };
            if !options.contains(&link.option_id) {
                return Err(ForecastError::UnknownOption {
                    context: format!("Menu of day {}", link.day_id),
                    option_id: link.option_id,
                });
            }
            if !links.insert((link.day_id, link.option_id)) {
                return Err(ForecastError::DuplicateMenuOption {
                    day_id: link.day_id,
                    option_id: link.option_id,
                });
            }
            offered.insert((timestamp, link.option_id));
        }

        // Not fatal, but pushes that option's priority above 1
        let off_menu = self
            .orders
            .iter()
            .filter(|o| !offered.contains(&(o.timestamp, o.option_id)))
            .count();
        if off_menu > 0 {
            warn!(off_menu, "orders for options missing from that day's menu");
        }

        Ok(())
    }
}
