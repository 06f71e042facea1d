use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ForecastError, Result};
use crate::forecast::constants::{DEFAULT_BANDWIDTH, DEFAULT_ORDER_LIKELIHOOD};
use crate::forecast::grouping::Grouped;
use crate::forecast::importance::WeatherModel;
use crate::forecast::ledger::{Order, Student};
use crate::forecast::menu::{Menu, MenuDay, MenuHistory};
use crate::models::{Forecast, ForecastRequest, OptionId, Timestamp};
use crate::state::Dataset;

/// Tunable parameters of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Weather kernel bandwidth (degrees squared).
    pub bandwidth: f64,
    /// Order likelihood used when there are no historical menus.
    pub default_order_likelihood: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            bandwidth: DEFAULT_BANDWIDTH,
            default_order_likelihood: DEFAULT_ORDER_LIKELIHOOD,
        }
    }
}

impl ForecastConfig {
    /// Load a config from a JSON file such as the one the tuner writes.
    ///
    /// Accepts either a bare config or an object with a `config` field.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let config: ForecastConfig = match value.get("config") {
            Some(inner) => serde_json::from_value(inner.clone())?,
            None => serde_json::from_value(value)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.bandwidth > 0.0 && self.bandwidth.is_finite()) {
            return Err(ForecastError::InvalidInput(format!(
                "bandwidth must be positive, got {}",
                self.bandwidth
            )));
        }
        if !(0.0..=1.0).contains(&self.default_order_likelihood) {
            return Err(ForecastError::InvalidInput(format!(
                "default order likelihood must be in [0, 1], got {}",
                self.default_order_likelihood
            )));
        }
        Ok(())
    }
}

/// Runs the forecast pipeline for one request.
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast expected orders per option on the request's menu.
    pub fn forecast(&self, dataset: &Dataset, request: &ForecastRequest) -> Result<Forecast> {
        let students = self.build_ledger(dataset, request)?;
        let forecast = aggregate(&students, &request.prediction_menu);

        info!(
            students = students.len(),
            options = forecast.len(),
            total = forecast.total(),
            "forecast complete"
        );
        Ok(forecast)
    }

    /// Score every student against history before the prediction date.
    pub fn build_ledger(
        &self,
        dataset: &Dataset,
        request: &ForecastRequest,
    ) -> Result<Vec<Student>> {
        self.config.validate()?;
        if !request.prediction_temperature.is_finite() {
            return Err(ForecastError::InvalidInput(format!(
                "prediction temperature must be finite, got {}",
                request.prediction_temperature
            )));
        }

        let history = dataset.history_before(request.prediction_date);
        history.validate()?;

        let known: BTreeSet<OptionId> = history.options.iter().map(|o| o.option_id).collect();
        for option_id in request.prediction_menu.difference(&known) {
            warn!(option_id, "menu option has no history and will forecast as 0");
        }

        let model = WeatherModel::new(request.prediction_temperature, self.config.bandwidth);
        let weather = history.temperature_lookup()?;

        let menus = weigh_menus(&history, &weather, &model)?;
        debug!(
            days = menus.len(),
            options = history.options.len(),
            "weighted menu history"
        );

        let option_ids: Vec<OptionId> = history.options.iter().map(|o| o.option_id).collect();
        let orders = Grouped::by_key(history.orders, |o| o.student_id);

        let mut students = Vec::with_capacity(history.students.len());
        for record in &history.students {
            let weighted = orders
                .get(&record.student_id)
                .iter()
                .map(|o| -> Result<Order> {
                    let temperature = temperature_on(&weather, o.timestamp, o.order_id)?;
                    Ok(Order::from_record(o, temperature, &model))
                })
                .collect::<Result<Vec<Order>>>()?;

            students.push(Student::new(
                record.student_id,
                weighted,
                &option_ids,
                &menus,
                self.config.default_order_likelihood,
            ));
        }

        debug!(
            students = students.len(),
            orders = orders.len(),
            "scored students"
        );
        Ok(students)
    }
}

/// Sum every student's scaled priorities over the prediction menu.
///
/// Options nobody is expected to order stay at 0.
pub fn aggregate(students: &[Student], menu: &BTreeSet<OptionId>) -> Forecast {
    let mut forecast = Forecast::zeroed(menu);
    for student in students {
        for scaled in student.expected_orders(menu) {
            forecast.add(scaled.option_id, scaled.priority_scaled);
        }
    }
    forecast
}

fn weigh_menus(
    history: &Dataset,
    weather: &HashMap<Timestamp, f64>,
    model: &WeatherModel,
) -> Result<MenuHistory> {
    let links = Grouped::by_key(history.menu_options.clone(), |m| m.day_id);

    let menus = history
        .days
        .iter()
        .map(|day| -> Result<Menu> {
            let options = links.get(&day.day_id).iter().map(|m| m.option_id);
            let temperature = weather.get(&day.timestamp).copied().ok_or(
                ForecastError::MissingWeather {
                    day_id: day.day_id,
                    timestamp: day.timestamp,
                },
            )?;
            Ok(MenuDay::new(day.day_id, options).weigh(temperature, model))
        })
        .collect::<Result<Vec<Menu>>>()?;

    Ok(MenuHistory::new(menus))
}

fn temperature_on(
    weather: &HashMap<Timestamp, f64>,
    timestamp: Timestamp,
    order_id: u32,
) -> Result<f64> {
    weather
        .get(&timestamp)
        .copied()
        .ok_or_else(|| ForecastError::UnknownDay {
            context: format!("Order {}", order_id),
            timestamp,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayRecord, MenuOptionRecord, OptionRecord, OrderRecord, StudentRecord};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DAY: i64 = 86_400;

    /// One student, option 1 on the menu four days running at 18 degrees,
    /// ordered on two of them.
    fn four_day_history() -> Dataset {
        Dataset {
            students: vec![StudentRecord { student_id: 1 }],
            orders: vec![
                OrderRecord {
                    order_id: 1,
                    option_id: 1,
                    student_id: 1,
                    timestamp: 0,
                },
                OrderRecord {
                    order_id: 2,
                    option_id: 1,
                    student_id: 1,
                    timestamp: 2 * DAY,
                },
            ],
            options: vec![OptionRecord {
                option_id: 1,
                name: None,
            }],
            days: (0..4)
                .map(|d| DayRecord {
                    day_id: d as u32 + 1,
                    timestamp: d * DAY,
                    temperature: Some(18.0),
                })
                .collect(),
            menu_options: (1..=4)
                .map(|day_id| MenuOptionRecord {
                    day_id,
                    option_id: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_student_scenario() {
        let request = ForecastRequest::new(4 * DAY, 18.0, [1]);
        let forecast = Forecaster::default()
            .forecast(&four_day_history(), &request)
            .unwrap();
        assert!((forecast.quantity(1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_future_records_ignored() {
        let mut data = four_day_history();
        // A day and order on the prediction date itself must not count
        data.days.push(DayRecord {
            day_id: 5,
            timestamp: 4 * DAY,
            temperature: Some(18.0),
        });
        data.orders.push(OrderRecord {
            order_id: 3,
            option_id: 1,
            student_id: 1,
            timestamp: 4 * DAY,
        });

        let request = ForecastRequest::new(4 * DAY, 18.0, [1]);
        let forecast = Forecaster::default().forecast(&data, &request).unwrap();
        assert!((forecast.quantity(1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_menu_option_is_zero() {
        let request = ForecastRequest::new(4 * DAY, 18.0, [1, 99]);
        let forecast = Forecaster::default()
            .forecast(&four_day_history(), &request)
            .unwrap();
        assert_eq!(forecast.quantity(99), 0.0);
        assert_eq!(forecast.len(), 2);
    }

    #[test]
    fn test_missing_weather_is_an_error() {
        let mut data = four_day_history();
        data.days[1].temperature = None;
        let request = ForecastRequest::new(4 * DAY, 18.0, [1]);
        assert!(matches!(
            Forecaster::default().forecast(&data, &request),
            Err(ForecastError::MissingWeather { day_id: 2, .. })
        ));
    }

    #[test]
    fn test_build_ledger_scores_every_student() {
        let mut data = four_day_history();
        data.students.push(StudentRecord { student_id: 2 });

        let request = ForecastRequest::new(4 * DAY, 18.0, [1]);
        let students = Forecaster::default().build_ledger(&data, &request).unwrap();

        assert_eq!(students.len(), 2);
        assert_eq!(students[0].orders().len(), 2);
        assert!(students[1].orders().is_empty());
        // Four menu days and no orders: never orders
        assert_eq!(students[1].order_likelihood(), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ForecastConfig {
            bandwidth: 0.0,
            ..Default::default()
        };
        let request = ForecastRequest::new(4 * DAY, 18.0, [1]);
        assert!(matches!(
            Forecaster::new(config).forecast(&four_day_history(), &request),
            Err(ForecastError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_config_load_accepts_tuner_output() {
        let mut file = NamedTempFile::new().unwrap();
        let json = br#"{"config": {"bandwidth": 22.5, "default_order_likelihood": 0.4}, "metrics": {}}"#;
        file.write_all(json).unwrap();
        let config = ForecastConfig::load(file.path()).unwrap();
        assert_eq!(config.bandwidth, 22.5);
        assert_eq!(config.default_order_likelihood, 0.4);

        let mut bare = NamedTempFile::new().unwrap();
        bare.write_all(br#"{"bandwidth": 30.0, "default_order_likelihood": 0.5}"#)
            .unwrap();
        assert_eq!(ForecastConfig::load(bare.path()).unwrap(), ForecastConfig::default());
    }
}
