use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::records::{OptionId, Timestamp};

/// What to forecast: the day, its forecast temperature and its menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub prediction_date: Timestamp,
    pub prediction_temperature: f64,
    pub prediction_menu: BTreeSet<OptionId>,
}

impl ForecastRequest {
    pub fn new(
        prediction_date: Timestamp,
        prediction_temperature: f64,
        prediction_menu: impl IntoIterator<Item = OptionId>,
    ) -> Self {
        Self {
            prediction_date,
            prediction_temperature,
            prediction_menu: prediction_menu.into_iter().collect(),
        }
    }

    /// Check whether an option is on the menu being forecast.
    #[inline]
    pub fn offers(&self, option_id: OptionId) -> bool {
        self.prediction_menu.contains(&option_id)
    }
}

/// Expected number of orders per option on the prediction menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    quantities: BTreeMap<OptionId, f64>,
}

impl Forecast {
    /// Start a forecast with every menu option at zero.
    pub fn zeroed(menu: &BTreeSet<OptionId>) -> Self {
        Self {
            quantities: menu.iter().map(|&id| (id, 0.0)).collect(),
        }
    }

    /// Add a student's contribution to an option on the menu.
    ///
    /// Options that are not on the menu are ignored.
    pub fn add(&mut self, option_id: OptionId, amount: f64) {
        if let Some(q) = self.quantities.get_mut(&option_id) {
            *q += amount;
        }
    }

    /// Expected quantity for an option (0.0 if not on the menu).
    pub fn quantity(&self, option_id: OptionId) -> f64 {
        self.quantities.get(&option_id).copied().unwrap_or(0.0)
    }

    /// Quantity rounded to whole portions for the kitchen.
    pub fn rounded(&self, option_id: OptionId) -> u32 {
        self.quantity(option_id).round().max(0.0) as u32
    }

    /// Sum of all expected quantities.
    pub fn total(&self) -> f64 {
        self.quantities.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionId, f64)> + '_ {
        self.quantities.iter().map(|(&id, &q)| (id, q))
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_covers_menu() {
        let request = ForecastRequest::new(0, 18.0, [1, 2, 3]);
        let forecast = Forecast::zeroed(&request.prediction_menu);
        assert_eq!(forecast.len(), 3);
        assert_eq!(forecast.total(), 0.0);
        assert!(request.offers(2));
        assert!(!request.offers(4));
    }

    #[test]
    fn test_add_ignores_off_menu() {
        let request = ForecastRequest::new(0, 18.0, [1]);
        let mut forecast = Forecast::zeroed(&request.prediction_menu);
        forecast.add(1, 0.75);
        forecast.add(9, 5.0);
        assert_eq!(forecast.quantity(1), 0.75);
        assert_eq!(forecast.quantity(9), 0.0);
        assert_eq!(forecast.len(), 1);
    }

    #[test]
    fn test_rounded() {
        let request = ForecastRequest::new(0, 18.0, [1, 2]);
        let mut forecast = Forecast::zeroed(&request.prediction_menu);
        forecast.add(1, 2.5);
        forecast.add(2, 2.49);
        assert_eq!(forecast.rounded(1), 3);
        assert_eq!(forecast.rounded(2), 2);
    }
}
