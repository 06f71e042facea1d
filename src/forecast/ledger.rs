use std::collections::{BTreeSet, HashMap};

use crate::forecast::importance::WeatherModel;
use crate::forecast::menu::MenuHistory;
use crate::models::{OptionId, OrderRecord, StudentId};

/// A student's historical order with its weather relevance.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    option_id: OptionId,
    temperature: f64,
    importance: f64,
}

impl Order {
    /// Build a weighted order from its record and the temperature of its day.
    pub fn from_record(record: &OrderRecord, temperature: f64, model: &WeatherModel) -> Self {
        Self {
            option_id: record.option_id,
            temperature,
            importance: model.importance(temperature),
        }
    }

    pub fn option_id(&self) -> OptionId {
        self.option_id
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn importance(&self) -> f64 {
        self.importance
    }
}

/// A student's weather-weighted propensity to pick one option when offered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionPriority {
    pub option_id: OptionId,
    pub priority: f64,
}

/// A priority rescaled against a specific prediction menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledOption {
    pub option_id: OptionId,
    pub priority: f64,
    pub priority_scaled: f64,
}

/// Priority of one option: weighted orders of it over weighted days offering it.
///
/// An option that was never offered has priority 0.
pub fn option_priority(order_weight: f64, available_weight: f64) -> f64 {
    if available_weight > 0.0 {
        order_weight / available_weight
    } else {
        0.0
    }
}

/// Fraction of menu days on which a student ordered anything.
///
/// Falls back to `default` when there are no menu days to learn from.
pub fn order_likelihood(num_orders: usize, num_menus: usize, default: f64) -> f64 {
    if num_menus > 0 {
        num_orders as f64 / num_menus as f64
    } else {
        default
    }
}

/// One student's order history and per-option priorities.
///
/// Fully scored at construction; there is no partially-initialised state.
#[derive(Debug, Clone)]
pub struct Student {
    id: StudentId,
    orders: Vec<Order>,
    options: Vec<OptionPriority>,
    order_likelihood: f64,
}

impl Student {
    /// Score a student against the weighted menu history.
    ///
    /// `option_ids` is the global option set; every student gets one priority per option.
    pub fn new(
        id: StudentId,
        orders: Vec<Order>,
        option_ids: &[OptionId],
        history: &MenuHistory,
        default_likelihood: f64,
    ) -> Self {
        let mut order_weight: HashMap<OptionId, f64> = HashMap::new();
        for order in &orders {
            *order_weight.entry(order.option_id).or_insert(0.0) += order.importance;
        }

        let options = option_ids
            .iter()
            .map(|&option_id| OptionPriority {
                option_id,
                priority: option_priority(
                    order_weight.get(&option_id).copied().unwrap_or(0.0),
                    history.available_weight(option_id),
                ),
            })
            .collect();

        let likelihood = order_likelihood(orders.len(), history.len(), default_likelihood);

        Self {
            id,
            orders,
            options,
            order_likelihood: likelihood,
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn options(&self) -> &[OptionPriority] {
        &self.options
    }

    pub fn priority(&self, option_id: OptionId) -> Option<f64> {
        self.options
            .iter()
            .find(|o| o.option_id == option_id)
            .map(|o| o.priority)
    }

    pub fn order_likelihood(&self) -> f64 {
        self.order_likelihood
    }

    /// Expected orders of this student for a prediction menu.
    ///
    /// Priorities of the offered options are rescaled so they sum to the
    /// student's order likelihood. With no demonstrated preference among them
    /// the likelihood is split evenly. A menu with none of the student's
    /// options yields nothing.
    pub fn expected_orders(&self, menu: &BTreeSet<OptionId>) -> Vec<ScaledOption> {
        let offered: Vec<&OptionPriority> = self
            .options
            .iter()
            .filter(|o| menu.contains(&o.option_id))
            .collect();

        if offered.is_empty() {
            return Vec::new();
        }

        let total_priority: f64 = offered.iter().map(|o| o.priority).sum();

        if total_priority > 0.0 {
            let scalar = self.order_likelihood / total_priority;
            offered
                .into_iter()
                .map(|o| ScaledOption {
                    option_id: o.option_id,
                    priority: o.priority,
                    priority_scaled: o.priority * scalar,
                })
                .collect()
        } else {
            let share = self.order_likelihood / offered.len() as f64;
            offered
                .into_iter()
                .map(|o| ScaledOption {
                    option_id: o.option_id,
                    priority: o.priority,
                    priority_scaled: share,
                })
                .collect()
        }
    }
}
