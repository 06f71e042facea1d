use std::collections::{BTreeSet, HashMap};

use crate::forecast::importance::WeatherModel;
use crate::models::{DayId, OptionId};

/// A historical day's menu before weather is joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuDay {
    pub day_id: DayId,
    pub options: BTreeSet<OptionId>,
}

impl MenuDay {
    /// Repeated option ids collapse: an option is either offered on a day or not.
    pub fn new(day_id: DayId, options: impl IntoIterator<Item = OptionId>) -> Self {
        Self {
            day_id,
            options: options.into_iter().collect(),
        }
    }

    /// Attach the day's recorded temperature and its relevance to the prediction.
    pub fn weigh(self, temperature: f64, model: &WeatherModel) -> Menu {
        Menu {
            day_id: self.day_id,
            options: self.options,
            temperature,
            importance: model.importance(temperature),
        }
    }
}

/// A historical day's menu with its weather relevance.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    day_id: DayId,
    options: BTreeSet<OptionId>,
    temperature: f64,
    importance: f64,
}

impl Menu {
    pub fn day_id(&self) -> DayId {
        self.day_id
    }

    pub fn options(&self) -> impl Iterator<Item = OptionId> + '_ {
        self.options.iter().copied()
    }

    pub fn offers(&self, option_id: OptionId) -> bool {
        self.options.contains(&option_id)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Weight in (0, 1].
    pub fn importance(&self) -> f64 {
        self.importance
    }
}

/// All weighted historical menus.
///
/// Caches, per option, the summed importance of the days it was offered.
#[derive(Debug, Clone, Default)]
pub struct MenuHistory {
    days: usize,
    available_weight: HashMap<OptionId, f64>,
}

impl MenuHistory {
    pub fn new(menus: Vec<Menu>) -> Self {
        let mut available_weight: HashMap<OptionId, f64> = HashMap::new();
        for menu in &menus {
            for option_id in menu.options() {
                *available_weight.entry(option_id).or_insert(0.0) += menu.importance();
            }
        }
        Self {
            days: menus.len(),
            available_weight,
        }
    }

    /// Summed importance of the days on which `option_id` was offered.
    pub fn available_weight(&self, option_id: OptionId) -> f64 {
        self.available_weight.get(&option_id).copied().unwrap_or(0.0)
    }

    /// Number of historical menu days.
    pub fn len(&self) -> usize {
        self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }
}
