use crate::forecast::constants::DEFAULT_BANDWIDTH;

/// Weight of a historical observation given its recorded temperature.
///
/// Gaussian kernel centred on `predicted`: 1.0 for an exact match, decaying
/// towards 0 as the difference grows. Gaps wide enough to underflow `exp`
/// are clamped to `f64::MIN_POSITIVE`.
#[inline]
pub fn weather_importance(recorded: f64, predicted: f64, bandwidth: f64) -> f64 {
    let difference = recorded - predicted;
    (-(difference * difference) / bandwidth)
        .exp()
        .max(f64::MIN_POSITIVE)
}

/// Importance model fixed to one prediction temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherModel {
    pub predicted_temperature: f64,
    pub bandwidth: f64,
}

impl WeatherModel {
    pub fn new(predicted_temperature: f64, bandwidth: f64) -> Self {
        Self {
            predicted_temperature,
            bandwidth,
        }
    }

    /// Importance of an observation recorded at `temperature`.
    #[inline]
    pub fn importance(&self, temperature: f64) -> f64 {
        weather_importance(temperature, self.predicted_temperature, self.bandwidth)
    }
}

impl Default for WeatherModel {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_BANDWIDTH)
    }
}
