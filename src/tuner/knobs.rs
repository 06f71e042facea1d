use rand::Rng;

use crate::forecast::ForecastConfig;

/// Min/max ranges for each tunable knob.
#[derive(Debug, Clone)]
pub struct KnobRanges {
    /// (min, max) for the weather kernel bandwidth
    pub bandwidth: (f64, f64),
    /// (min, max) for the no-history order likelihood
    pub default_order_likelihood: (f64, f64),
}

impl Default for KnobRanges {
    fn default() -> Self {
        Self {
            bandwidth: (2.0, 200.0),
            default_order_likelihood: (0.05, 0.95),
        }
    }
}

/// Number of tunable knobs.
pub const NUM_KNOBS: usize = 2;

/// Generate a random config within the given ranges.
pub fn random_config(rng: &mut impl Rng, ranges: &KnobRanges) -> ForecastConfig {
    ForecastConfig {
        bandwidth: rng.gen_range(ranges.bandwidth.0..=ranges.bandwidth.1),
        default_order_likelihood: rng
            .gen_range(ranges.default_order_likelihood.0..=ranges.default_order_likelihood.1),
    }
}

/// Copy of `config` with one knob multiplied by `factor`, clamped to range.
///
/// `knob_idx`: 0=bandwidth, 1=default_order_likelihood.
pub fn perturb(
    config: &ForecastConfig,
    knob_idx: usize,
    factor: f64,
    ranges: &KnobRanges,
) -> ForecastConfig {
    let mut new = config.clone();
    match knob_idx {
        0 => {
            new.bandwidth =
                (config.bandwidth * factor).clamp(ranges.bandwidth.0, ranges.bandwidth.1);
        }
        1 => {
            new.default_order_likelihood = (config.default_order_likelihood * factor).clamp(
                ranges.default_order_likelihood.0,
                ranges.default_order_likelihood.1,
            );
        }
        _ => {}
    }
    new
}

/// Compact one-line form of a config.
pub fn display(config: &ForecastConfig) -> String {
    format!(
        "bw={:.2} dol={:.3}",
        config.bandwidth, config.default_order_likelihood
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_config_within_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = KnobRanges::default();
        for _ in 0..50 {
            let config = random_config(&mut rng, &ranges);
            assert!(config.bandwidth >= ranges.bandwidth.0);
            assert!(config.bandwidth <= ranges.bandwidth.1);
            assert!(config.default_order_likelihood >= ranges.default_order_likelihood.0);
            assert!(config.default_order_likelihood <= ranges.default_order_likelihood.1);
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_perturb_single_knob() {
        let config = ForecastConfig::default();
        let ranges = KnobRanges::default();

        let wider = perturb(&config, 0, 1.5, &ranges);
        assert!((wider.bandwidth - 45.0).abs() < 1e-9);
        assert_eq!(wider.default_order_likelihood, config.default_order_likelihood);

        let lower = perturb(&config, 1, 0.5, &ranges);
        assert!((lower.default_order_likelihood - 0.25).abs() < 1e-9);
        assert_eq!(lower.bandwidth, config.bandwidth);
    }

    #[test]
    fn test_perturb_clamps() {
        let ranges = KnobRanges::default();
        let config = ForecastConfig {
            bandwidth: 180.0,
            default_order_likelihood: 0.9,
        };
        assert_eq!(perturb(&config, 0, 2.0, &ranges).bandwidth, 200.0);
        assert_eq!(perturb(&config, 1, 2.0, &ranges).default_order_likelihood, 0.95);
        assert_eq!(perturb(&config, 7, 2.0, &ranges), config);
    }

    #[test]
    fn test_display() {
        assert_eq!(display(&ForecastConfig::default()), "bw=30.00 dol=0.500");
    }
}
