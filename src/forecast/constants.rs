/// Bandwidth of the weather kernel: `importance = exp(-(dt^2) / BANDWIDTH)`.
///
/// At 30, a 5 degree difference keeps ~43% of an observation's weight and a
/// 10 degree difference ~4%.
pub const DEFAULT_BANDWIDTH: f64 = 30.0;

/// Order likelihood assumed when there is no menu history at all.
pub const DEFAULT_ORDER_LIKELIHOOD: f64 = 0.5;

/// Tolerance for comparing conserved likelihood sums.
pub const LIKELIHOOD_TOLERANCE: f64 = 1e-9;

/// Seconds in one cafeteria day, used to default the prediction date.
pub const SECONDS_PER_DAY: i64 = 86_400;
