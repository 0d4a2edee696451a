use crate::constants::AUTO_THRESHOLD_DIVISOR;

/// Peak-to-peak range of a signal (max - min), ignoring NaN samples.
///
/// Returns 0.0 for an empty signal.
pub fn signal_range(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
    if max.is_finite() && min.is_finite() {
        max - min
    } else {
        0.0
    }
}

/// Threshold used when the caller leaves it unset: a quarter of the range.
pub fn auto_threshold(signal: &[f64]) -> f64 {
    signal_range(signal) / AUTO_THRESHOLD_DIVISOR
}

/// Root-mean-square level of a signal
pub fn root_mean_square(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64).sqrt()
}

/// First difference `x[i+1] - x[i]`, one element shorter than the input.
pub fn first_difference(signal: &[f64]) -> Vec<f64> {
    signal.windows(2).map(|w| w[1] - w[0]).collect()
}
