use crate::config::LogicalPeakConfig;
use crate::error::Result;

/// Detect strict local maxima over a sliding window
///
/// A sample is a peak when it is strictly greater than every sample up to
/// `min_distance` positions before and after it. Outside the signal the
/// window sees the first/last sample lowered by `error`. The first and last
/// samples are never reported. When `minimum_peak_height` is set, peaks must
/// be strictly above it.
///
/// # Errors
/// Returns `SignalError::InvalidArgument` for a negative or non-finite
/// padding error
pub fn find_peaks_logical(signal: &[f64], config: &LogicalPeakConfig) -> Result<Vec<usize>> {
    config.validate()?;

    let size = signal.len();
    if size == 0 {
        return Ok(Vec::new());
    }

    // Offsets past the signal length only ever reach the padding
    let window = config.min_distance.clamp(1, size);

    let mut padded = Vec::with_capacity(size + 2 * window);
    padded.extend(std::iter::repeat_n(signal[0] - config.error, window));
    padded.extend_from_slice(signal);
    padded.extend(std::iter::repeat_n(signal[size - 1] - config.error, window));

    let central = &padded[window..window + size];
    let mut is_candidate = vec![true; size];

    for offset in 0..window {
        let before = &padded[window - offset - 1..window - offset - 1 + size];
        let after = &padded[window + offset + 1..window + offset + 1 + size];

        for (k, flag) in is_candidate.iter_mut().enumerate() {
            *flag = *flag && central[k] > before[k] && central[k] > after[k];
        }
    }

    let mut ind: Vec<usize> = is_candidate
        .iter()
        .enumerate()
        .filter_map(|(k, &flag)| flag.then_some(k))
        .filter(|&k| k != 0 && k != size - 1)
        .collect();

    if let Some(height) = config.minimum_peak_height {
        ind.retain(|&k| signal[k] > height);
    }

    log::debug!(
        "Logical peak finder: {} peaks in {} samples (window {})",
        ind.len(),
        size,
        window
    );

    Ok(ind)
}
