use crate::config::MathematicalPeakConfig;
use crate::error::Result;
use crate::signal_processing::{auto_threshold, root_mean_square};

/// Detect peaks on the squared ratio of each sample to the signal RMS
///
/// A sample is a peak when its ratio `(x / rms)^2` exceeds the ratios of both
/// neighbours and the threshold. Neighbours wrap around: the first sample is
/// compared with the last and vice versa, so boundary indices can be
/// reported. The threshold defaults to a quarter of the signal range.
///
/// Assumes a roughly zero-mean signal; large offsets flatten the ratios.
pub fn find_peaks_mathematical(
    signal: &[f64],
    config: &MathematicalPeakConfig,
) -> Result<Vec<usize>> {
    config.validate()?;

    let n = signal.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let threshold = config.threshold.unwrap_or_else(|| auto_threshold(signal));

    let rms = root_mean_square(signal);
    if rms == 0.0 {
        log::warn!("Signal of {} samples has zero RMS; no peaks", n);
        return Ok(Vec::new());
    }

    let ratios: Vec<f64> = signal.iter().map(|&x| (x / rms).powi(2)).collect();

    let ind: Vec<usize> = (0..n)
        .filter(|&i| {
            let previous = ratios[(i + n - 1) % n];
            let next = ratios[(i + 1) % n];
            ratios[i] > previous && ratios[i] > next && ratios[i] > threshold
        })
        .collect();

    log::debug!(
        "Mathematical peak finder: {} peaks in {} samples (rms {:.4}, threshold {:.4})",
        ind.len(),
        n,
        rms,
        threshold
    );

    Ok(ind)
}
