use crate::error::{Result, SignalError};
use num_complex::Complex;
use rustfft::FftPlanner;

/// Gain applied to every retained spectral bin.
///
/// This is not unit gain: it scales by sqrt(2) and rotates the phase by 45°.
/// Kept for output compatibility with existing recordings' analyses.
const RETAINED_BIN_GAIN: Complex<f64> = Complex::new(1.0, 1.0);

/// Pass band of a [`SpectralBandPass`] in Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange {
    low_hz: f64,
    high_hz: f64,
}

impl FrequencyRange {
    /// Create a pass band
    ///
    /// # Errors
    /// Returns `SignalError::InvalidArgument` if either bound is negative or
    /// not finite, or if `low_hz >= high_hz`.
    pub fn new(low_hz: f64, high_hz: f64) -> Result<Self> {
        if !low_hz.is_finite() || !high_hz.is_finite() {
            return Err(SignalError::InvalidArgument(format!(
                "frequency bounds must be finite: low={}, high={}",
                low_hz, high_hz
            )));
        }
        if low_hz < 0.0 {
            return Err(SignalError::InvalidArgument(format!(
                "lower cutoff must be non-negative, got {}",
                low_hz
            )));
        }
        if low_hz >= high_hz {
            return Err(SignalError::InvalidArgument(format!(
                "lower cutoff {} must be below upper cutoff {}",
                low_hz, high_hz
            )));
        }
        Ok(Self { low_hz, high_hz })
    }

    pub fn low_hz(&self) -> f64 {
        self.low_hz
    }

    pub fn high_hz(&self) -> f64 {
        self.high_hz
    }
}

/// Frequency-domain brick-wall band-pass filter
///
/// Transforms the whole signal with a real FFT, keeps the bins covering the
/// pass band and transforms back. The retained window is
/// `[floor(low * T) - 1, floor(high * T) - 1)` where `T` is the signal
/// duration in seconds, i.e. shifted one bin below the nominal band. A window
/// starting at `-1` wraps to the highest one-sided bin. Both quirks, and the
/// `(1 + 1i)` bin gain, are kept so results match earlier analyses.
#[derive(Debug, Clone, Copy)]
pub struct SpectralBandPass {
    range: FrequencyRange,
    sampling_frequency: f64,
}

impl SpectralBandPass {
    /// Create a new band-pass filter
    ///
    /// # Arguments
    /// * `range` - Pass band in Hz
    /// * `sampling_frequency` - Sample rate of the signals to filter in Hz
    ///
    /// # Errors
    /// Returns `SignalError::InvalidArgument` if `sampling_frequency` is not
    /// a positive finite number
    pub fn new(range: FrequencyRange, sampling_frequency: f64) -> Result<Self> {
        if !sampling_frequency.is_finite() || sampling_frequency <= 0.0 {
            return Err(SignalError::InvalidArgument(format!(
                "sampling frequency must be positive, got {}",
                sampling_frequency
            )));
        }

        let nyquist = sampling_frequency / 2.0;
        if range.high_hz() > nyquist {
            log::warn!(
                "Upper cutoff {} Hz exceeds Nyquist frequency {} Hz",
                range.high_hz(),
                nyquist
            );
        }

        Ok(Self {
            range,
            sampling_frequency,
        })
    }

    pub fn range(&self) -> FrequencyRange {
        self.range
    }

    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Filter a signal, returning a new signal of the same length
    pub fn process(&self, signal: &[f64]) -> Vec<f64> {
        let n = signal.len();
        if n == 0 {
            return Vec::new();
        }

        let duration = n as f64 / self.sampling_frequency;
        let start_bin = (self.range.low_hz * duration).floor() as i64;
        let end_bin = (self.range.high_hz * duration).floor() as i64;

        let spectrum = rfft(signal);
        let num_bins = spectrum.len();
        let mut retained = vec![Complex::new(0.0, 0.0); num_bins];

        let window_end = (end_bin - 1).min(num_bins as i64);
        for k in (start_bin - 1)..window_end {
            if let Some(bin) = resolve_bin(k, num_bins) {
                retained[bin] = RETAINED_BIN_GAIN * spectrum[bin];
            }
        }

        log::debug!(
            "Band-pass {}-{} Hz over {} samples: bins {}..{} of {}",
            self.range.low_hz,
            self.range.high_hz,
            n,
            start_bin - 1,
            end_bin - 1,
            num_bins
        );

        irfft(&retained, n)
    }
}

/// Band-pass filter a signal in one call
///
/// See [`SpectralBandPass`] for the bin window semantics.
pub fn band_pass_filter(
    signal: &[f64],
    range: FrequencyRange,
    sampling_frequency: f64,
) -> Result<Vec<f64>> {
    Ok(SpectralBandPass::new(range, sampling_frequency)?.process(signal))
}

/// Map a possibly negative bin index onto the one-sided spectrum.
/// Negative indices count back from the highest bin.
fn resolve_bin(k: i64, num_bins: usize) -> Option<usize> {
    let num_bins = num_bins as i64;
    let bin = if k < 0 { k + num_bins } else { k };
    (0..num_bins).contains(&bin).then_some(bin as usize)
}

/// One-sided spectrum of a real signal (`n / 2 + 1` bins)
fn rfft(signal: &[f64]) -> Vec<Complex<f64>> {
    let n = signal.len();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buf: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft.process(&mut buf);
    buf.truncate(n / 2 + 1);
    buf
}

/// Inverse of [`rfft`] producing `n` real samples.
/// Imaginary parts of the DC and Nyquist bins are discarded.
fn irfft(spectrum: &[Complex<f64>], n: usize) -> Vec<f64> {
    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(n);
    let mut buf = vec![Complex::new(0.0, 0.0); n];

    let num_bins = (n / 2 + 1).min(spectrum.len());
    buf[..num_bins].copy_from_slice(&spectrum[..num_bins]);
    buf[0].im = 0.0;
    if n.is_multiple_of(2) && n > 1 {
        buf[n / 2].im = 0.0;
    }

    let max_k = if n.is_multiple_of(2) {
        (n / 2).saturating_sub(1)
    } else {
        n / 2
    };
    for k in 1..=max_k {
        buf[n - k] = buf[k].conj();
    }

    ifft.process(&mut buf);
    let scale = 1.0 / n as f64;
    buf.into_iter().map(|c| c.re * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn sine(freq_hz: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
            .collect()
    }

    fn rms(signal: &[f64]) -> f64 {
        (signal.iter().map(|x| x * x).sum::<f64>() / signal.len() as f64).sqrt()
    }

    #[test]
    fn test_frequency_range_validation() {
        assert!(FrequencyRange::new(1.0, 40.0).is_ok());
        assert!(FrequencyRange::new(40.0, 1.0).is_err());
        assert!(FrequencyRange::new(10.0, 10.0).is_err());
        assert!(FrequencyRange::new(-1.0, 10.0).is_err());
        assert!(FrequencyRange::new(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_invalid_sampling_frequency() {
        let range = FrequencyRange::new(1.0, 40.0).unwrap();
        assert!(SpectralBandPass::new(range, 0.0).is_err());
        assert!(SpectralBandPass::new(range, -100.0).is_err());
        assert!(SpectralBandPass::new(range, f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_signal_stays_zero() {
        let range = FrequencyRange::new(1.0, 30.0).unwrap();
        for len in [1, 2, 7, 100, 257] {
            let output = band_pass_filter(&vec![0.0; len], range, 100.0).unwrap();
            assert_eq!(output.len(), len);
            for &sample in &output {
                assert_abs_diff_eq!(sample, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_empty_signal() {
        let range = FrequencyRange::new(1.0, 30.0).unwrap();
        assert!(band_pass_filter(&[], range, 100.0).unwrap().is_empty());
    }

    #[test]
    fn test_passes_in_band_sine() {
        let input = sine(10.0, 100.0, 1000);
        let range = FrequencyRange::new(5.0, 20.0).unwrap();
        let output = band_pass_filter(&input, range, 100.0).unwrap();

        assert_eq!(output.len(), input.len());
        // (1 + 1i) gain lifts the amplitude by sqrt(2)
        assert_abs_diff_eq!(rms(&output), rms(&input) * 2f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_out_of_band_sine() {
        let input = sine(40.0, 100.0, 1000);
        let range = FrequencyRange::new(5.0, 20.0).unwrap();
        let output = band_pass_filter(&input, range, 100.0).unwrap();

        let peak = output.iter().fold(0.0f64, |a, &b| a.max(b.abs()));
        assert!(peak < 1e-9, "Out-of-band sine leaked through: {}", peak);
    }

    #[test]
    fn test_window_is_shifted_one_bin_down() {
        // 1000 samples at 100 Hz: bin k is k * 0.1 Hz. A 5-20 Hz band keeps
        // bins 49..199, so 19.9 Hz (bin 199) is dropped and 4.9 Hz kept.
        let range = FrequencyRange::new(5.0, 20.0).unwrap();
        let dropped = band_pass_filter(&sine(19.9, 100.0, 1000), range, 100.0).unwrap();
        let kept = band_pass_filter(&sine(4.9, 100.0, 1000), range, 100.0).unwrap();

        assert!(rms(&dropped) < 1e-9);
        assert!(rms(&kept) > 0.5);
    }

    #[test]
    fn test_zero_lower_cutoff_wraps_to_top_bin() {
        // Alternating samples sit entirely in the Nyquist bin
        let input: Vec<f64> = (0..64).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let range = FrequencyRange::new(0.0, 10.0).unwrap();
        let output = band_pass_filter(&input, range, 64.0).unwrap();

        for (out, inp) in output.iter().zip(input.iter()) {
            assert_abs_diff_eq!(out, inp, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_odd_length_preserved() {
        let input = sine(10.0, 100.0, 999);
        let range = FrequencyRange::new(5.0, 20.0).unwrap();
        let output = band_pass_filter(&input, range, 100.0).unwrap();
        assert_eq!(output.len(), 999);
        assert!(rms(&output) > 0.5);
    }
}
