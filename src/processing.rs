use crate::config::{AnalysisConfig, PeakMethod};
use crate::error::Result;
use crate::peaks::{PeakFinder, create_peak_finder};
use crate::signal_processing::SpectralBandPass;

/// Peaks found in one signal
#[derive(Debug, Clone, PartialEq)]
pub struct PeakAnalysis {
    /// Algorithm that produced `peaks`
    pub method: PeakMethod,
    /// Number of input samples
    pub sample_count: usize,
    /// Band-passed signal, when a band-pass stage is configured
    pub filtered: Option<Vec<f64>>,
    /// Peak indices, ascending
    pub peaks: Vec<usize>,
    /// Value of the analysed signal (filtered if applicable) at each peak
    pub peak_values: Vec<f64>,
}

impl PeakAnalysis {
    /// Sample distances between consecutive peaks
    pub fn peak_intervals(&self) -> Vec<usize> {
        self.peaks.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

/// Optional band-pass followed by peak detection
pub struct SignalProcessor {
    bandpass: Option<SpectralBandPass>,
    finder: Box<dyn PeakFinder>,
}

impl SignalProcessor {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let bandpass = match config.bandpass {
            Some(ref section) => Some(section.filter()?),
            None => None,
        };

        Ok(Self {
            bandpass,
            finder: create_peak_finder(config),
        })
    }

    pub fn process(&self, signal: &[f64]) -> Result<PeakAnalysis> {
        let filtered = self.bandpass.as_ref().map(|bp| bp.process(signal));
        let analysed = filtered.as_deref().unwrap_or(signal);

        let peaks = self.finder.find_peaks(analysed)?;
        let peak_values = peaks.iter().map(|&i| analysed[i]).collect();

        log::info!(
            "{} peaks in {} samples ({} method{})",
            peaks.len(),
            signal.len(),
            self.finder.method(),
            if filtered.is_some() { ", band-passed" } else { "" }
        );

        Ok(PeakAnalysis {
            method: self.finder.method(),
            sample_count: signal.len(),
            filtered,
            peaks,
            peak_values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandPassConfig;

    #[test]
    fn test_process_without_bandpass() {
        let mut config = AnalysisConfig::default();
        config.parametric.threshold = Some(0.0);
        let processor = SignalProcessor::new(&config).unwrap();

        let signal = [0.0, 1.0, 3.0, 1.0, 0.0, 0.0, 2.0, 4.0, 2.0, 0.0];
        let analysis = processor.process(&signal).unwrap();

        assert_eq!(analysis.method, PeakMethod::Parametric);
        assert_eq!(analysis.sample_count, 10);
        assert!(analysis.filtered.is_none());
        assert_eq!(analysis.peaks, vec![2, 7]);
        assert_eq!(analysis.peak_values, vec![3.0, 4.0]);
        assert_eq!(analysis.peak_intervals(), vec![5]);
    }

    #[test]
    fn test_process_with_bandpass_detects_on_filtered_signal() {
        let config = AnalysisConfig {
            bandpass: Some(BandPassConfig {
                low_hz: 5.0,
                high_hz: 20.0,
                sampling_frequency: 100.0,
            }),
            ..AnalysisConfig::default()
        };
        let processor = SignalProcessor::new(&config).unwrap();

        let analysis = processor.process(&[0.0; 200]).unwrap();
        let filtered = analysis.filtered.unwrap();
        assert_eq!(filtered.len(), 200);
        assert!(analysis.peaks.is_empty());
    }

    #[test]
    fn test_invalid_bandpass_rejected() {
        let config = AnalysisConfig {
            bandpass: Some(BandPassConfig {
                low_hz: 20.0,
                high_hz: 5.0,
                sampling_frequency: 100.0,
            }),
            ..AnalysisConfig::default()
        };
        assert!(SignalProcessor::new(&config).is_err());
    }
}
