mod logical;
mod mathematical;
mod parametric;

pub use logical::find_peaks_logical;
pub use mathematical::find_peaks_mathematical;
pub use parametric::find_peaks_parametric;

use crate::config::{
    AnalysisConfig, LogicalPeakConfig, MathematicalPeakConfig, PeakDetectionConfig, PeakMethod,
};
use crate::error::Result;

/// Common interface of the peak detection algorithms
///
/// Each finder's configuration implements this trait, so a configured finder
/// can be selected at runtime.
pub trait PeakFinder: Send + Sync {
    /// Indices of the detected peaks, ascending
    fn find_peaks(&self, signal: &[f64]) -> Result<Vec<usize>>;

    fn method(&self) -> PeakMethod;
}

impl PeakFinder for PeakDetectionConfig {
    fn find_peaks(&self, signal: &[f64]) -> Result<Vec<usize>> {
        find_peaks_parametric(signal, self)
    }

    fn method(&self) -> PeakMethod {
        PeakMethod::Parametric
    }
}

impl PeakFinder for LogicalPeakConfig {
    fn find_peaks(&self, signal: &[f64]) -> Result<Vec<usize>> {
        find_peaks_logical(signal, self)
    }

    fn method(&self) -> PeakMethod {
        PeakMethod::Logical
    }
}

impl PeakFinder for MathematicalPeakConfig {
    fn find_peaks(&self, signal: &[f64]) -> Result<Vec<usize>> {
        find_peaks_mathematical(signal, self)
    }

    fn method(&self) -> PeakMethod {
        PeakMethod::Mathematical
    }
}

/// Build the finder selected by `config.method`
pub fn create_peak_finder(config: &AnalysisConfig) -> Box<dyn PeakFinder> {
    match config.method {
        PeakMethod::Parametric => Box::new(config.parametric.clone()),
        PeakMethod::Logical => Box::new(config.logical.clone()),
        PeakMethod::Mathematical => Box::new(config.mathematical.clone()),
    }
}

/// Run the finder selected by `config.method` on `signal`
pub fn find_peaks(signal: &[f64], config: &AnalysisConfig) -> Result<Vec<usize>> {
    create_peak_finder(config).find_peaks(signal)
}
