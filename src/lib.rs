pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod peaks;
pub mod processing;
pub mod samples;
pub mod signal_processing;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{AnalysisConfig, EdgePolicy, PeakDetectionConfig, PeakMethod};
pub use error::{Result, SignalError};
pub use peaks::{find_peaks, find_peaks_logical, find_peaks_mathematical, find_peaks_parametric};
pub use signal_processing::{FrequencyRange, band_pass_filter};
