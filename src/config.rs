//! Configuration for filtering and peak detection.
//!
//! Every section can be loaded from TOML; missing fields take their defaults.
//!
//! ```toml
//! method = "parametric"
//!
//! [parametric]
//! minimum_height = 0.5
//! minimum_distance = 25
//! threshold = 0.0      # omit to derive from the signal range
//! edge = "both"
//!
//! [bandpass]
//! low_hz = 8.0
//! high_hz = 12.0
//! sampling_frequency = 100.0
//! ```

use crate::constants::DEFAULT_PADDING_ERROR;
use crate::error::{Result, SignalError};
use crate::signal_processing::{FrequencyRange, SpectralBandPass};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Flat-top handling for the parametric peak finder
///
/// A plateau of equal samples has a rising edge (its first sample) and a
/// falling edge (its last sample).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Strict local maxima only; plateaus never produce a peak
    None,
    /// Mark the first sample of a plateau
    #[default]
    Rising,
    /// Mark the last sample of a plateau
    Falling,
    /// Mark both ends of a plateau
    Both,
}

impl EdgePolicy {
    pub fn includes_rising(self) -> bool {
        matches!(self, EdgePolicy::Rising | EdgePolicy::Both)
    }

    pub fn includes_falling(self) -> bool {
        matches!(self, EdgePolicy::Falling | EdgePolicy::Both)
    }
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgePolicy::None => "none",
            EdgePolicy::Rising => "rising",
            EdgePolicy::Falling => "falling",
            EdgePolicy::Both => "both",
        };
        f.write_str(name)
    }
}

impl FromStr for EdgePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(EdgePolicy::None),
            "rising" => Ok(EdgePolicy::Rising),
            "falling" => Ok(EdgePolicy::Falling),
            "both" => Ok(EdgePolicy::Both),
            _ => Err(format!("invalid edge policy: {}", s)),
        }
    }
}

/// Peak detection algorithm
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PeakMethod {
    /// Multi-stage detector with edge, height, threshold and distance filters
    #[default]
    Parametric,
    /// Sliding-window strict local maximum
    Logical,
    /// RMS-normalised ratio with circular neighbours
    Mathematical,
}

impl fmt::Display for PeakMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeakMethod::Parametric => "parametric",
            PeakMethod::Logical => "logical",
            PeakMethod::Mathematical => "mathematical",
        };
        f.write_str(name)
    }
}

impl FromStr for PeakMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parametric" => Ok(PeakMethod::Parametric),
            "logical" => Ok(PeakMethod::Logical),
            "mathematical" => Ok(PeakMethod::Mathematical),
            _ => Err(format!("invalid peak method: {}", s)),
        }
    }
}

/// Parameters of the parametric peak finder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakDetectionConfig {
    /// Peaks below this value are dropped
    pub minimum_height: Option<f64>,
    /// Minimum spacing in samples; 0 and 1 disable distance pruning
    pub minimum_distance: usize,
    /// Minimum rise above both neighbours. `None` derives it as a quarter of
    /// the signal range; `Some(0.0)` disables the check.
    pub threshold: Option<f64>,
    /// Flat-top handling
    pub edge: EdgePolicy,
}

impl Default for PeakDetectionConfig {
    fn default() -> Self {
        Self {
            minimum_height: None,
            minimum_distance: 1,
            threshold: None,
            edge: EdgePolicy::Rising,
        }
    }
}

impl PeakDetectionConfig {
    /// Check that the numeric parameters are usable
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)?;
        if let Some(height) = self.minimum_height
            && height.is_nan()
        {
            return Err(SignalError::InvalidArgument(
                "minimum height must be a number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the sliding-window (logical) peak finder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicalPeakConfig {
    /// Half-width of the comparison window in samples
    pub min_distance: usize,
    /// Offset subtracted from the edge samples used as padding
    pub error: f64,
    /// Peaks must be strictly above this value
    pub minimum_peak_height: Option<f64>,
}

impl Default for LogicalPeakConfig {
    fn default() -> Self {
        Self {
            min_distance: 1,
            error: DEFAULT_PADDING_ERROR,
            minimum_peak_height: None,
        }
    }
}

impl LogicalPeakConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.error.is_finite() || self.error < 0.0 {
            return Err(SignalError::InvalidArgument(format!(
                "padding error must be a non-negative number, got {}",
                self.error
            )));
        }
        if let Some(height) = self.minimum_peak_height
            && height.is_nan()
        {
            return Err(SignalError::InvalidArgument(
                "minimum peak height must be a number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the RMS-ratio (mathematical) peak finder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathematicalPeakConfig {
    /// Minimum squared RMS ratio. `None` derives it as a quarter of the
    /// signal range.
    pub threshold: Option<f64>,
}

impl MathematicalPeakConfig {
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)
    }
}

/// Band-pass settings applied before peak detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPassConfig {
    /// Lower cutoff in Hz
    pub low_hz: f64,
    /// Upper cutoff in Hz
    pub high_hz: f64,
    /// Sample rate of the input signal in Hz
    pub sampling_frequency: f64,
}

impl BandPassConfig {
    /// Build the filter described by this section
    pub fn filter(&self) -> Result<SpectralBandPass> {
        let range = FrequencyRange::new(self.low_hz, self.high_hz)?;
        SpectralBandPass::new(range, self.sampling_frequency)
    }
}

/// Complete analysis configuration
///
/// # Example
/// ```
/// use eegpeaks::config::{AnalysisConfig, EdgePolicy, PeakMethod};
///
/// let config = AnalysisConfig::from_toml_str(
///     "method = \"parametric\"\n[parametric]\nminimum_distance = 5\nedge = \"both\"\n",
/// )
/// .unwrap();
/// assert_eq!(config.method, PeakMethod::Parametric);
/// assert_eq!(config.parametric.minimum_distance, 5);
/// assert_eq!(config.parametric.edge, EdgePolicy::Both);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Which peak finder to run
    pub method: PeakMethod,
    /// Parametric finder settings
    pub parametric: PeakDetectionConfig,
    /// Logical finder settings
    pub logical: LogicalPeakConfig,
    /// Mathematical finder settings
    pub mathematical: MathematicalPeakConfig,
    /// Optional band-pass stage run before detection
    pub bandpass: Option<BandPassConfig>,
}

impl AnalysisConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SignalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SignalError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.parametric.validate()?;
        self.logical.validate()?;
        self.mathematical.validate()?;
        if let Some(ref bandpass) = self.bandpass {
            bandpass.filter()?;
        }
        Ok(())
    }
}

fn validate_threshold(threshold: Option<f64>) -> Result<()> {
    match threshold {
        Some(t) if t.is_nan() || t < 0.0 => Err(SignalError::InvalidArgument(format!(
            "threshold must be non-negative, got {}",
            t
        ))),
        _ => Ok(()),
    }
}
