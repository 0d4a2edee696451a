//! Numeric constants shared by the peak finders and the band-pass filter.

/// Divisor applied to the signal range when a threshold is auto-computed.
pub const AUTO_THRESHOLD_DIVISOR: f64 = 4.0;

/// Default offset subtracted from the boundary samples when the logical
/// peak finder pads the signal.
pub const DEFAULT_PADDING_ERROR: f64 = 1e-6;

/// Shortest signal that can contain an interior sample.
pub const MIN_PEAK_SIGNAL_LEN: usize = 3;
