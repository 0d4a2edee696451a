pub mod bandpass;
pub mod math;

pub use bandpass::{FrequencyRange, SpectralBandPass, band_pass_filter};
pub use math::{auto_threshold, first_difference, root_mean_square, signal_range};
