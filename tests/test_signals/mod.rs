#![allow(dead_code)]

use eegpeaks::simulation::{Component, NoiseConfig, generate_noisy_signal};

pub const SAMPLE_RATE: f64 = 100.0;

/// Noisy 3 Hz sine, reproducible per seed
pub fn noisy_sine(seed: u64, num_samples: usize, snr_db: f64) -> Vec<f64> {
    generate_noisy_signal(
        num_samples,
        SAMPLE_RATE,
        &[Component::Sine {
            freq_hz: 3.0,
            amplitude: 1.0,
            phase: 0.0,
        }],
        &NoiseConfig::default().with_seed(seed).with_awgn(snr_db),
    )
}

/// Flat baseline with Gaussian bumps at the given (center, height) pairs
pub fn bumps(num_samples: usize, peaks: &[(usize, f64)], width: f64) -> Vec<f64> {
    let components: Vec<Component> = peaks
        .iter()
        .map(|&(center, height)| Component::Bump {
            center,
            height,
            width,
        })
        .collect();
    generate_noisy_signal(num_samples, SAMPLE_RATE, &components, &NoiseConfig::default())
}

pub fn assert_strictly_ascending(peaks: &[usize]) {
    assert!(
        peaks.windows(2).all(|w| w[0] < w[1]),
        "Peaks not strictly ascending: {:?}",
        peaks
    );
}
