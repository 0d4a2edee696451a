use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::{Component, generate_signal};

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub additive: Option<AdditiveNoiseConfig>,
    pub impulse: Option<ImpulseNoiseConfig>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f64) -> Self {
        self.additive = Some(AdditiveNoiseConfig { snr_db });
        self
    }

    pub fn with_impulse(mut self, rate_hz: f64, amplitude: f64, duration_samples: usize) -> Self {
        self.impulse = Some(ImpulseNoiseConfig {
            rate_hz,
            amplitude,
            duration_samples,
        });
        self
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct AdditiveNoiseConfig {
    pub snr_db: f64,
}

/// Randomly spaced rectangular spikes of random sign
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ImpulseNoiseConfig {
    /// Mean spike rate
    pub rate_hz: f64,
    pub amplitude: f64,
    /// Spike width in samples
    #[serde(default = "default_impulse_width")]
    pub duration_samples: usize,
}

fn default_impulse_width() -> usize {
    1
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Mean square of a signal
pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64
}

fn apply_additive_noise(signal: &mut [f64], config: &AdditiveNoiseConfig, rng: &mut ChaCha8Rng) {
    let sig_power = signal_power(signal);
    if sig_power == 0.0 {
        return;
    }

    let snr_linear = 10.0_f64.powf(config.snr_db / 10.0);
    let noise_std = (sig_power / snr_linear).sqrt();

    let Ok(normal) = Normal::new(0.0, noise_std) else {
        log::warn!("Invalid noise level for SNR {} dB", config.snr_db);
        return;
    };

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng);
    }
}

fn apply_impulse_noise(
    signal: &mut [f64],
    config: &ImpulseNoiseConfig,
    sample_rate: f64,
    rng: &mut ChaCha8Rng,
) {
    let n = signal.len();
    if n == 0 || config.rate_hz <= 0.0 {
        return;
    }

    let avg_samples_between_impulses = sample_rate / config.rate_hz;

    let mut pos = 0usize;
    loop {
        let interval = (rng.random::<f64>() * 2.0 * avg_samples_between_impulses) as usize;
        pos += interval.max(1);

        if pos >= n {
            break;
        }

        let sign = if rng.random::<bool>() { 1.0 } else { -1.0 };
        let end = (pos + config.duration_samples).min(n);

        for sample in signal[pos..end].iter_mut() {
            *sample += sign * config.amplitude;
        }
    }
}

/// Apply the configured noise sources to a copy of `clean_signal`
pub fn apply_noise(clean_signal: &[f64], config: &NoiseConfig, sample_rate: f64) -> Vec<f64> {
    let mut signal = clean_signal.to_vec();
    let mut rng = create_rng(config.seed);

    if let Some(ref additive_config) = config.additive {
        apply_additive_noise(&mut signal, additive_config, &mut rng);
    }

    if let Some(ref impulse_config) = config.impulse {
        apply_impulse_noise(&mut signal, impulse_config, sample_rate, &mut rng);
    }

    signal
}

pub fn generate_noisy_signal(
    num_samples: usize,
    sample_rate: f64,
    components: &[Component],
    noise_config: &NoiseConfig,
) -> Vec<f64> {
    let clean = generate_signal(num_samples, sample_rate, components);
    apply_noise(&clean, noise_config, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::generate_sine;

    #[test]
    fn test_awgn_snr() {
        let clean = generate_sine(10.0, 1.0, 1000.0, 20000);
        let config = NoiseConfig::default().with_seed(7).with_awgn(10.0);
        let noisy = apply_noise(&clean, &config, 1000.0);

        let noise: Vec<f64> = noisy.iter().zip(&clean).map(|(n, c)| n - c).collect();
        let snr_db = 10.0 * (signal_power(&clean) / signal_power(&noise)).log10();
        assert!((snr_db - 10.0).abs() < 0.5, "measured SNR {} dB", snr_db);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let clean = generate_sine(10.0, 1.0, 1000.0, 1000);
        let config = NoiseConfig::default()
            .with_seed(42)
            .with_awgn(5.0)
            .with_impulse(20.0, 2.0, 3);
        assert_eq!(
            apply_noise(&clean, &config, 1000.0),
            apply_noise(&clean, &config, 1000.0)
        );
    }

    #[test]
    fn test_impulse_noise_adds_spikes() {
        let clean = vec![0.0; 10000];
        let config = NoiseConfig::default().with_seed(1).with_impulse(50.0, 2.0, 1);
        let noisy = apply_noise(&clean, &config, 1000.0);
        let spikes = noisy.iter().filter(|s| s.abs() > 1.0).count();
        assert!(spikes > 100, "expected roughly 500 spikes, got {}", spikes);
    }

    #[test]
    fn test_silent_signal_unchanged_by_awgn() {
        let clean = vec![0.0; 100];
        let config = NoiseConfig::default().with_seed(3).with_awgn(10.0);
        assert_eq!(apply_noise(&clean, &config, 100.0), clean);
    }
}
