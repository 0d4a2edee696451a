use serde::Deserialize;
use std::f64::consts::PI;

/// Building block of a synthetic signal
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Component {
    /// Sinusoid `amplitude * sin(2π f t + phase)`
    Sine {
        freq_hz: f64,
        amplitude: f64,
        #[serde(default)]
        phase: f64,
    },
    /// Gaussian bump centred on a sample index
    Bump {
        center: usize,
        height: f64,
        width: f64,
    },
    /// Flat run of `length` samples at `height`, added on top of the rest
    Plateau {
        start: usize,
        length: usize,
        height: f64,
    },
}

impl Component {
    fn add_to(&self, signal: &mut [f64], sample_rate: f64) {
        match *self {
            Component::Sine {
                freq_hz,
                amplitude,
                phase,
            } => {
                let omega = 2.0 * PI * freq_hz;
                for (i, s) in signal.iter_mut().enumerate() {
                    let t = i as f64 / sample_rate;
                    *s += amplitude * (omega * t + phase).sin();
                }
            }
            Component::Bump {
                center,
                height,
                width,
            } => {
                let width = width.max(f64::EPSILON);
                for (i, s) in signal.iter_mut().enumerate() {
                    let d = (i as f64 - center as f64) / width;
                    *s += height * (-0.5 * d * d).exp();
                }
            }
            Component::Plateau {
                start,
                length,
                height,
            } => {
                let end = (start + length).min(signal.len());
                for s in signal.iter_mut().take(end).skip(start) {
                    *s += height;
                }
            }
        }
    }
}

/// Sum of components over `num_samples` samples
pub fn generate_signal(num_samples: usize, sample_rate: f64, components: &[Component]) -> Vec<f64> {
    let mut signal = vec![0.0; num_samples];
    for component in components {
        component.add_to(&mut signal, sample_rate);
    }
    signal
}

/// Pure unit-phase sine wave
pub fn generate_sine(freq_hz: f64, amplitude: f64, sample_rate: f64, num_samples: usize) -> Vec<f64> {
    generate_signal(
        num_samples,
        sample_rate,
        &[Component::Sine {
            freq_hz,
            amplitude,
            phase: 0.0,
        }],
    )
}
