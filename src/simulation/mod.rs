mod noise;
mod signal;

pub use noise::{
    AdditiveNoiseConfig, ImpulseNoiseConfig, NoiseConfig, apply_noise, generate_noisy_signal,
    signal_power,
};
pub use signal::{Component, generate_signal, generate_sine};
