use anyhow::{Context, Result, ensure};
use clap::Parser;
use eegpeaks::samples::save_samples;
use eegpeaks::simulation::{
    AdditiveNoiseConfig, Component, ImpulseNoiseConfig, NoiseConfig, generate_noisy_signal,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Spike amplitude when impulse noise is requested only by rate
const DEFAULT_IMPULSE_AMPLITUDE: f64 = 1.0;

#[derive(Parser, Debug)]
#[command(name = "generate_signal")]
#[command(about = "Write synthetic sample files for exercising the filter and peak finders")]
struct Args {
    /// TOML signal description: [[component]] tables, optional [awgn] and [impulse]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the generated files
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// One unit sine per frequency in Hz, added to the configured components.
    /// Either a list ("4,10") or an inclusive range ("1-30:0.5")
    #[arg(long)]
    sines: Option<String>,

    /// Noise realisations per signal
    #[arg(short, long, default_value_t = 1)]
    trials: u32,

    /// Seed of the first file; later files use consecutive seeds
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Length of each signal in seconds
    #[arg(short, long, default_value_t = 10.0)]
    duration: f64,

    /// Sampling frequency in Hz
    #[arg(long, default_value_t = 100.0)]
    fs: f64,

    /// File name prefix
    #[arg(long, default_value = "synth")]
    prefix: String,

    /// Also write manifest.json describing every file
    #[arg(long)]
    manifest: bool,

    /// Additive white noise SNR in dB (replaces [awgn])
    #[arg(long)]
    snr: Option<f64>,

    /// Impulse rate in Hz (replaces the [impulse] rate)
    #[arg(long)]
    impulse_rate: Option<f64>,

    /// Impulse amplitude (replaces the [impulse] amplitude)
    #[arg(long)]
    impulse_amplitude: Option<f64>,
}

/// Signal description file
#[derive(Debug, Default, Deserialize)]
struct SignalFile {
    #[serde(default)]
    component: Vec<Component>,
    awgn: Option<AdditiveNoiseConfig>,
    impulse: Option<ImpulseNoiseConfig>,
}

impl SignalFile {
    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Noise sources with command-line values layered on top
    fn noise(&self, args: &Args) -> NoiseConfig {
        let additive = args
            .snr
            .map(|snr_db| AdditiveNoiseConfig { snr_db })
            .or_else(|| self.awgn.clone());

        let mut impulse = self.impulse.clone();
        if let Some(rate_hz) = args.impulse_rate {
            impulse
                .get_or_insert(ImpulseNoiseConfig {
                    rate_hz,
                    amplitude: DEFAULT_IMPULSE_AMPLITUDE,
                    duration_samples: 1,
                })
                .rate_hz = rate_hz;
        }
        if let (Some(impulse), Some(amplitude)) = (impulse.as_mut(), args.impulse_amplitude) {
            impulse.amplitude = amplitude;
        }

        NoiseConfig {
            seed: None,
            additive,
            impulse,
        }
    }

    /// Labelled component sets, one per requested sine or a single set
    /// from the file alone
    fn signals(&self, sines: Option<&str>) -> Result<Vec<(String, Vec<Component>)>> {
        let Some(sines) = sines else {
            ensure!(
                !self.component.is_empty(),
                "Nothing to generate: pass --sines or a config with [[component]] tables"
            );
            return Ok(vec![("signal".to_string(), self.component.clone())]);
        };

        Ok(parse_frequencies(sines)?
            .into_iter()
            .map(|freq_hz| {
                let mut components = self.component.clone();
                components.push(Component::Sine {
                    freq_hz,
                    amplitude: 1.0,
                    phase: 0.0,
                });
                (format!("{:.2}hz", freq_hz), components)
            })
            .collect())
    }
}

#[derive(Debug, Serialize)]
struct Manifest {
    sampling_frequency: f64,
    num_samples: usize,
    files: Vec<GeneratedFile>,
}

#[derive(Debug, Serialize)]
struct GeneratedFile {
    file: String,
    label: String,
    trial: u32,
    seed: u64,
}

/// Parse "4,10,12.5" or an inclusive "START-END:STEP" range
fn parse_frequencies(list: &str) -> Result<Vec<f64>> {
    let Some((bounds, step)) = list.split_once(':') else {
        return list
            .split(',')
            .map(|f| {
                f.trim()
                    .parse::<f64>()
                    .with_context(|| format!("Invalid frequency '{}'", f.trim()))
            })
            .collect();
    };

    let (start, end) = bounds
        .split_once('-')
        .context("Range must look like START-END:STEP")?;
    let start: f64 = start.trim().parse().context("Invalid range start")?;
    let end: f64 = end.trim().parse().context("Invalid range end")?;
    let step: f64 = step.trim().parse().context("Invalid range step")?;
    ensure!(step.is_finite() && step > 0.0, "Step must be positive");
    ensure!(start <= end, "Range start {} is above its end {}", start, end);

    // Index-based so the last value is not lost to accumulated rounding
    let count = ((end - start) / step + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    ensure!(
        args.fs > 0.0 && args.duration > 0.0,
        "Sampling frequency and duration must be positive"
    );

    let description = match args.config {
        Some(ref path) => SignalFile::load(path)?,
        None => SignalFile::default(),
    };
    let signals = description.signals(args.sines.as_deref())?;
    let noise = description.noise(&args);
    let num_samples = (args.duration * args.fs).round() as usize;

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let mut files = Vec::with_capacity(signals.len() * args.trials as usize);
    for (label, components) in &signals {
        for trial in 0..args.trials {
            let seed = args.seed.wrapping_add(files.len() as u64);
            let signal = generate_noisy_signal(
                num_samples,
                args.fs,
                components,
                &noise.clone().with_seed(seed),
            );

            let file = format!("{}_{}_t{:02}.txt", args.prefix, label, trial);
            let path = args.output_dir.join(&file);
            save_samples(&path, &signal)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {} (seed {})", path.display(), seed);

            files.push(GeneratedFile {
                file,
                label: label.clone(),
                trial,
                seed,
            });
        }
    }

    let count = files.len();
    if args.manifest {
        let manifest = Manifest {
            sampling_frequency: args.fs,
            num_samples,
            files,
        };
        let path = args.output_dir.join("manifest.json");
        let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    eprintln!("Generated {} files in {}", count, args.output_dir.display());
    Ok(())
}
