use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

use eegpeaks::config::{AnalysisConfig, BandPassConfig, EdgePolicy, PeakMethod};
use eegpeaks::output::{OutputFormat, PeakReport, create_formatter};
use eegpeaks::processing::SignalProcessor;
use eegpeaks::samples::{read_samples, save_samples};

#[derive(Parser, Debug)]
#[command(name = "eegpeaks")]
#[command(about = "Band-pass filter sampled signals and detect their peaks", long_about = None)]
struct Args {
    /// Sample files (numbers separated by whitespace, commas or newlines)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Peak detection method (overrides config)
    #[arg(short = 'm', long, value_enum)]
    method: Option<PeakMethod>,

    /// Flat-top edge policy for the parametric method
    #[arg(long, value_enum)]
    edge: Option<EdgePolicy>,

    /// Minimum peak height
    #[arg(long)]
    min_height: Option<f64>,

    /// Minimum distance between peaks in samples
    #[arg(short = 'd', long)]
    min_distance: Option<usize>,

    /// Neighbour threshold (0 disables; omit to derive from the signal range)
    #[arg(short = 't', long)]
    threshold: Option<f64>,

    /// Band-pass cutoffs in Hz, applied before detection
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], requires = "fs")]
    bandpass: Option<Vec<f64>>,

    /// Sampling frequency in Hz
    #[arg(long)]
    fs: Option<f64>,

    /// Write the band-passed signal next to each input with this suffix
    #[arg(long)]
    dump_filtered: Option<String>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    let processor = SignalProcessor::new(&config).context("Invalid analysis configuration")?;

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    for path in &args.files {
        let source = path.display().to_string();
        let report = match analyze_file(path, &processor, args.dump_filtered.as_deref()) {
            Ok(report) => report,
            Err(e) => {
                log::error!("{}: {:#}", source, e);
                PeakReport::from_error(&source, &format!("{:#}", e))
            }
        };
        println!("{}", formatter.format(&report));
    }

    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<AnalysisConfig> {
    let mut config = match args.config {
        Some(ref path) => AnalysisConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    apply_overrides(args, &mut config)?;
    config.validate()?;
    Ok(config)
}

/// Command-line values take precedence over the config file
fn apply_overrides(args: &Args, config: &mut AnalysisConfig) -> anyhow::Result<()> {
    if let Some(method) = args.method {
        config.method = method;
    }
    if let Some(edge) = args.edge {
        config.parametric.edge = edge;
    }
    if let Some(height) = args.min_height {
        config.parametric.minimum_height = Some(height);
        config.logical.minimum_peak_height = Some(height);
    }
    if let Some(distance) = args.min_distance {
        config.parametric.minimum_distance = distance;
        config.logical.min_distance = distance;
    }
    if let Some(threshold) = args.threshold {
        config.parametric.threshold = Some(threshold);
        config.mathematical.threshold = Some(threshold);
    }

    if let Some(ref cutoffs) = args.bandpass {
        let fs = args.fs.context("--bandpass requires --fs")?;
        config.bandpass = Some(BandPassConfig {
            low_hz: cutoffs[0],
            high_hz: cutoffs[1],
            sampling_frequency: fs,
        });
    } else if let Some(fs) = args.fs {
        match config.bandpass.as_mut() {
            Some(bandpass) => bandpass.sampling_frequency = fs,
            None => log::warn!("--fs {} ignored: no band-pass configured", fs),
        }
    }
    Ok(())
}

fn analyze_file(
    path: &Path,
    processor: &SignalProcessor,
    dump_suffix: Option<&str>,
) -> anyhow::Result<PeakReport> {
    let signal =
        read_samples(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let analysis = processor.process(&signal)?;

    if let (Some(suffix), Some(filtered)) = (dump_suffix, analysis.filtered.as_deref()) {
        let mut dump_path = path.as_os_str().to_owned();
        dump_path.push(suffix);
        let dump_path = PathBuf::from(dump_path);
        save_samples(&dump_path, filtered)
            .with_context(|| format!("Failed to write {}", dump_path.display()))?;
        log::info!("Filtered signal written to {}", dump_path.display());
    }

    Ok(PeakReport::from_analysis(&path.display().to_string(), &analysis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "eegpeaks",
            "signal.txt",
            "--method",
            "parametric",
            "--edge",
            "both",
            "-d",
            "5",
            "-t",
            "0",
            "--bandpass",
            "8",
            "12",
            "--fs",
            "100",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.parametric.edge, EdgePolicy::Both);
        assert_eq!(config.parametric.minimum_distance, 5);
        assert_eq!(config.logical.min_distance, 5);
        assert_eq!(config.parametric.threshold, Some(0.0));
        let bandpass = config.bandpass.unwrap();
        assert_eq!((bandpass.low_hz, bandpass.high_hz), (8.0, 12.0));
        assert_eq!(bandpass.sampling_frequency, 100.0);
    }

    #[test]
    fn test_invalid_bandpass_rejected() {
        let args = Args::parse_from([
            "eegpeaks",
            "signal.txt",
            "--bandpass",
            "12",
            "8",
            "--fs",
            "100",
        ]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_fs_without_bandpass_leaves_filter_off() {
        let args = Args::parse_from(["eegpeaks", "signal.txt", "--fs", "250"]);
        let config = build_config(&args).unwrap();
        assert!(config.bandpass.is_none());
    }

    #[test]
    fn test_fs_overrides_config_bandpass() {
        let mut config = AnalysisConfig::from_toml_str(
            "[bandpass]\nlow_hz = 8.0\nhigh_hz = 12.0\nsampling_frequency = 100.0\n",
        )
        .unwrap();
        let args = Args::parse_from(["eegpeaks", "signal.txt", "--fs", "250"]);
        apply_overrides(&args, &mut config).unwrap();
        assert_eq!(config.bandpass.unwrap().sampling_frequency, 250.0);
    }
}
