mod csv;
mod json;
mod text;

use rolling_stats::Stats;
use serde::Serialize;

use crate::processing::PeakAnalysis;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl StatsSummary {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut stats: Stats<f64> = Stats::new();
        for value in values {
            stats.update(value);
        }
        Self::from_stats(&stats)
    }

    fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

/// Result of analysing one input, ready for formatting
#[derive(Debug, Clone, Serialize)]
pub struct PeakReport {
    pub source: String,
    pub method: Option<String>,
    pub sample_count: usize,
    pub peaks: Vec<usize>,
    pub peak_values: Vec<f64>,
    pub heights: Option<StatsSummary>,
    pub intervals: Option<StatsSummary>,
    pub error: Option<String>,
}

impl PeakReport {
    pub fn from_analysis(source: &str, analysis: &PeakAnalysis) -> Self {
        Self {
            source: source.to_string(),
            method: Some(analysis.method.to_string()),
            sample_count: analysis.sample_count,
            peaks: analysis.peaks.clone(),
            peak_values: analysis.peak_values.clone(),
            heights: StatsSummary::from_values(analysis.peak_values.iter().copied()),
            intervals: StatsSummary::from_values(
                analysis.peak_intervals().into_iter().map(|d| d as f64),
            ),
            error: None,
        }
    }

    pub fn from_error(source: &str, error: &str) -> Self {
        Self {
            source: source.to_string(),
            method: None,
            sample_count: 0,
            peaks: Vec::new(),
            peak_values: Vec::new(),
            heights: None,
            intervals: None,
            error: Some(error.to_string()),
        }
    }
}

pub trait Formatter {
    fn format(&self, report: &PeakReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
