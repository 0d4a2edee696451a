use super::{Formatter, PeakReport};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &PeakReport) -> String {
        if let Some(ref error) = report.error {
            return format!("{}: error: {}", report.source, error);
        }

        let mut out = format!(
            "{}: {} peaks in {} samples ({})",
            report.source,
            report.peaks.len(),
            report.sample_count,
            report.method.as_deref().unwrap_or("-")
        );

        if let Some(ref heights) = report.heights {
            out.push_str(&format!(
                "\n  Height: mean {:.4}, std {:.4}, min {:.4}, max {:.4}",
                heights.mean, heights.std_dev, heights.min, heights.max
            ));
        }
        if let Some(ref intervals) = report.intervals {
            out.push_str(&format!(
                "\n  Interval: mean {:.1}, std {:.1}, min {:.0}, max {:.0} samples",
                intervals.mean, intervals.std_dev, intervals.min, intervals.max
            ));
        }

        if self.verbose {
            for (index, value) in report.peaks.iter().zip(report.peak_values.iter()) {
                out.push_str(&format!("\n  {:>8} {:>12.6}", index, value));
            }
        }

        out
    }
}
