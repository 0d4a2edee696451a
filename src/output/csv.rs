use super::{Formatter, PeakReport};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &PeakReport) -> String {
        let method = report.method.as_deref().unwrap_or("");
        let peaks = report
            .peaks
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(";");
        let height_mean = report
            .heights
            .as_ref()
            .map(|s| format!("{:.6}", s.mean))
            .unwrap_or_default();
        let height_max = report
            .heights
            .as_ref()
            .map(|s| format!("{:.6}", s.max))
            .unwrap_or_default();
        let interval_mean = report
            .intervals
            .as_ref()
            .map(|s| format!("{:.2}", s.mean))
            .unwrap_or_default();
        let interval_std = report
            .intervals
            .as_ref()
            .map(|s| format!("{:.2}", s.std_dev))
            .unwrap_or_default();
        let error = report.error.as_deref().unwrap_or("");

        format!(
            "{},{},{},{},{},{},{},{},{},{}",
            escape_field(&report.source),
            method,
            report.sample_count,
            report.peaks.len(),
            peaks,
            height_mean,
            height_max,
            interval_mean,
            interval_std,
            escape_field(error)
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some(
            "source,method,sample_count,peak_count,peaks,height_mean,height_max,interval_mean,interval_std,error",
        )
    }
}

/// Quote a free-text field when it contains a separator, quote or newline
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
