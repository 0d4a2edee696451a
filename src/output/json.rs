use super::{Formatter, PeakReport};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &PeakReport) -> String {
        serde_json::to_string(report).unwrap_or_else(|e| {
            format!(r#"{{"source":{:?},"error":"serialization failed: {}"}}"#, report.source, e)
        })
    }
}
