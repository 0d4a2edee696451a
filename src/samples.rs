//! Plain-text sample files.
//!
//! One or more numbers per line, separated by whitespace or commas. Blank
//! lines and anything after `#` are ignored.

use crate::error::{Result, SignalError};
use std::io::Write;
use std::path::Path;

pub fn parse_samples(content: &str) -> Result<Vec<f64>> {
    let mut samples = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let data = line.split('#').next().unwrap_or("");
        for token in data
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let value: f64 = token.parse().map_err(|_| SignalError::Parse {
                line: line_no + 1,
                message: format!("invalid sample value: {}", token),
            })?;
            samples.push(value);
        }
    }

    Ok(samples)
}

pub fn read_samples(path: &Path) -> Result<Vec<f64>> {
    let content = std::fs::read_to_string(path)?;
    let samples = parse_samples(&content)?;
    log::debug!("Read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Write one sample per line
pub fn save_samples(path: &Path, samples: &[f64]) -> Result<()> {
    let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
    for &sample in samples {
        writeln!(writer, "{}", sample)?;
    }
    writer.flush()?;
    Ok(())
}
