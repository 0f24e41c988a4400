//! Gauge series reader configuration and line parsing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dataset::GaugeSeries;
use crate::error::IoError;

/// Column separator used in gauge series files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delimiter {
    /// Any run of whitespace separates columns.
    #[default]
    Whitespace,
    /// A single character separates columns; fields are trimmed.
    Char(char),
}

/// Configuration for reading gauge series files.
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Whether the first line of every file is a header to skip.
    header_present: bool,
    /// Column separator.
    delimiter: Delimiter,
}

impl ReaderConfig {
    /// Creates a configuration with no header and whitespace-separated columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the first line is a header.
    pub fn with_header_present(mut self, present: bool) -> Self {
        self.header_present = present;
        self
    }

    /// Sets the column separator.
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns whether the first line is a header.
    pub fn header_present(&self) -> bool {
        self.header_present
    }

    /// Returns the column separator.
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the delimiter character is a digit,
    /// `.`, `-` or `+`, since those would split numeric depths.
    pub fn validate(&self) -> Result<(), IoError> {
        if let Delimiter::Char(c) = self.delimiter
            && (c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        {
            return Err(IoError::Validation {
                count: 1,
                details: format!("delimiter {c:?} would split numeric values"),
            });
        }
        Ok(())
    }
}

/// Normalise a gauge file path as entered in the GUI attribute table.
///
/// Strips U+202A (left-to-right embedding, often pasted along with Windows
/// paths) and converts backslashes to forward slashes.
pub fn normalize_path(raw: &str) -> PathBuf {
    let cleaned: String = raw
        .chars()
        .filter(|&c| c != '\u{202a}')
        .map(|c| if c == '\\' { '/' } else { c })
        .collect();
    PathBuf::from(cleaned.trim())
}

/// Read one gauge's `(timestamp, depth)` series from a text file.
///
/// Blank lines are ignored. Extra columns beyond the second are ignored.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::DataFormat`] for a record with fewer than two columns or a
/// depth that is non-numeric, negative, or non-finite, and [`IoError::Os`]
/// for other read failures.
pub fn read_gauge_series(path: &Path, config: &ReaderConfig) -> Result<GaugeSeries, IoError> {
    config.validate()?;

    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| IoError::os(path, e))?;
    let reader = BufReader::new(file);

    let mut timestamps = Vec::new();
    let mut depths = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|e| IoError::os(path, e))?;
        if line_no == 1 && config.header_present {
            debug!(path = %path.display(), header = %line.trim(), "skipping header");
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let (timestamp, depth) = parse_record(&line, config.delimiter).map_err(|reason| {
            IoError::DataFormat {
                path: path.to_path_buf(),
                line: line_no,
                reason,
            }
        })?;
        timestamps.push(timestamp);
        depths.push(depth);
    }

    debug!(path = %path.display(), n = depths.len(), "gauge series read");
    Ok(GaugeSeries::new(timestamps, depths))
}

/// Split a record into its timestamp and depth fields.
fn parse_record(line: &str, delimiter: Delimiter) -> Result<(String, f64), String> {
    let mut fields: Box<dyn Iterator<Item = &str>> = match delimiter {
        Delimiter::Whitespace => Box::new(line.split_whitespace()),
        Delimiter::Char(c) => Box::new(line.split(c).map(str::trim)),
    };

    let timestamp = match fields.next() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return Err("missing timestamp column".to_string()),
    };
    let raw = match fields.next() {
        Some(d) if !d.is_empty() => d,
        _ => return Err("missing depth column".to_string()),
    };
    let depth: f64 = raw
        .parse()
        .map_err(|_| format!("non-numeric depth '{raw}'"))?;
    if !depth.is_finite() {
        return Err(format!("non-finite depth '{raw}'"));
    }
    if depth < 0.0 {
        return Err(format!("negative depth {depth}"));
    }
    Ok((timestamp, depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = ReaderConfig::default();
        assert!(!cfg.header_present());
        assert_eq!(cfg.delimiter(), Delimiter::Whitespace);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn numeric_delimiter_rejected() {
        let cfg = ReaderConfig::new().with_delimiter(Delimiter::Char('.'));
        assert!(matches!(cfg.validate(), Err(IoError::Validation { .. })));
        let cfg = ReaderConfig::new().with_delimiter(Delimiter::Char('3'));
        assert!(cfg.validate().is_err());
        let cfg = ReaderConfig::new().with_delimiter(Delimiter::Char(';'));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_whitespace_record() {
        let (t, d) = parse_record("2020-01-01T00  4.5", Delimiter::Whitespace).unwrap();
        assert_eq!(t, "2020-01-01T00");
        assert_eq!(d, 4.5);
    }

    #[test]
    fn parse_char_record_trims_fields() {
        let (t, d) = parse_record(" 12 , 0 ,extra", Delimiter::Char(',')).unwrap();
        assert_eq!(t, "12");
        assert_eq!(d, 0.0);
    }

    #[test]
    fn parse_record_errors() {
        assert!(parse_record("only", Delimiter::Whitespace).is_err());
        assert!(
            parse_record("1 abc", Delimiter::Whitespace)
                .unwrap_err()
                .contains("non-numeric")
        );
        assert!(
            parse_record("1 -2", Delimiter::Whitespace)
                .unwrap_err()
                .contains("negative")
        );
        assert!(
            parse_record("1 NaN", Delimiter::Whitespace)
                .unwrap_err()
                .contains("non-finite")
        );
        assert!(parse_record("1,", Delimiter::Char(',')).is_err());
    }

    #[test]
    fn normalize_path_strips_embedding_and_backslashes() {
        let p = normalize_path("\u{202a}C:\\data\\gauge 1.txt");
        assert_eq!(p, PathBuf::from("C:/data/gauge 1.txt"));
    }
}
