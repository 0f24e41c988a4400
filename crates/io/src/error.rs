//! Error types for raingen-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the raingen-io crate.
///
/// Covers missing files, malformed gauge records, manifest validation
/// problems and failures while writing the output file.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file or directory does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a gauge record cannot be parsed.
    #[error("{}:{line}: {reason}", path.display())]
    DataFormat {
        /// File containing the malformed record.
        path: PathBuf,
        /// 1-based line number within the file.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a gauge file holds no records.
    #[error("{}: gauge file has no records", path.display())]
    EmptySeries {
        /// The empty gauge file.
        path: PathBuf,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps an underlying operating-system I/O failure.
    #[error("i/o error on {}: {source}", path.display())]
    Os {
        /// Path being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    pub(crate) fn os(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Os {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.txt"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.txt");
    }

    #[test]
    fn display_empty_series() {
        let err = IoError::EmptySeries {
            path: PathBuf::from("gauge.txt"),
        };
        assert_eq!(err.to_string(), "gauge.txt: gauge file has no records");
    }

    #[test]
    fn display_data_format() {
        let err = IoError::DataFormat {
            path: PathBuf::from("gauge.txt"),
            line: 7,
            reason: "non-numeric depth 'x'".to_string(),
        };
        assert_eq!(err.to_string(), "gauge.txt:7: non-numeric depth 'x'");
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "duplicate gauge 'a'; empty manifest".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): duplicate gauge 'a'; empty manifest"
        );
    }

    #[test]
    fn display_os() {
        let err = IoError::os(
            "out.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "i/o error on out.txt: denied");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
