//! Error types for fixture generation and parsing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for fixture operations.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture or config file could not be opened, read, written or renamed
    #[error("{}: {source}", path.display())]
    Io {
        /// Path of the file involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A line did not split into the expected number of fields
    #[error(
        "{}:{line_number}: expected {expected} fields, found {found}: {line:?}",
        path.display()
    )]
    Format {
        /// Path of the fixture file
        path: PathBuf,
        /// 1-based line number
        line_number: usize,
        /// Offending line, trailing whitespace stripped
        line: String,
        /// Field count the record shape requires
        expected: usize,
        /// Field count actually found
        found: usize,
    },

    /// The size field of a post record is not a non-negative integer
    #[error("{}:{line_number}: invalid image size {value:?}", path.display())]
    InvalidSize {
        /// Path of the fixture file
        path: PathBuf,
        /// 1-based line number
        line_number: usize,
        /// The unparsable token
        value: String,
    },

    /// Generator configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file is not valid JSON for the config schema
    #[error("{}: {source}", path.display())]
    ConfigParse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

impl FixtureError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FixtureError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Specialized `Result` type for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
