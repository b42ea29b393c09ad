use std::fmt;

use crate::ColumnType;

/// Result type for cartpulse-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Schema and coercion errors raised while reading a frame
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A required column is not present in the frame
    MissingColumn(String),

    /// A column with the same name was already added
    DuplicateColumn(String),

    /// Column length disagrees with the frame's row count
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Column holds values of an unsupported type
    ColumnType {
        column: String,
        expected: &'static str,
        found: ColumnType,
    },

    /// Text value could not be parsed as a date-time
    InvalidTimestamp { row: usize, value: String },

    /// Column mixes offset-carrying and naive timestamps
    MixedTimestampOffsets { row: usize, value: String },
}

impl Error {
    /// Rewrite the row number of row-level errors through `map`.
    ///
    /// Used when an error was raised on a filtered frame and must point at
    /// the row of the frame the caller passed in.
    pub fn map_row(self, map: impl FnOnce(usize) -> usize) -> Self {
        match self {
            Error::InvalidTimestamp { row, value } => Error::InvalidTimestamp {
                row: map(row),
                value,
            },
            Error::MixedTimestampOffsets { row, value } => Error::MixedTimestampOffsets {
                row: map(row),
                value,
            },
            other => other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingColumn(name) => write!(f, "Missing column: {}", name),
            Error::DuplicateColumn(name) => write!(f, "Duplicate column: {}", name),
            Error::LengthMismatch {
                column,
                expected,
                found,
            } => write!(
                f,
                "Column '{}' has {} rows, expected {}",
                column, found, expected
            ),
            Error::ColumnType {
                column,
                expected,
                found,
            } => write!(
                f,
                "Column '{}' has type {}, expected {}",
                column, found, expected
            ),
            Error::InvalidTimestamp { row, value } => {
                write!(f, "Invalid timestamp at row {}: {:?}", row, value)
            }
            Error::MixedTimestampOffsets { row, value } => write!(
                f,
                "Timestamp at row {} mixes offset and naive values: {:?}",
                row, value
            ),
        }
    }
}

impl std::error::Error for Error {}
