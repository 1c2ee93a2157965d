//! Error types for the cloud-seeding crate.
//!
//! The decision engine itself never fails. These errors come from turning raw text, CSV files, or
//! configuration files into the records the engine consumes.

/// Error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum SeedingError {
    /// A field that should hold a number could not be parsed as one.
    #[error("Invalid number {value:?} for field {field}.")]
    InvalidNumber {
        /// Name of the field being parsed.
        field: &'static str,
        /// The offending text.
        value: String,
    },
    /// The lightning flag was neither a number nor a recognized boolean word.
    #[error("Invalid lightning flag {0:?}, expected 0/1 or true/false.")]
    InvalidFlag(String),
    /// A field name that is not part of an observation.
    #[error("Unknown observation field {0:?}.")]
    UnknownField(String),
    /// A column required for batch evaluation is not in the header.
    #[error("Missing column {0} in batch source.")]
    MissingColumn(&'static str),
    /// A batch row has more fields than the header.
    #[error("Row has {found} fields but the header has {expected}.")]
    RowLength {
        /// Number of header fields.
        expected: usize,
        /// Number of fields in the row.
        found: usize,
    },

    /// Forward an error from the csv crate
    #[error("Error reading or writing CSV: {0}")]
    Csv(#[from] csv::Error),
    /// Forward an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Threshold configuration could not be decoded.
    #[error("Invalid thresholds configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, SeedingError>;
