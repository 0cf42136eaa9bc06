//! Error types for safemind-core
//!
//! Only hard faults live in [`Error`]. Bad record data is never an error:
//! the pipeline excludes the offending record instead, and the reason is
//! carried by [`InvalidTimestamp`] or [`InvalidNumericField`].

use thiserror::Error;

/// Main error type for the safemind-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Record source error
    #[error("record source error: {0}")]
    Source(String),
}

/// Result type alias for safemind-core
pub type Result<T> = std::result::Result<T, Error>;

/// A record timestamp that none of the accepted formats could parse.
///
/// Records carrying one are excluded from every view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid timestamp: {raw:?}")]
pub struct InvalidTimestamp {
    /// The raw value as it appeared in the record (empty when missing)
    pub raw: String,
}

impl InvalidTimestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

/// A numeric record field that could not be coerced.
///
/// Records carrying one are excluded from the single view that needs the
/// field and nowhere else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidNumericField {
    /// `sentimentScore` was present but not a finite number
    #[error("invalid sentiment score: {0:?}")]
    Sentiment(String),

    /// `totalTimeSpent` was present but not a duration in seconds
    #[error("invalid time spent: {0:?}")]
    TimeSpent(String),
}
