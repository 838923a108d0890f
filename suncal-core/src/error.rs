//! Error types for suncal.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while generating a sun calendar.
#[derive(Error, Debug)]
pub enum SunCalError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Cannot compute solar times for {date}: {reason}")]
    Ephemeris { date: NaiveDate, reason: String },

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SunCalError {
    pub(crate) fn ephemeris(date: NaiveDate, reason: impl Into<String>) -> Self {
        SunCalError::Ephemeris {
            date,
            reason: reason.into(),
        }
    }
}

/// Result type alias for suncal operations.
pub type SunCalResult<T> = Result<T, SunCalError>;
