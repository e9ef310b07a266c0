//! Chart error types

use thiserror::Error;

/// Errors raised while ingesting data or building a date selection.
///
/// Row preparation, tick generation and tap resolution never fail; they
/// degrade to empty output instead.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The feed document is not a JSON array of records
    #[error("Malformed sample feed: {0}")]
    Feed(#[from] serde_json::Error),

    /// A timestamp that is neither RFC 3339 nor a supported naive form
    #[error("Unparseable timestamp: {0:?}")]
    Timestamp(String),

    /// Month outside 1..=12
    #[error("Invalid month {0}, expected 1..=12")]
    InvalidMonth(u32),

    /// Day outside the selected month
    #[error("Invalid day {day} for {year}-{month:02}, month has {days_in_month} days")]
    InvalidDay {
        year: i32,
        month: u32,
        day: u32,
        days_in_month: u32,
    },

    /// A day was given without a month
    #[error("A day selection requires a month")]
    DayWithoutMonth,
}

/// Result type for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;
