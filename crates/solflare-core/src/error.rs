use thiserror::Error;

/// Validation errors exposed by `solflare-core`.
///
/// These are the only errors a flare query surfaces to its caller; transport
/// and format problems are absorbed into the query result instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("day must be a string in 'YYYYMMDD' format: '{value}'")]
    InvalidDayFormat { value: String },
    #[error("day '{value}' is not a valid calendar date")]
    InvalidCalendarDate { value: String },
    #[error("unsupported day input type '{found}', expecting a 'YYYYMMDD' string or a date/timestamp")]
    UnsupportedDayType { found: &'static str },

    #[error("clock time must be HHMM: '{value}'")]
    InvalidClockTime { value: String },

    #[error("flare times must satisfy begin <= max <= end")]
    EventOutOfOrder,
    #[error("flare classification cannot be empty")]
    EmptyClassification,

    #[error("invalid archive '{value}', expected one of swpc, ngdc")]
    InvalidArchive { value: String },
}
