use thiserror::Error;

/// Failures that can occur while constructing a [`crate::model::Timetable`].
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("I/O error reading timetable file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid timetable data: {0}")]
    InvalidData(String),
    #[error("duplicate stop_id: {0}")]
    DuplicateStop(String),
    #[error("duplicate trip_id: {0}")]
    DuplicateTrip(String),
    #[error("stop_time references unknown stop_id: {0}")]
    UnknownStop(String),
    #[error("stop_time references unknown trip_id: {0}")]
    UnknownTrip(String),
    #[error("transfer references unknown stop_id: {0}")]
    UnknownTransferStop(String),
    #[error("transfer min_transfer_time must be > 0, got {0}")]
    InvalidTransferTime(i64),
    #[error("duplicate calendar_date: {0}")]
    DuplicateCalendarDate(String),
}

/// Failures that can occur while validating a [`crate::query::Query`] before search starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("origin_stop_ids must not be empty")]
    EmptyOrigins,
    #[error("unparseable date: {0}")]
    InvalidDate(String),
    #[error("specified_secs must not be negative, got {0}")]
    NegativeSecs(i32),
    #[error("strict mode: unknown stop_id {0}")]
    UnknownStop(String),
    #[error("arithmetic overflow while computing a candidate time")]
    TimeOverflow,
    #[error("GeoJSON assembly failed: {0}")]
    GeoJson(String),
}
