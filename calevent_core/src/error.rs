use thiserror::Error;

/// Errors from turning element ids into timestamps and back.
#[derive(Debug, Error)]
pub enum IdError {
    #[error("element id is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("element id does not hold UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("expected a decimal integer, found {0:?}")]
    NotNumeric(String),
    #[error("timestamp {timestamp} shifted by {shift_days} days is out of range")]
    OutOfRange { timestamp: i64, shift_days: i64 },
}

/// Errors from handing a repeat rule to other recurrence representations.
#[derive(Debug, Error)]
pub enum RepeatRuleError {
    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),
    #[error("interval {0} does not fit a recurrence rule")]
    IntervalOutOfRange(u32),
    #[error("end type {end_type:?} requires an end value")]
    MissingEndValue { end_type: crate::event::EndType },
    #[error("end value {0} is not a valid occurrence count")]
    CountOutOfRange(i64),
    #[error("end value {0} is not a representable instant")]
    UntilOutOfRange(i64),
}
