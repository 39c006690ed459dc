//! Identity and normalization of calendar events.
//!
//! - [`id`] derives sortable element ids from event timestamps, including the
//!   randomly jittered ids handed out to newly created events and the id
//!   bounds used for range scans.
//! - [`event`] reads calendar events: all-day normalization, effective
//!   boundaries, and whether two events share the same start condition.

pub mod error;
pub mod event;
pub mod id;

pub use error::{IdError, RepeatRuleError};
pub use event::{CalendarEvent, EndType, RepeatPeriod, RepeatRule};
pub use id::{ElementId, EventIdRange, Timestamp, TimestampIdCodec};
