use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod all_day;
pub mod boundary;
pub mod repeat_rule;

pub use all_day::{all_day_date, all_day_date_local, is_all_day, is_all_day_by_times};
pub use boundary::{event_end, event_start, is_long_event};
pub use repeat_rule::{events_at_the_same_time, EndType, RepeatPeriod, RepeatRule};

/// The parts of a calendar event that its identity and normalization depend
/// on.
///
/// An all-day event is not flagged as such; it is stored with both
/// boundaries at midnight UTC, and the UTC calendar dates of those
/// boundaries are the dates that the event covers. The end is exclusive, so
/// a single-day event on 2024-01-01 ends at 2024-01-02T00:00:00Z.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// How the event repeats, or `None` for a one-off event.
    pub repeat_rule: Option<RepeatRule>,
}

impl CalendarEvent {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self { start_time, end_time, repeat_rule: None }
    }

    pub fn with_repeat_rule(self, repeat_rule: RepeatRule) -> Self {
        Self { repeat_rule: Some(repeat_rule), ..self }
    }

    pub fn is_recurring(&self) -> bool {
        self.repeat_rule.is_some()
    }
}
