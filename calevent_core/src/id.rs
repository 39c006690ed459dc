use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::IdError;

pub mod custom_id;
pub mod jitter;

pub use custom_id::{Base64Ext, CustomIdEncoding};
pub use jitter::{generate_event_element_id, EventIdGenerator, UnitRandom};

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

pub const DAY_IN_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// How many days an event's element id may be shifted away from the event's
/// own timestamp, in either direction.
pub const SHIFT_DAYS: i64 = 15;

pub const DAYS_SHIFTED_MS: i64 = SHIFT_DAYS * DAY_IN_MILLIS;

pub const DAYS_SHIFTED: Duration = Duration::days(SHIFT_DAYS);

/// An opaque key under which a calendar event is stored.
///
/// Ids compare by their string form. For ids made from timestamps with the
/// same number of decimal digits, that ordering follows the timestamps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Wraps an id that was produced elsewhere, e.g. one read back from
    /// storage. Nothing is validated.
    pub fn from_raw(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The closed interval of element ids that events anchored at some
/// timestamp (or within some window of timestamps) can have.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventIdRange {
    pub min: ElementId,
    pub max: ElementId,
}

impl EventIdRange {
    pub fn contains(&self, id: &ElementId) -> bool {
        &self.min <= id && id <= &self.max
    }
}

/// Encodes event timestamps into element ids.
#[derive(Debug, Default, Clone)]
pub struct TimestampIdCodec<E = Base64Ext> {
    encoding: E,
}

impl TimestampIdCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: CustomIdEncoding> TimestampIdCodec<E> {
    pub fn with_encoding(encoding: E) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> &E {
        &self.encoding
    }

    /// Encodes `timestamp` shifted by `shift_days` whole days. Fails if the
    /// shifted timestamp does not fit an `i64`, or if the underlying encoding
    /// rejects the decimal string.
    pub fn try_encode(&self, timestamp: Timestamp, shift_days: i64) -> Result<ElementId, IdError> {
        let effective = shift_days
            .checked_mul(DAY_IN_MILLIS)
            .and_then(|shift| timestamp.checked_add(shift))
            .ok_or(IdError::OutOfRange { timestamp, shift_days })?;
        self.encoding.encode(&effective.to_string())
    }

    /// Encodes `timestamp` shifted by `shift_days` whole days.
    ///
    /// Panics if the shifted timestamp overflows or the encoding rejects the
    /// decimal string. Both are programming errors, and carrying on would hand
    /// out a corrupt id.
    pub fn encode(&self, timestamp: Timestamp, shift_days: i64) -> ElementId {
        match self.try_encode(timestamp, shift_days) {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(timestamp, shift_days, %err, "failed to encode event element id");
                panic!("failed to encode element id for timestamp {timestamp}: {err}");
            }
        }
    }

    /// The smallest id that an event anchored at `timestamp` can have.
    pub fn min_id(&self, timestamp: Timestamp) -> ElementId {
        self.encode(timestamp, -SHIFT_DAYS)
    }

    /// The largest id that an event anchored at `timestamp` can have.
    pub fn max_id(&self, timestamp: Timestamp) -> ElementId {
        self.encode(timestamp, SHIFT_DAYS)
    }

    pub fn range_for(&self, timestamp: Timestamp) -> EventIdRange {
        self.range_for_interval(timestamp, timestamp)
    }

    /// The ids that events anchored anywhere in `[start, end]` can have,
    /// e.g. for loading all events of a month with a single range scan. If
    /// `start` is more than two jitter windows after `end`, the range is
    /// inverted and contains no id.
    pub fn range_for_interval(&self, start: Timestamp, end: Timestamp) -> EventIdRange {
        EventIdRange { min: self.min_id(start), max: self.max_id(end) }
    }

    /// Recovers the shifted timestamp that an id was encoded from. This is
    /// the event's own timestamp plus whatever jitter it received.
    pub fn decode(&self, id: &ElementId) -> Result<Timestamp, IdError> {
        let text = self.encoding.decode(id).inspect_err(|err| {
            tracing::debug!(id = id.as_str(), %err, "element id could not be decoded");
        })?;
        text.parse().map_err(|_| {
            tracing::debug!(id = id.as_str(), %text, "element id does not hold an integer");
            IdError::NotNumeric(text)
        })
    }
}
