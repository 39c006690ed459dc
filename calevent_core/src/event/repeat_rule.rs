use chrono::{TimeZone as _, Utc};
use rrule::{Frequency, RRule, Unvalidated};
use serde::{Deserialize, Serialize};

use super::CalendarEvent;
use crate::error::RepeatRuleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepeatPeriod {
    Daily,
    Weekly,
    Monthly,
    Annually,
}

impl From<RepeatPeriod> for Frequency {
    fn from(period: RepeatPeriod) -> Self {
        match period {
            RepeatPeriod::Daily => Frequency::Daily,
            RepeatPeriod::Weekly => Frequency::Weekly,
            RepeatPeriod::Monthly => Frequency::Monthly,
            RepeatPeriod::Annually => Frequency::Yearly,
        }
    }
}

/// How a recurring event stops repeating. The meaning of
/// [`RepeatRule::end_value`] depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndType {
    /// Repeats forever; the end value is unused.
    Never,
    /// Stops after the number of occurrences in the end value.
    Count,
    /// Stops at the instant in the end value, in milliseconds since the
    /// epoch.
    UntilDate,
}

/// Describes how an event repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepeatRule {
    pub frequency: RepeatPeriod,
    /// Repeat every `interval` periods, e.g. 2 with weekly frequency means
    /// every other week.
    pub interval: u32,
    pub end_type: EndType,
    pub end_value: Option<i64>,
    /// IANA name of the time zone that the recurrence is computed in.
    pub time_zone: String,
}

impl RepeatRule {
    /// Whether both rules describe the same recurrence, field by field.
    /// Nothing is normalized first, so e.g. two spellings of one time zone
    /// are different rules.
    pub fn matches(&self, other: &RepeatRule) -> bool {
        let RepeatRule { frequency, interval, end_type, end_value, time_zone } = self;
        *frequency == other.frequency
            && *interval == other.interval
            && *end_type == other.end_type
            && *end_value == other.end_value
            && *time_zone == other.time_zone
    }

    pub fn tz(&self) -> Result<chrono_tz::Tz, RepeatRuleError> {
        self.time_zone
            .parse()
            .map_err(|_| RepeatRuleError::UnknownTimeZone(self.time_zone.clone()))
    }

    /// Builds the equivalent RFC 5545 recurrence rule, for handing the
    /// recurrence to code that expands it into occurrences. The result still
    /// needs to be validated against the event's start.
    pub fn to_rrule(&self) -> Result<RRule<Unvalidated>, RepeatRuleError> {
        let interval = u16::try_from(self.interval)
            .ok()
            .filter(|interval| *interval > 0)
            .ok_or(RepeatRuleError::IntervalOutOfRange(self.interval))?;
        let rule = RRule::new(self.frequency.into()).interval(interval);

        let rule = match self.end_type {
            EndType::Never => rule,
            EndType::Count => {
                let value = self.required_end_value()?;
                let count = u32::try_from(value)
                    .ok()
                    .filter(|count| *count > 0)
                    .ok_or(RepeatRuleError::CountOutOfRange(value))?;
                rule.count(count)
            }
            EndType::UntilDate => {
                let value = self.required_end_value()?;
                let until = Utc
                    .timestamp_millis_opt(value)
                    .single()
                    .ok_or(RepeatRuleError::UntilOutOfRange(value))?;
                rule.until(until.with_timezone(&rrule::Tz::UTC))
            }
        };
        Ok(rule)
    }

    fn required_end_value(&self) -> Result<i64, RepeatRuleError> {
        self.end_value.ok_or(RepeatRuleError::MissingEndValue { end_type: self.end_type })
    }
}

/// Whether two events start under the same condition: at the same instant,
/// and either both one-off or both repeating by matching rules. Used to tell
/// whether two events are copies of the same occurrence.
pub fn events_at_the_same_time(first: &CalendarEvent, second: &CalendarEvent) -> bool {
    if first.start_time != second.start_time {
        return false;
    }
    match (&first.repeat_rule, &second.repeat_rule) {
        (Some(first_rule), Some(second_rule)) => first_rule.matches(second_rule),
        (None, None) => true,
        _ => false,
    }
}
