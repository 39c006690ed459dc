use chrono::{DateTime, TimeZone};

use super::{
    all_day::{all_day_date_local, is_all_day},
    CalendarEvent,
};
use crate::id::DAYS_SHIFTED;

/// The start of the event as seen by a viewer in `zone`. All-day events start
/// at local midnight of their first date; other events start at their stored
/// instant.
pub fn event_start<Tz: TimeZone>(event: &CalendarEvent, zone: &Tz) -> DateTime<Tz> {
    if is_all_day(event) {
        all_day_date_local(&event.start_time, zone)
    } else {
        event.start_time.with_timezone(zone)
    }
}

/// The (exclusive) end of the event as seen by a viewer in `zone`, following
/// the same rules as [`event_start`].
pub fn event_end<Tz: TimeZone>(event: &CalendarEvent, zone: &Tz) -> DateTime<Tz> {
    if is_all_day(event) {
        all_day_date_local(&event.end_time, zone)
    } else {
        event.end_time.with_timezone(zone)
    }
}

/// Whether the event lasts longer than the id jitter window of 15 days.
///
/// The threshold happens to be the same constant as the jitter window; the
/// two are not otherwise related.
pub fn is_long_event<Tz: TimeZone>(event: &CalendarEvent, zone: &Tz) -> bool {
    event_end(event, zone) - event_start(event, zone) > DAYS_SHIFTED
}
