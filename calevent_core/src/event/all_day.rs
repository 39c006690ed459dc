use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike as _, Utc};

use super::CalendarEvent;

// resolution and reach of the search for the first local time after a
// daylight saving gap
const GAP_SEARCH_STEP: Duration = Duration::minutes(15);
const GAP_SEARCH_STEPS: usize = 4 * 24;

/// Whether the event is an all-day event, judged by the shape of its
/// boundaries alone.
pub fn is_all_day(event: &CalendarEvent) -> bool {
    is_all_day_by_times(&event.start_time, &event.end_time)
}

/// Whether both instants fall on midnight UTC. Fractions of a second are not
/// looked at.
pub fn is_all_day_by_times(start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
    is_utc_midnight(start) && is_utc_midnight(end)
}

fn is_utc_midnight(dt: &DateTime<Utc>) -> bool {
    dt.hour() == 0 && dt.minute() == 0 && dt.second() == 0
}

/// The calendar date that an all-day boundary stands for: the date of the
/// instant as read in UTC.
pub fn all_day_date(utc: &DateTime<Utc>) -> NaiveDate {
    utc.date_naive()
}

/// Midnight in `zone` of the UTC calendar date of `utc`.
///
/// The UTC year, month and day are reused as local ones, so an all-day event
/// shows on the same dates wherever it is viewed. The instant itself moves
/// by the zone's offset; that is intended, and callers rely on it. If
/// midnight does not exist on that day (a daylight saving gap), the first
/// local time after the gap is used. If midnight happens twice, the earlier
/// one is used.
pub fn all_day_date_local<Tz: TimeZone>(utc: &DateTime<Utc>, zone: &Tz) -> DateTime<Tz> {
    let midnight = all_day_date(utc).and_time(NaiveTime::MIN);
    let mut local = midnight;
    for _ in 0..GAP_SEARCH_STEPS {
        if let Some(dt) = zone.from_local_datetime(&local).earliest() {
            return dt;
        }
        local += GAP_SEARCH_STEP;
    }
    // no zone skips a whole day, but stay total anyway
    zone.from_utc_datetime(&midnight)
}

#[cfg(test)]
mod test {
    use chrono::{FixedOffset, Local};

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn midnight_pairs_are_all_day() {
        assert!(is_all_day_by_times(&utc(2024, 1, 1, 0, 0, 0), &utc(2024, 1, 2, 0, 0, 0)));
        assert!(!is_all_day_by_times(&utc(2024, 1, 1, 0, 0, 1), &utc(2024, 1, 2, 0, 0, 0)));
        assert!(!is_all_day_by_times(&utc(2024, 1, 1, 0, 0, 0), &utc(2024, 1, 2, 0, 30, 0)));
        assert!(!is_all_day_by_times(&utc(2024, 1, 1, 13, 0, 0), &utc(2024, 1, 1, 14, 0, 0)));
    }

    #[test]
    fn milliseconds_are_ignored() {
        let start = utc(2024, 1, 1, 0, 0, 0) + Duration::milliseconds(250);
        assert!(is_all_day_by_times(&start, &utc(2024, 1, 2, 0, 0, 0)));
    }

    #[test]
    fn event_shape_decides() {
        let event = CalendarEvent::new(utc(2024, 3, 10, 0, 0, 0), utc(2024, 3, 12, 0, 0, 0));
        assert!(is_all_day(&event));
        let event = CalendarEvent::new(utc(2024, 3, 10, 0, 0, 0), utc(2024, 3, 10, 1, 0, 0));
        assert!(!is_all_day(&event));
    }

    #[test]
    fn keeps_utc_date_in_other_zones() {
        let boundary = utc(2024, 1, 1, 0, 0, 0);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let local = all_day_date_local(&boundary, &tokyo);
        assert_eq!(local.date_naive(), date);
        assert_eq!(local.time(), NaiveTime::MIN);
        assert_eq!(local.with_timezone(&Utc), utc(2023, 12, 31, 15, 0, 0));

        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        let local = all_day_date_local(&boundary, &new_york);
        assert_eq!(local.date_naive(), date);
        assert_eq!(local.with_timezone(&Utc), utc(2024, 1, 1, 5, 0, 0));
    }

    #[test]
    fn time_of_day_is_dropped() {
        let local = all_day_date_local(&utc(2024, 6, 30, 23, 59, 59), &Utc);
        assert_eq!(local, utc(2024, 6, 30, 0, 0, 0));
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let once = all_day_date_local(&utc(2024, 2, 29, 17, 45, 3), &Utc);
        assert_eq!(all_day_date_local(&once, &Utc), once);

        let date = all_day_date(&utc(2024, 2, 29, 17, 45, 3));
        assert_eq!(all_day_date(&Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))), date);

        let west = FixedOffset::west_opt(3 * 3600).unwrap();
        let once = all_day_date_local(&utc(2024, 2, 29, 0, 0, 0), &west);
        let twice = all_day_date_local(&once.with_timezone(&Utc), &west);
        assert_eq!(twice, once);
    }

    #[test]
    fn applying_twice_east_of_utc_moves_back_a_day() {
        // local midnight east of UTC is still the previous day in UTC, so the
        // second pass reads that earlier date
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let once = all_day_date_local(&utc(2024, 2, 29, 0, 0, 0), &tokyo);
        assert_eq!(once.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let twice = all_day_date_local(&once.with_timezone(&Utc), &tokyo);
        assert_eq!(twice.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        assert_eq!(twice.time(), NaiveTime::MIN);
        assert_eq!(once - twice, Duration::days(1));
    }

    #[test]
    fn daylight_saving_gap_at_midnight() {
        // clocks in Sao Paulo jumped from 00:00 to 01:00 on 2018-11-04
        let zone = chrono_tz::America::Sao_Paulo;
        let local = all_day_date_local(&utc(2018, 11, 4, 0, 0, 0), &zone);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2018, 11, 4).unwrap());
        assert_eq!(local.time(), NaiveTime::from_hms_opt(1, 0, 0).unwrap());
        assert_eq!(local.with_timezone(&Utc), utc(2018, 11, 4, 3, 0, 0));
    }

    #[test]
    fn works_with_system_zone() {
        let local = all_day_date_local(&utc(2024, 5, 17, 0, 0, 0), &Local);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
    }
}
