//! Human-readable date, time and duration strings used in feed items.
//!
//! Patterns follow en-US conventions, e.g. `Fri, Oct 17, 2025` and `3:05 PM`.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::event::EventTime;

/// `Fri, Oct 17, 2025`
pub fn title_date(time: &EventTime, tz: Tz) -> String {
    time.local_in(tz).format("%a, %b %-d, %Y").to_string()
}

/// `3:05 PM`, or nothing for all-day starts.
pub fn title_time(time: &EventTime, tz: Tz) -> Option<String> {
    if time.is_all_day() {
        return None;
    }
    Some(time.local_in(tz).format("%-I:%M %p").to_string())
}

/// `10/17/2025, 3:05:00 PM`, or `10/17/2025` for all-day starts.
pub fn long_datetime(time: &EventTime, tz: Tz) -> String {
    let local = time.local_in(tz);
    if time.is_all_day() {
        local.format("%-m/%-d/%Y").to_string()
    } else {
        local.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }
}

/// `1h30m`, `2h` or `45m`. `None` when the span is under a minute or negative.
pub fn duration(start: &EventTime, end: &EventTime) -> Option<String> {
    let minutes = (end.to_utc() - start.to_utc()).num_minutes();
    if minutes <= 0 {
        return None;
    }
    let (hours, minutes) = (minutes / 60, minutes % 60);
    Some(match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m}m"),
    })
}

/// RFC 2822 / HTTP-date form, always in GMT.
pub fn http_date(instant: DateTime<Utc>) -> String {
    instant.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// ISO 8601 with millisecond precision and a `Z` suffix.
pub fn iso8601(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(h: u32, m: u32) -> EventTime {
        EventTime::from(Utc.with_ymd_and_hms(2025, 10, 17, h, m, 0).unwrap())
    }

    #[test]
    fn test_title_parts() {
        let start = at(15, 5);
        assert_eq!(title_date(&start, Tz::UTC), "Fri, Oct 17, 2025");
        assert_eq!(title_time(&start, Tz::UTC).as_deref(), Some("3:05 PM"));
        assert_eq!(title_time(&at(0, 0), Tz::UTC).as_deref(), Some("12:00 AM"));
    }

    #[test]
    fn test_title_follows_display_zone() {
        let start = at(2, 30);
        let tz: Tz = "America/Los_Angeles".parse().unwrap();
        assert_eq!(title_date(&start, tz), "Thu, Oct 16, 2025");
        assert_eq!(title_time(&start, tz).as_deref(), Some("7:30 PM"));
    }

    #[test]
    fn test_all_day_has_no_time() {
        let day = EventTime::Date(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
        assert_eq!(title_date(&day, Tz::UTC), "Thu, Dec 25, 2025");
        assert_eq!(title_time(&day, Tz::UTC), None);
        assert_eq!(long_datetime(&day, Tz::UTC), "12/25/2025");
    }

    #[test]
    fn test_long_datetime() {
        assert_eq!(long_datetime(&at(9, 7), Tz::UTC), "10/17/2025, 9:07:00 AM");
    }

    #[test]
    fn test_duration_shapes() {
        assert_eq!(duration(&at(9, 0), &at(10, 0)).as_deref(), Some("1h"));
        assert_eq!(duration(&at(9, 0), &at(10, 30)).as_deref(), Some("1h30m"));
        assert_eq!(duration(&at(9, 0), &at(9, 45)).as_deref(), Some("45m"));
        assert_eq!(duration(&at(9, 0), &at(9, 0)), None);
        assert_eq!(duration(&at(10, 0), &at(9, 0)), None);
    }

    #[test]
    fn test_http_date_and_iso() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 7, 8, 9, 10).unwrap();
        assert_eq!(http_date(instant), "Fri, 07 Mar 2025 08:09:10 GMT");
        assert_eq!(iso8601(instant), "2025-03-07T08:09:10.000Z");
    }
}
