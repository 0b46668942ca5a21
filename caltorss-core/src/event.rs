//! Normalized event types.
//!
//! [`RawComponent`]s coming out of the ICS parser are mapped into
//! [`NormalizedEvent`]s, which is the only shape the feed renderer knows about.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// A point in time as written in the calendar, preserving whether it was a
/// date, a UTC time, a floating local time or a time in a named zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
    DateTimeFloating(NaiveDateTime),
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl EventTime {
    /// Resolve to an absolute instant.
    ///
    /// All-day dates become midnight UTC and floating times are read as UTC.
    /// Zoned times go through chrono-tz; an unknown TZID is read as UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            EventTime::Date(d) => d.and_time(chrono::NaiveTime::MIN).and_utc(),
            EventTime::DateTimeUtc(dt) => *dt,
            EventTime::DateTimeFloating(naive) => naive.and_utc(),
            EventTime::DateTimeZoned { datetime, tzid } => match tzid.parse::<Tz>() {
                Ok(tz) => tz
                    .from_local_datetime(datetime)
                    .earliest()
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|| datetime.and_utc()),
                Err(_) => datetime.and_utc(),
            },
        }
    }

    /// Wall-clock reading of this time in `tz`.
    ///
    /// Dates and floating times have no zone of their own, so they read the
    /// same everywhere.
    pub fn local_in(&self, tz: Tz) -> NaiveDateTime {
        match self {
            EventTime::Date(d) => d.and_time(chrono::NaiveTime::MIN),
            EventTime::DateTimeFloating(naive) => *naive,
            EventTime::DateTimeUtc(_) | EventTime::DateTimeZoned { .. } => {
                self.to_utc().with_timezone(&tz).naive_local()
            }
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(dt: DateTime<Utc>) -> Self {
        EventTime::DateTimeUtc(dt)
    }
}

/// One attendee entry as the parser saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendeeValue {
    /// A bare property value with no parameters.
    Text(String),
    /// A value carrying parameters; only CN is kept.
    Structured {
        value: Option<String>,
        common_name: Option<String>,
    },
}

impl AttendeeValue {
    /// Display string: the value, else the common name, else empty.
    pub fn display(&self) -> String {
        match self {
            AttendeeValue::Text(text) => text.clone(),
            AttendeeValue::Structured { value, common_name } => value
                .as_deref()
                .filter(|v| !v.is_empty())
                .or(common_name.as_deref())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// The ATTENDEE field of a component, which may be missing, appear once or
/// appear many times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AttendeeField {
    #[default]
    Absent,
    One(AttendeeValue),
    Many(Vec<AttendeeValue>),
}

impl AttendeeField {
    pub fn from_values(mut values: Vec<AttendeeValue>) -> Self {
        match values.len() {
            0 => AttendeeField::Absent,
            1 => AttendeeField::One(values.remove(0)),
            _ => AttendeeField::Many(values),
        }
    }

    /// Flatten into display strings, keeping source order.
    pub fn into_display_list(self) -> Vec<String> {
        match self {
            AttendeeField::Absent => Vec::new(),
            AttendeeField::One(value) => vec![value.display()],
            AttendeeField::Many(values) => values.iter().map(AttendeeValue::display).collect(),
        }
    }
}

/// A calendar component as produced by [`crate::ics::parse_calendar`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawComponent {
    /// Component name, e.g. `VEVENT` or `VTODO`
    pub kind: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub uid: Option<String>,
    pub organizer: Option<AttendeeValue>,
    pub attendee: AttendeeField,
    pub created: Option<EventTime>,
    pub last_modified: Option<EventTime>,
}

impl RawComponent {
    pub fn is_event(&self) -> bool {
        self.kind == "VEVENT"
    }
}

/// An event ready to be rendered as a feed item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub uid: Option<String>,
    pub organizer: Option<String>,
    pub attendees: Vec<String>,
    pub created: Option<EventTime>,
    pub last_modified: Option<EventTime>,
}

impl NormalizedEvent {
    pub fn start_utc(&self) -> Option<DateTime<Utc>> {
        self.start.as_ref().map(EventTime::to_utc)
    }
}

impl From<RawComponent> for NormalizedEvent {
    fn from(raw: RawComponent) -> Self {
        NormalizedEvent {
            summary: raw.summary,
            description: raw.description,
            start: raw.start,
            end: raw.end,
            location: raw.location,
            url: raw.url,
            uid: raw.uid,
            // Only a bare ORGANIZER value is shown; parameterized ones are dropped.
            organizer: match raw.organizer {
                Some(AttendeeValue::Text(text)) if !text.is_empty() => Some(text),
                _ => None,
            },
            attendees: raw.attendee.into_display_list(),
            created: raw.created,
            last_modified: raw.last_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoned_time_resolves_through_tz_database() {
        let time = EventTime::DateTimeZoned {
            datetime: NaiveDate::from_ymd_opt(2025, 7, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            tzid: "America/New_York".to_string(),
        };
        assert_eq!(
            time.to_utc(),
            Utc.with_ymd_and_hms(2025, 7, 1, 13, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_tzid_reads_as_utc() {
        let naive = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let time = EventTime::DateTimeZoned {
            datetime: naive,
            tzid: "Mars/Olympus_Mons".to_string(),
        };
        assert_eq!(time.to_utc(), naive.and_utc());
    }

    #[test]
    fn test_all_day_date_reads_the_same_in_any_zone() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let time = EventTime::Date(date);
        assert!(time.is_all_day());
        assert_eq!(time.local_in(chrono_tz::Asia::Tokyo).date(), date);
        assert_eq!(time.local_in(chrono_tz::America::Los_Angeles).date(), date);
    }

    #[test]
    fn test_attendee_prefers_value_then_common_name() {
        let with_value = AttendeeValue::Structured {
            value: Some("mailto:alice@example.com".to_string()),
            common_name: Some("Alice".to_string()),
        };
        let name_only = AttendeeValue::Structured {
            value: None,
            common_name: Some("Bob".to_string()),
        };
        let neither = AttendeeValue::Structured {
            value: None,
            common_name: None,
        };

        assert_eq!(with_value.display(), "mailto:alice@example.com");
        assert_eq!(name_only.display(), "Bob");
        assert_eq!(neither.display(), "");
    }

    #[test]
    fn test_attendee_field_flattens_in_order() {
        let field = AttendeeField::from_values(vec![
            AttendeeValue::Text("carol".to_string()),
            AttendeeValue::Structured {
                value: None,
                common_name: Some("Dave".to_string()),
            },
        ]);
        assert!(matches!(field, AttendeeField::Many(_)));
        assert_eq!(field.into_display_list(), vec!["carol", "Dave"]);

        assert_eq!(AttendeeField::Absent.into_display_list(), Vec::<String>::new());
        let single = AttendeeField::from_values(vec![AttendeeValue::Text("erin".to_string())]);
        assert_eq!(single.into_display_list(), vec!["erin"]);
    }

    #[test]
    fn test_organizer_kept_only_when_bare() {
        let bare = RawComponent {
            kind: "VEVENT".to_string(),
            organizer: Some(AttendeeValue::Text("mailto:olivia@example.com".to_string())),
            ..Default::default()
        };
        assert_eq!(
            NormalizedEvent::from(bare).organizer.as_deref(),
            Some("mailto:olivia@example.com")
        );

        let with_params = RawComponent {
            kind: "VEVENT".to_string(),
            organizer: Some(AttendeeValue::Structured {
                value: Some("mailto:olivia@example.com".to_string()),
                common_name: Some("Olivia".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(NormalizedEvent::from(with_params).organizer, None);
    }

    #[test]
    fn test_empty_organizer_is_dropped() {
        let raw = RawComponent {
            kind: "VEVENT".to_string(),
            organizer: Some(AttendeeValue::Text(String::new())),
            ..Default::default()
        };
        assert_eq!(NormalizedEvent::from(raw).organizer, None);
    }
}
