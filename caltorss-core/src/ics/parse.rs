//! ICS parsing using the icalendar crate's parser.

use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, Property, read_calendar, unfold},
};
use tracing::debug;

use super::{CalendarMeta, ParsedCalendar};
use crate::error::{CalToRssError, CalToRssResult};
use crate::event::{AttendeeField, AttendeeValue, EventTime, RawComponent};

/// Parse ICS text into calendar metadata and its components.
///
/// Fails only when the text is not a calendar at all. Individual properties
/// that cannot be read (a malformed DTSTART, say) are left empty instead.
pub fn parse_calendar(content: &str) -> CalToRssResult<ParsedCalendar> {
    let content = content.trim_start_matches('\u{feff}');
    if !content.contains("BEGIN:VCALENDAR") {
        return Err(CalToRssError::IcsParse(
            "document has no VCALENDAR component".into(),
        ));
    }

    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| CalToRssError::IcsParse(e.to_string()))?;

    let mut parsed = ParsedCalendar::default();
    read_meta(&calendar.properties, &mut parsed.meta);
    collect_components(&calendar.components, &mut parsed);

    debug!(
        components = parsed.components.len(),
        name = ?parsed.meta.name,
        "parsed calendar"
    );
    Ok(parsed)
}

/// Walk top-level components, descending into any VCALENDAR wrapper.
fn collect_components(components: &[Component<'_>], parsed: &mut ParsedCalendar) {
    for component in components {
        if component.name == "VCALENDAR" {
            read_meta(&component.properties, &mut parsed.meta);
            collect_components(&component.components, parsed);
        } else {
            parsed.components.push(to_raw_component(component));
        }
    }
}

fn read_meta(properties: &[Property<'_>], meta: &mut CalendarMeta) {
    for prop in properties {
        let slot = if prop.name == "X-WR-CALNAME" {
            &mut meta.name
        } else if prop.name == "X-WR-CALDESC" {
            &mut meta.description
        } else {
            continue;
        };
        if slot.is_none() {
            *slot = text_value(prop);
        }
    }
}

fn to_raw_component(component: &Component<'_>) -> RawComponent {
    let text = |name: &str| component.find_prop(name).and_then(text_value);
    let raw = |name: &str| {
        component
            .find_prop(name)
            .map(|p| p.val.as_ref().trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let time = |name: &str| component.find_prop(name).and_then(parse_time);

    let attendees: Vec<AttendeeValue> = component
        .properties
        .iter()
        .filter(|p| p.name == "ATTENDEE")
        .map(parse_attendee)
        .collect();

    RawComponent {
        kind: component.name.as_ref().to_ascii_uppercase(),
        summary: text("SUMMARY"),
        description: text("DESCRIPTION"),
        start: time("DTSTART"),
        end: time("DTEND"),
        location: text("LOCATION"),
        url: raw("URL"),
        uid: raw("UID"),
        organizer: component.find_prop("ORGANIZER").map(parse_attendee),
        attendee: AttendeeField::from_values(attendees),
        created: time("CREATED"),
        last_modified: time("LAST-MODIFIED"),
    }
}

/// Convert a date or date-time property, keeping its timezone flavour.
fn parse_time(prop: &Property<'_>) -> Option<EventTime> {
    let dpt = DatePerhapsTime::try_from(prop).ok()?;
    Some(match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            CalendarDateTime::WithTimezone { date_time, tzid } => EventTime::DateTimeZoned {
                datetime: date_time,
                tzid,
            },
        },
    })
}

/// ATTENDEE/ORGANIZER: a bare value becomes text, anything with parameters
/// keeps its value and CN.
fn parse_attendee(prop: &Property<'_>) -> AttendeeValue {
    let value = prop.val.as_ref().trim();
    if prop.params.is_empty() {
        return AttendeeValue::Text(value.to_string());
    }

    let common_name = prop
        .params
        .iter()
        .find(|p| p.key == "CN")
        .and_then(|p| p.val.as_ref())
        .map(|v| v.as_ref().trim_matches('"').to_string())
        .filter(|v| !v.is_empty());

    AttendeeValue::Structured {
        value: Some(value.to_string()).filter(|v| !v.is_empty()),
        common_name,
    }
}

fn text_value(prop: &Property<'_>) -> Option<String> {
    let text = unescape_text(prop.val.as_ref());
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Undo RFC 5545 TEXT escaping (`\n`, `\,`, `\;`, `\\`).
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
