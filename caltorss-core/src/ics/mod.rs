//! ICS parsing.
//!
//! Turns raw calendar text into calendar-level metadata plus a flat list of
//! components, using the icalendar crate's parser for tokenizing.

mod parse;

pub use parse::parse_calendar;

use crate::event::RawComponent;

/// Calendar-level properties that live outside any component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarMeta {
    /// X-WR-CALNAME
    pub name: Option<String>,
    /// X-WR-CALDESC
    pub description: Option<String>,
}

/// Parser output: metadata and components kept apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCalendar {
    pub meta: CalendarMeta,
    pub components: Vec<RawComponent>,
}
