//! RSS 2.0 feed rendering.
//!
//! A [`FeedDocument`] is built from normalized events and serialized with
//! `quick_xml`. Text nodes are entity-escaped; item descriptions go out as
//! CDATA instead.

pub mod format;

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{CalToRssError, CalToRssResult};
use crate::event::NormalizedEvent;
use crate::ics::CalendarMeta;

/// Channel title used when the calendar doesn't name itself.
pub const DEFAULT_CHANNEL_TITLE: &str = "Calendar Feed";
/// Item title used when an event has no summary.
pub const UNTITLED_EVENT: &str = "Untitled Event";
pub const ITEM_CATEGORY: &str = "Calendar Event";
pub const GENERATOR: &str = "caltorss";

const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

const CALENDAR_EMOJI: &str = "📅";
const LOCATION_EMOJI: &str = "📍";
const ORGANIZER_EMOJI: &str = "👤";
const ATTENDEES_EMOJI: &str = "👥";

/// Pick the channel title from calendar metadata.
pub fn channel_title(meta: &CalendarMeta) -> &str {
    meta.name.as_deref().unwrap_or(DEFAULT_CHANNEL_TITLE)
}

/// Everything about a feed that doesn't come from the events themselves.
#[derive(Debug, Clone)]
pub struct FeedContext<'a> {
    pub channel_title: &'a str,
    /// Canonical URL of the feed request itself
    pub channel_link: &'a str,
    /// Calendar URL the events came from, used for fallback guids
    pub source_url: &'a str,
    pub build_time: DateTime<Utc>,
    /// Zone human-readable dates are shown in
    pub timezone: Tz,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: Option<String>,
    pub guid: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

impl FeedItem {
    fn from_event(event: &NormalizedEvent, ctx: &FeedContext<'_>) -> Self {
        let summary = event.summary.as_deref().unwrap_or(UNTITLED_EVENT);
        let title = match &event.start {
            Some(start) => {
                let date = format::title_date(start, ctx.timezone);
                match format::title_time(start, ctx.timezone) {
                    Some(time) => format!("{date} at {time}: {summary}"),
                    None => format!("{date}: {summary}"),
                }
            }
            None => format!(": {summary}"),
        };

        let guid = match &event.uid {
            Some(uid) => uid.clone(),
            None => {
                let start = event.start_utc().map(format::iso8601).unwrap_or_default();
                format!("{}#{}", ctx.source_url, start)
            }
        };

        FeedItem {
            title,
            link: event.url.clone(),
            guid,
            pub_date: event.start_utc(),
            description: item_description(event, ctx.timezone),
        }
    }
}

/// Text block shown as the item body: the event's own description, then a
/// line per detail the event carries (time span, location, organizer and
/// attendees).
fn item_description(event: &NormalizedEvent, tz: Tz) -> Option<String> {
    let mut text = String::new();

    if let Some(description) = &event.description {
        text.push_str(description);
        text.push_str("\n\n");
    }

    // Date line only when both ends are known.
    if let (Some(start), Some(end)) = (&event.start, &event.end) {
        let _ = write!(text, "{CALENDAR_EMOJI} {}", format::long_datetime(start, tz));
        if let Some(duration) = format::duration(start, end) {
            let _ = write!(text, " ({duration})");
        }
        text.push('\n');
    }

    if let Some(location) = &event.location {
        let _ = writeln!(text, "{LOCATION_EMOJI} {location}");
    }

    if let Some(organizer) = &event.organizer {
        let _ = writeln!(text, "{ORGANIZER_EMOJI} Organizer: {organizer}");
    }

    if !event.attendees.is_empty() {
        let _ = writeln!(text, "{ATTENDEES_EMOJI} Attendees: {}", event.attendees.join(", "));
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A complete feed, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub channel: Channel,
    pub build_time: DateTime<Utc>,
    pub items: Vec<FeedItem>,
}

impl FeedDocument {
    pub fn build(ctx: &FeedContext<'_>, events: &[NormalizedEvent]) -> Self {
        FeedDocument {
            channel: Channel {
                title: ctx.channel_title.to_string(),
                description: format!("RSS feed generated from {} calendar", ctx.channel_title),
                link: ctx.channel_link.to_string(),
            },
            build_time: ctx.build_time,
            items: events.iter().map(|e| FeedItem::from_event(e, ctx)).collect(),
        }
    }

    pub fn to_xml(&self) -> CalToRssResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_document(&mut writer)?;

        String::from_utf8(writer.into_inner()).map_err(|e| {
            CalToRssError::Xml(quick_xml::Error::from(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e,
            )))
        })
    }

    fn write_document<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
    ) -> Result<(), quick_xml::Error> {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:content", CONTENT_NS));
        rss.push_attribute(("xmlns:dc", DC_NS));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        write_text_element(writer, "title", &self.channel.title)?;
        write_text_element(writer, "description", &self.channel.description)?;
        write_text_element(writer, "link", &self.channel.link)?;
        write_text_element(writer, "lastBuildDate", &format::http_date(self.build_time))?;
        write_text_element(writer, "generator", GENERATOR)?;

        for item in &self.items {
            write_item(writer, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;
        Ok(())
    }
}

/// Write `<name>text</name>` with all five XML special characters escaped.
fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(escape(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_item<W: std::io::Write>(
    writer: &mut Writer<W>,
    item: &FeedItem,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    write_text_element(writer, "title", &item.title)?;
    if let Some(link) = &item.link {
        write_text_element(writer, "link", link)?;
    }

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "false"));
    writer.write_event(Event::Start(guid))?;
    writer.write_event(Event::Text(BytesText::from_escaped(escape(&item.guid))))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    if let Some(pub_date) = item.pub_date {
        write_text_element(writer, "pubDate", &format::http_date(pub_date))?;
    }
    // Descriptions go out verbatim; an embedded `]]>` ends the section early.
    if let Some(description) = &item.description {
        writer.write_event(Event::Start(BytesStart::new("description")))?;
        writer.write_event(Event::CData(BytesCData::new(description.as_str())))?;
        writer.write_event(Event::End(BytesEnd::new("description")))?;
    }
    write_text_element(writer, "category", ITEM_CATEGORY)?;

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

/// Render events into RSS 2.0 XML text.
pub fn render(ctx: &FeedContext<'_>, events: &[NormalizedEvent]) -> CalToRssResult<String> {
    FeedDocument::build(ctx, events).to_xml()
}
