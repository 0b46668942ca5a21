//! Fetch → parse → extract → render, for one calendar URL.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{info, instrument};

use crate::error::CalToRssResult;
use crate::extract::extract;
use crate::fetch::CalendarFetcher;
use crate::ics::parse_calendar;
use crate::rss::{self, FeedContext};

/// Converts calendars to feeds. Cheap to clone; shares the fetcher's pool.
#[derive(Debug, Clone)]
pub struct Converter {
    fetcher: CalendarFetcher,
    timezone: Tz,
}

impl Converter {
    pub fn new(fetcher: CalendarFetcher, timezone: Tz) -> Self {
        Self { fetcher, timezone }
    }

    /// Fetch the calendar at `source_url` and render it as RSS.
    ///
    /// `channel_link` is the canonical URL of the feed itself and `now` is
    /// both the window reference and the build time.
    #[instrument(skip(self, channel_link, now))]
    pub async fn convert(
        &self,
        source_url: &str,
        channel_link: &str,
        now: DateTime<Utc>,
    ) -> CalToRssResult<String> {
        let text = self.fetcher.fetch(source_url).await?;
        self.convert_text(&text, source_url, channel_link, now)
    }

    /// Same as [`Converter::convert`] but for calendar text already in hand.
    pub fn convert_text(
        &self,
        text: &str,
        source_url: &str,
        channel_link: &str,
        now: DateTime<Utc>,
    ) -> CalToRssResult<String> {
        let parsed = parse_calendar(text)?;
        let events = extract(parsed.components, now);

        let ctx = FeedContext {
            channel_title: rss::channel_title(&parsed.meta),
            channel_link,
            source_url,
            build_time: now,
            timezone: self.timezone,
        };
        info!(items = events.len(), title = ctx.channel_title, "rendered feed");
        rss::render(&ctx, &events)
    }
}
