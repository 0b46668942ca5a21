//! Event extraction: pick VEVENTs, keep the ones in the feed window, newest
//! first, capped at [`MAX_ITEMS`].

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::event::{NormalizedEvent, RawComponent};
use crate::window::EventWindow;

/// Most items a single feed will carry.
pub const MAX_ITEMS: usize = 100;

/// Map parsed components to the events that belong in a feed built at
/// `reference`.
///
/// Events without a start are dropped. Ordering is by start, descending; the
/// sort is stable so events sharing a start keep calendar order.
pub fn extract<I>(components: I, reference: DateTime<Utc>) -> Vec<NormalizedEvent>
where
    I: IntoIterator<Item = RawComponent>,
{
    let window = EventWindow::around(reference);

    let mut events: Vec<(DateTime<Utc>, NormalizedEvent)> = components
        .into_iter()
        .filter(RawComponent::is_event)
        .map(NormalizedEvent::from)
        .filter_map(|event| {
            let start = event.start_utc()?;
            window.contains(start).then_some((start, event))
        })
        .collect();

    let in_window = events.len();
    events.sort_by_key(|(start, _)| Reverse(*start));
    events.truncate(MAX_ITEMS);

    debug!(in_window, kept = events.len(), "extracted events");
    events.into_iter().map(|(_, event)| event).collect()
}
