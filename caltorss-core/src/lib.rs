//! Core of caltorss: turn a remote ICS calendar into an RSS 2.0 feed.
//!
//! - [`codec`] packs calendar URLs into short query-safe tokens
//! - [`fetch`] downloads calendar text
//! - [`ics`] parses it into metadata and components
//! - [`extract`] selects, orders and caps events
//! - [`rss`] renders the feed
//! - [`pipeline`] ties the steps together

pub mod codec;
pub mod config;
pub mod error;
pub mod event;
pub mod extract;
pub mod fetch;
pub mod ics;
pub mod pipeline;
pub mod rss;
pub mod tracing;
pub mod window;

pub use config::CalToRssConfig;
pub use error::{CalToRssError, CalToRssResult, FetchError, FetchReason};
pub use event::{EventTime, NormalizedEvent};
pub use pipeline::Converter;
