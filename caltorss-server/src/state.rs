use anyhow::{Context, Result};
use axum::http::{HeaderMap, Uri, header::HOST};

use caltorss_core::CalToRssConfig;
use caltorss_core::Converter;
use caltorss_core::fetch::CalendarFetcher;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub converter: Converter,
    /// Canonical base URL, without a trailing slash
    pub public_url: Option<String>,
}

impl AppState {
    pub fn new(config: &CalToRssConfig) -> Result<Self> {
        let fetcher =
            CalendarFetcher::new(&config.user_agent).context("Failed to create calendar fetcher")?;
        let timezone = config.timezone()?;

        Ok(AppState {
            converter: Converter::new(fetcher, timezone),
            public_url: config
                .public_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
        })
    }

    /// Absolute URL of the current request, used as the feed's channel link.
    pub fn request_url(&self, headers: &HeaderMap, uri: &Uri) -> String {
        let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

        match &self.public_url {
            Some(base) => format!("{base}{path}"),
            None => {
                let host = headers
                    .get(HOST)
                    .and_then(|h| h.to_str().ok())
                    .unwrap_or("localhost");
                format!("http://{host}{path}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn state(public_url: Option<&str>) -> AppState {
        let config = CalToRssConfig {
            public_url: public_url.map(str::to_string),
            ..Default::default()
        };
        AppState::new(&config).unwrap()
    }

    #[test]
    fn test_request_url_prefers_public_url() {
        let uri: Uri = "/api/convert?ics=abc".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("internal:3000"));

        assert_eq!(
            state(Some("https://feeds.example.com/")).request_url(&headers, &uri),
            "https://feeds.example.com/api/convert?ics=abc"
        );
        assert_eq!(
            state(None).request_url(&headers, &uri),
            "http://internal:3000/api/convert?ics=abc"
        );
        assert_eq!(
            state(None).request_url(&HeaderMap::new(), &uri),
            "http://localhost/api/convert?ics=abc"
        );
    }
}
