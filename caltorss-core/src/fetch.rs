//! Calendar retrieval over HTTP.

use tracing::{debug, warn};

use crate::error::{CalToRssError, CalToRssResult, FetchError};

/// User-Agent sent with every calendar request unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = "caltorss/1.0";

/// Fetches raw calendar text. Holds a pooled HTTP client; no per-request state.
#[derive(Debug, Clone)]
pub struct CalendarFetcher {
    http: reqwest::Client,
}

impl CalendarFetcher {
    pub fn new(user_agent: &str) -> CalToRssResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| CalToRssError::Config(format!("Could not build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// GET the calendar at `url`. One attempt, no retries.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = http_url(url);
        debug!(url = %url, "fetching calendar");

        let response = self.http.get(&*url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "calendar request failed");
            FetchError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "calendar origin returned an error");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Could not read calendar body: {e}")))
    }
}

/// `webcal://` is a subscription alias for `https://`.
fn http_url(url: &str) -> std::borrow::Cow<'_, str> {
    match url.get(..9) {
        Some(scheme) if scheme.eq_ignore_ascii_case("webcal://") => {
            format!("https://{}", &url[9..]).into()
        }
        _ => url.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchReason;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_webcal_is_fetched_over_https() {
        assert_eq!(
            http_url("webcal://example.com/cal.ics"),
            "https://example.com/cal.ics"
        );
        assert_eq!(
            http_url("WEBCAL://example.com/cal.ics"),
            "https://example.com/cal.ics"
        );
        assert_eq!(http_url("http://example.com/a"), "http://example.com/a");
        assert_eq!(http_url("short"), "short");
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cal.ics"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("BEGIN:VCALENDAR"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = CalendarFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let body = fetcher
            .fetch(&format!("{}/cal.ics", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "BEGIN:VCALENDAR");
    }

    #[tokio::test]
    async fn test_fetch_reports_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = CalendarFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let err = fetcher
            .fetch(&format!("{}/missing.ics", server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(404));
        assert_eq!(err.reason(), FetchReason::HttpStatus(404));
    }

    #[tokio::test]
    async fn test_fetch_reports_network_error() {
        let fetcher = CalendarFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/cal.ics").await.unwrap_err();
        assert_eq!(err.reason(), FetchReason::NetworkError);
    }
}
