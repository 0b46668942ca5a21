//! Calendar to RSS conversion endpoint

use axum::{
    Router,
    extract::{OriginalUri, RawQuery, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tracing::{error, warn};

use caltorss_core::codec;

use crate::routes::{AppError, INVALID_COMPRESSED_PARAM, NO_URL_PROVIDED, first_query_param};
use crate::state::AppState;

pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";
pub const FEED_CACHE_CONTROL: &str = "max-age=600, s-maxage=600";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/convert", get(convert))
}

/// Query parameters for a conversion. `ics` wins over `url`.
#[derive(Debug, Default)]
pub struct ConvertParams {
    /// Compressed calendar URL
    pub ics: Option<String>,
    /// Plain calendar URL
    pub url: Option<String>,
}

impl ConvertParams {
    pub fn from_query(query: Option<&str>) -> Self {
        Self {
            ics: first_query_param(query, "ics"),
            url: first_query_param(query, "url"),
        }
    }
}

/// Work out which calendar URL a request is asking for.
pub fn resolve_source_url(params: &ConvertParams) -> Result<String, AppError> {
    if let Some(token) = params.ics.as_deref().filter(|t| !t.is_empty()) {
        return codec::decode(token).map_err(|e| {
            warn!(error = %e, "rejected compressed calendar token");
            AppError::bad_request(INVALID_COMPRESSED_PARAM)
        });
    }

    params
        .url
        .as_deref()
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::bad_request(NO_URL_PROVIDED))
}

/// GET /api/convert - Fetch a calendar and return it as RSS
async fn convert(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let params = ConvertParams::from_query(query.as_deref());
    let source_url = resolve_source_url(&params)?;
    let channel_link = state.request_url(&headers, &uri);

    let xml = state
        .converter
        .convert(&source_url, &channel_link, Utc::now())
        .await
        .map_err(|e| {
            error!(url = %source_url, error = %e, "Error converting ICS to RSS");
            AppError::upstream()
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, RSS_CONTENT_TYPE),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        xml,
    )
        .into_response())
}
