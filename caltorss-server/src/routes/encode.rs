//! Token endpoint used by the preview page to build permalinks

use axum::{Json, Router, extract::RawQuery, routing::get};
use serde::{Deserialize, Serialize};
use url::Url;

use caltorss_core::codec;

use crate::routes::{AppError, INVALID_URL, NO_URL_PROVIDED, first_query_param};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/encode", get(encode))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EncodeResponse {
    pub token: String,
    /// Relative feed URL for the token
    pub feed_url: String,
}

/// GET /api/encode - Compress a calendar URL into a feed token
async fn encode(RawQuery(query): RawQuery) -> Result<Json<EncodeResponse>, AppError> {
    let url = first_query_param(query.as_deref(), "url");
    let url = url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::bad_request(NO_URL_PROVIDED))?;

    Url::parse(url).map_err(|_| AppError::bad_request(INVALID_URL))?;

    let token = codec::encode(url);
    Ok(Json(EncodeResponse {
        feed_url: format!("/api/convert?ics={token}"),
        token,
    }))
}
