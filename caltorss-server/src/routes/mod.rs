pub mod convert;
pub mod encode;
pub mod preview;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const NO_URL_PROVIDED: &str = "No ICS URL provided";
pub const INVALID_COMPRESSED_PARAM: &str = "Invalid compressed ICS parameter";
pub const INVALID_URL: &str = "Invalid ICS URL";
pub const CONVERSION_FAILED: &str = "Failed to convert ICS to RSS";

/// First value of `key` in a raw query string. Repeated keys never reject
/// the request; later occurrences are ignored.
pub fn first_query_param(query: Option<&str>, key: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Standard API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error that ends the request with a status and a JSON body.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
}

impl AppError {
    /// Missing or malformed request parameters.
    pub fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    /// The remote calendar could not be fetched or parsed. The detail is
    /// logged by the caller, not returned.
    pub fn upstream() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: CONVERSION_FAILED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message.to_string(),
        });
        (self.status, body).into_response()
    }
}
