//! Preview page and health check

use axum::{Router, response::Html, routing::get};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

/// GET / - Preview page
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}
