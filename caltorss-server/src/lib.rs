//! HTTP surface of caltorss.

pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::convert::router())
        .merge(routes::encode::router())
        .merge(routes::preview::router())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
