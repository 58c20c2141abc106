//! Router assembly for the REST service.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// CORS for the browser-facing services; origins come from configuration.
/// Invalid entries are logged and skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
