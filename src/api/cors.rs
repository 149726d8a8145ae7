//! CORS configuration using tower-http.
//!
//! Each surface restricts `Origin` to its own trusted frontend; only the
//! root route allows any origin. The browser withholds the response body
//! from other origins; the server still processes the request.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Allows any origin. Used only for the informational root route.
pub fn permissive() -> CorsLayer {
    CorsLayer::permissive()
}

/// Restricts a surface to a single trusted frontend origin, with
/// credentials allowed so the session cookie travels.
pub fn restricted(origin: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = [origin].iter().filter_map(|s| s.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Layer for an endpoint surface: restricted when an origin is configured,
/// otherwise no cross-origin access at all.
pub fn surface(origin: Option<&str>) -> CorsLayer {
    match origin {
        Some(origin) => restricted(origin),
        None => CorsLayer::new(),
    }
}
