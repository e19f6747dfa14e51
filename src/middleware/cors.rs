use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// The site front end may be served from any origin.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any)
}
