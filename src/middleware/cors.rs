use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// The public form and the admin page may be hosted on another origin.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any)
}
