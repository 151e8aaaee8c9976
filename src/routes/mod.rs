pub mod admin;
pub mod applications;
pub mod health;

use axum::{
    routing::{get, get_service, post},
    Router,
};
use std::path::Path;
use tower_http::{services::ServeFile, trace::TraceLayer};

use crate::config::Config;
use crate::middleware::{cors::permissive_cors, rate_limit};
use crate::AppState;

pub fn router(state: AppState, config: &Config) -> Router {
    let public_api: Router<AppState> = Router::new()
        .route("/apply", post(applications::apply))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::per_second(config.public_rps),
            rate_limit::rate_limit,
        ));

    let admin_api: Router<AppState> = Router::new()
        .route("/applications", get(applications::list_applications))
        .route(
            "/applications/:id/approve",
            post(applications::approve_application),
        )
        .route(
            "/applications/:id/reject",
            post(applications::reject_application),
        )
        .route("/change-password", post(admin::change_password))
        .route("/admin/login", post(admin::login));

    let static_dir = Path::new(&config.static_dir);
    let pages: Router = Router::new()
        .route("/", get_service(ServeFile::new(static_dir.join("index.html"))))
        .route(
            "/admin",
            get_service(ServeFile::new(static_dir.join("admin.html"))),
        );

    Router::new()
        .route("/health", get(health::health))
        .merge(public_api)
        .merge(admin_api)
        .with_state(state)
        .merge(pages)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
}
