pub mod admin;
pub mod forms;
pub mod health;
pub mod site;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{cors::permissive_cors, rate_limit};
use crate::AppState;

pub const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// The whole gateway. Site routes share one rate limit window.
pub fn router(state: AppState, public_rps: u32) -> Router {
    let base_routes = Router::new().route("/health", get(health::health));

    let site_api = Router::new()
        .route("/api/site/services", get(site::services))
        .route("/api/site/vacancies", get(site::list_vacancies))
        .route("/api/site/filter-options", get(site::filter_options))
        .route("/api/site/blog/categories", get(site::blog_categories))
        .route("/api/site/blog/posts", get(site::blog_posts))
        .route("/api/site/blog/posts/:slug", get(site::blog_post))
        .route("/api/site/contact-info", get(site::contact_info))
        .route("/api/site/contact", post(forms::submit_contact))
        .route("/api/site/jobs/apply", post(forms::apply))
        .route("/api/site/subscribe", post(forms::subscribe))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(public_rps),
            rate_limit::rps_middleware,
        ));

    let admin_api = Router::new().route("/api/admin/login", post(admin::login));

    base_routes
        .merge(site_api)
        .merge(admin_api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(permissive_cors())
                .layer(DefaultBodyLimit::max(BODY_LIMIT)),
        )
}
