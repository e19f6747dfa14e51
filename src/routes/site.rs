use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use tracing::warn;

use crate::{
    dto::{
        blog_dto::BlogSearch,
        site_dto::{VacancyCard, VacancyListResponse},
        vacancy_dto::VacancySearch,
    },
    error::{Error, Result},
    models::contact::ContactInfo,
    services::{content_service::services_page, site_api::ListOptions},
    utils::time::now,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/site/services",
    responses((status = 200, description = "Services catalogue"))
)]
#[axum::debug_handler]
pub async fn services() -> impl IntoResponse {
    Json(services_page())
}

#[utoipa::path(
    get,
    path = "/api/site/vacancies",
    params(
        ("q" = Option<String>, Query, description = "Keyword"),
        ("category" = Option<String>, Query, description = "Category or \"All Categories\""),
        ("location" = Option<String>, Query, description = "Location or \"All Locations\""),
        ("type" = Option<String>, Query, description = "Job type or \"All Types\"")
    ),
    responses(
        (status = 200, description = "Matching vacancies with posted labels"),
        (status = 502, description = "Backend unavailable")
    )
)]
#[axum::debug_handler]
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(search): Query<VacancySearch>,
) -> Result<impl IntoResponse> {
    let jobs = state.api.list_jobs(&search, ListOptions::default()).await?;
    let now = now();
    let jobs = jobs
        .into_iter()
        .map(|vacancy| VacancyCard::new(vacancy, now))
        .collect();
    Ok(Json(VacancyListResponse { jobs }))
}

#[utoipa::path(
    get,
    path = "/api/site/filter-options",
    responses((status = 200, description = "Filter dropdown values, \"All ...\" first"))
)]
#[axum::debug_handler]
pub async fn filter_options(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let options = state.api.filter_options().await?;
    Ok(Json(options.with_sentinels()))
}

#[axum::debug_handler]
pub async fn blog_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.api.blog_categories().await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/site/blog/posts",
    params(
        ("search" = Option<String>, Query, description = "Free text"),
        ("category" = Option<String>, Query, description = "Category slug or \"all-categories\"")
    ),
    responses((status = 200, description = "Published posts"))
)]
#[axum::debug_handler]
pub async fn blog_posts(
    State(state): State<AppState>,
    Query(search): Query<BlogSearch>,
) -> Result<impl IntoResponse> {
    let posts = state.api.blog_posts(&search, ListOptions::default()).await?;
    Ok(Json(json!({ "posts": posts })))
}

#[utoipa::path(
    get,
    path = "/api/site/blog/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Full post"),
        (status = 404, description = "No such post")
    )
)]
#[axum::debug_handler]
pub async fn blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    match state.api.blog_post(&slug).await {
        Ok(post) => Ok(Json(post)),
        Err(Error::Server { status: 404, .. }) => {
            Err(Error::NotFound(format!("Blog post '{}' not found", slug)))
        }
        Err(err) => Err(err),
    }
}

/// Never fails: the contact section shows placeholders instead.
#[axum::debug_handler]
pub async fn contact_info(State(state): State<AppState>) -> impl IntoResponse {
    let info = match state.api.contact_info().await {
        Ok(info) => info,
        Err(err) => {
            warn!(error = %err, "Contact info unavailable");
            ContactInfo::unavailable()
        }
    };
    let phone_link = info.phone_link();
    Json(json!({ "contactInfo": info, "phoneLink": phone_link }))
}
