use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::{
    dto::admin_dto::{AdminLoginForm, LoginResponse},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginForm,
    responses(
        (status = 200, description = "Credentials accepted, redirect to the dashboard"),
        (status = 401, description = "Invalid admin credentials"),
        (status = 422, description = "Email or password missing")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<AdminLoginForm>,
) -> Result<Response> {
    match state.auth.login(&form) {
        Ok(reply) => Ok(Json(reply).into_response()),
        Err(Error::Unauthorized(message)) => Ok((
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                message,
                redirect: None,
            }),
        )
            .into_response()),
        Err(err) => Err(err),
    }
}
