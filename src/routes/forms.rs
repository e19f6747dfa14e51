use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use crate::{
    dto::{
        application_dto::{ApplicationForm, JobTarget},
        contact_dto::ContactForm,
        site_dto::FormResponse,
        subscription_dto::SubscribeForm,
    },
    error::Result,
    services::{
        form_service::{FormController, FormSubmission, SubmitOutcome},
        notification_service::{Notification, NotificationLog},
    },
    utils::{
        upload::UploadFile,
        validation::{FieldErrors, INVALID_FORM_MESSAGE},
    },
    AppState,
};

/// Runs one submission and answers with the toast it produced.
async fn run_form<F: FormSubmission>(state: &AppState, form: F) -> Response {
    let log = NotificationLog::new();
    let mut controller = FormController::new(form);
    let outcome = controller.submit(&state.api, &log).await;
    let notification = log
        .last()
        .unwrap_or_else(|| Notification::error(controller.values().failure_fallback()));
    form_reply(outcome, &notification)
}

fn form_reply(outcome: SubmitOutcome, notification: &Notification) -> Response {
    let (status, errors) = match outcome {
        SubmitOutcome::Submitted(_) => (StatusCode::OK, None),
        SubmitOutcome::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, Some(errors)),
        // Every request owns its controller, so none is ever mid-flight here.
        SubmitOutcome::Failed(_) | SubmitOutcome::Busy => (StatusCode::BAD_GATEWAY, None),
    };
    (status, Json(FormResponse::from_notification(notification, errors))).into_response()
}

fn rejected(errors: FieldErrors) -> Response {
    form_reply(
        SubmitOutcome::Invalid(errors),
        &Notification::error(INVALID_FORM_MESSAGE),
    )
}

#[utoipa::path(
    post,
    path = "/api/site/contact",
    request_body = ContactForm,
    responses(
        (status = 200, description = "Message accepted"),
        (status = 422, description = "Field errors"),
        (status = 502, description = "Backend rejected the message")
    )
)]
#[axum::debug_handler]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Response {
    run_form(&state, form).await
}

#[utoipa::path(
    post,
    path = "/api/site/subscribe",
    request_body = SubscribeForm,
    responses(
        (status = 200, description = "Subscribed"),
        (status = 422, description = "Invalid email"),
        (status = 502, description = "Backend rejected the address")
    )
)]
#[axum::debug_handler]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(form): Json<SubscribeForm>,
) -> Response {
    run_form(&state, form).await
}

/// Multipart fields: jobId, jobTitle, companyName, name, email, coverLetter
/// and the `resume` file. A refused file is reported with the other field
/// errors.
#[utoipa::path(
    post,
    path = "/api/site/jobs/apply",
    responses(
        (status = 200, description = "Application submitted"),
        (status = 422, description = "Field errors, e.g. missing resume"),
        (status = 502, description = "Backend rejected the application")
    )
)]
#[axum::debug_handler]
pub async fn apply(State(state): State<AppState>, mut multipart: Multipart) -> Result<Response> {
    let mut form = ApplicationForm::default();
    let mut job_id = String::new();
    let mut job_title = String::new();
    let mut company = String::new();
    let mut resume_error = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "jobId" => job_id = field.text().await?,
            "jobTitle" => job_title = field.text().await?,
            "companyName" => company = field.text().await?,
            "name" => form.name = field.text().await?,
            "email" => form.email = field.text().await?,
            "coverLetter" => form.cover_letter = field.text().await?,
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                if bytes.is_empty() {
                    continue;
                }
                info!(file = %file_name, size = bytes.len(), "Resume received");
                if let Err(message) = form.attach_resume(UploadFile::new(file_name, content_type, bytes)) {
                    resume_error = Some(message);
                }
            }
            _ => {}
        }
    }

    if !job_id.trim().is_empty() {
        form.job = Some(JobTarget {
            id: job_id.trim().to_string(),
            title: job_title,
            company,
        });
    }

    if let Some(message) = resume_error {
        let mut errors = FieldErrors::new();
        errors.insert("resume", message);
        errors.merge(form.check_fields());
        return Ok(rejected(errors));
    }

    Ok(run_form(&state, form).await)
}
