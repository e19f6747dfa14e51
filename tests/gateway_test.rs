mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use recruitment_site::{
    routes,
    services::{api_client::HttpTransport, auth_service::AdminAuthService},
    utils::crypto::hash_password,
    AppState,
};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "s3cret-pass";
const BOUNDARY: &str = "----gateway-test-boundary";

async fn gateway() -> (Router, common::Recorder) {
    let (base, recorder) = common::spawn_backend().await;
    let transport = HttpTransport::new(base, None).expect("transport");
    let hash = hash_password(ADMIN_PASSWORD).expect("hash");
    let state = AppState::with_transport(
        Arc::new(transport),
        AdminAuthService::new(ADMIN_EMAIL, hash),
    );
    (routes::router(state, 100), recorder)
}

async fn body_json(response: Response) -> JsonValue {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn json_request(method: &str, uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn multipart_request(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/site/jobs/apply")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn health_reports_the_service() {
    let (app, _recorder) = gateway().await;

    let response = app.oneshot(get("/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn services_catalogue_is_static() {
    let (app, recorder) = gateway().await;

    let response = app
        .oneshot(get("/api/site/services"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["services"].as_array().map(Vec::len), Some(6));
    assert!(recorder.all().is_empty());
}

#[tokio::test]
async fn vacancies_carry_posted_labels() {
    let (app, recorder) = gateway().await;

    let response = app
        .oneshot(get("/api/site/vacancies?category=All%20Categories&location=Pune"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["jobs"][0]["title"], "Staff Nurse");
    assert!(body["jobs"][0]["posted"].as_str().is_some());

    let query = &recorder.all()[0].query;
    assert!(!query.contains_key("category"));
    assert_eq!(query.get("location").map(String::as_str), Some("Pune"));
}

#[tokio::test]
async fn filter_options_lead_with_sentinels() {
    let (app, _recorder) = gateway().await;

    let response = app
        .oneshot(get("/api/site/filter-options"))
        .await
        .expect("response");
    let body = body_json(response).await;
    assert_eq!(body["categories"][0], "All Categories");
    assert_eq!(body["jobTypes"][0], "All Types");
}

#[tokio::test]
async fn empty_contact_form_is_rejected_locally() {
    let (app, recorder) = gateway().await;

    let response = app
        .oneshot(json_request("POST", "/api/site/contact", json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"].as_object().map(|e| e.len()), Some(4));
    assert!(body["errors"]["phone"].is_string());
    assert_eq!(recorder.count("POST /contact-us"), 0);
}

#[tokio::test]
async fn contact_form_reaches_the_backend() {
    let (app, recorder) = gateway().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/site/contact",
            json!({
                "yourName": "Jo",
                "yourEmail": "jo@x.com",
                "phone": "98765432",
                "yourMessage": "Need 3 devs."
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Thanks, we will be in touch.");
    assert_eq!(recorder.all()[0].body["fullPhoneNumber"], "+9198765432");
}

#[tokio::test]
async fn apply_without_resume_is_rejected() {
    let (app, recorder) = gateway().await;

    let request = multipart_request(
        &[
            ("jobId", "j1"),
            ("jobTitle", "Staff Nurse"),
            ("companyName", "CarePlus"),
            ("name", "Asha"),
            ("email", "asha@example.com"),
        ],
        None,
    );
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(
        body["errors"]["resume"],
        "Resume (.pdf, .doc, .docx) is required."
    );
    assert_eq!(recorder.count("POST /jobs/apply"), 0);
}

#[tokio::test]
async fn apply_with_wrong_file_type_is_rejected() {
    let (app, recorder) = gateway().await;

    let request = multipart_request(
        &[("jobId", "j1"), ("name", "Asha"), ("email", "asha@example.com")],
        Some(("photo.png", "image/png", &b"not a resume"[..])),
    );
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["errors"]["resume"].is_string());
    assert_eq!(recorder.count("POST /jobs/apply"), 0);
}

#[tokio::test]
async fn refused_resume_is_reported_with_other_field_errors() {
    let (app, recorder) = gateway().await;

    let request = multipart_request(
        &[("jobId", "j1"), ("name", " "), ("email", "asha@example.com")],
        Some(("photo.png", "image/png", &b"not a resume"[..])),
    );
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    let resume = body["errors"]["resume"].as_str().expect("resume error");
    assert!(resume.starts_with("Invalid file type"));
    assert!(body["errors"]["name"].is_string());
    assert!(body["errors"]["email"].is_null());
    assert_eq!(recorder.count("POST /jobs/apply"), 0);
}

#[tokio::test]
async fn application_email_with_two_at_signs_is_rejected() {
    let (app, recorder) = gateway().await;

    let request = multipart_request(
        &[("jobId", "j1"), ("name", "Asha"), ("email", "a@@b.co")],
        Some(("cv.pdf", "application/pdf", &b"%PDF-1.4 resume"[..])),
    );
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["errors"]["email"].is_string());
    assert_eq!(recorder.count("POST /jobs/apply"), 0);
}

#[tokio::test]
async fn apply_with_resume_is_forwarded() {
    let (app, recorder) = gateway().await;

    let request = multipart_request(
        &[
            ("jobId", "j1"),
            ("jobTitle", "Staff Nurse"),
            ("companyName", "CarePlus"),
            ("name", "Asha"),
            ("email", "asha@example.com"),
            ("coverLetter", "Ten years on wards."),
        ],
        Some(("cv.pdf", "application/pdf", &b"%PDF-1.4 resume"[..])),
    );
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Application received.");

    let seen = &recorder.all()[0].body;
    assert_eq!(seen["jobId"], "j1");
    assert_eq!(seen["resume"]["fileName"], "cv.pdf");
}

#[tokio::test]
async fn rejected_subscription_is_a_bad_gateway() {
    let (app, _recorder) = gateway().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/site/subscribe",
            json!({ "email": "taken@example.com" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "This email is already subscribed.");
}

#[tokio::test]
async fn contact_info_falls_back_to_placeholders() {
    let (app, _recorder) = gateway().await;

    let response = app
        .oneshot(get("/api/site/contact-info"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["contactInfo"]["phone"], "Not Available");
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let (app, _recorder) = gateway().await;

    let response = app
        .oneshot(get("/api/site/blog/posts/nope"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_login_accepts_configured_credentials() {
    let (app, _recorder) = gateway().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            json!({ "email": " Admin@Example.com ", "password": ADMIN_PASSWORD }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["redirect"], "/admin/dashboard");
}

#[tokio::test]
async fn admin_login_rejects_wrong_password() {
    let (app, _recorder) = gateway().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            json!({ "email": ADMIN_EMAIL, "password": "guess" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Invalid admin credentials. Please try again."
    );
}
