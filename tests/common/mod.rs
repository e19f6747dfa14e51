#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use url::Url;

/// What the stub backend saw, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub route: String,
    pub query: HashMap<String, String>,
    pub body: JsonValue,
}

#[derive(Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Recorder {
    fn push(&self, route: &str, query: HashMap<String, String>, body: JsonValue) {
        self.seen.lock().unwrap().push(Seen {
            route: route.to_string(),
            query,
            body,
        });
    }

    pub fn all(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count(&self, route: &str) -> usize {
        self.all().iter().filter(|s| s.route == route).count()
    }
}

async fn jobs(State(rec): State<Recorder>, Query(query): Query<HashMap<String, String>>) -> Response {
    rec.push("GET /jobs", query, JsonValue::Null);
    Json(json!({
        "success": true,
        "jobs": [
            {
                "_id": "j1",
                "title": "Staff Nurse",
                "company": "CarePlus",
                "location": "Pune",
                "type": "Full-time",
                "salary": "4 LPA",
                "category": "Healthcare",
                "description": "Ward duty",
                "skills": "Patient care, ICU",
                "postedDate": "2024-01-01T00:00:00Z"
            }
        ]
    }))
    .into_response()
}

async fn filter_options(State(rec): State<Recorder>) -> Response {
    rec.push("GET /filter-options", HashMap::new(), JsonValue::Null);
    Json(json!({
        "categories": ["Healthcare", "IT"],
        "locations": ["Pune"],
        "jobTypes": ["Full-time", "Contract"]
    }))
    .into_response()
}

async fn contact_us(State(rec): State<Recorder>, Json(body): Json<JsonValue>) -> Response {
    rec.push("POST /contact-us", HashMap::new(), body.clone());
    if body["yourName"] == "Spammer" {
        return Json(json!({"success": false, "message": "Message flagged as spam."})).into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Thanks, we will be in touch."})),
    )
        .into_response()
}

async fn apply(State(rec): State<Recorder>, mut multipart: Multipart) -> Response {
    let mut fields = serde_json::Map::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "resume" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
            fields.insert(
                "resume".into(),
                json!({"fileName": file_name, "contentType": content_type, "size": size}),
            );
        } else {
            let value = field.text().await.unwrap_or_default();
            fields.insert(name, JsonValue::String(value));
        }
    }
    rec.push("POST /jobs/apply", HashMap::new(), JsonValue::Object(fields));
    Json(json!({"success": true, "message": "Application received."})).into_response()
}

async fn subscribe(State(rec): State<Recorder>, Json(body): Json<JsonValue>) -> Response {
    rec.push("POST /subscribe", HashMap::new(), body);
    (
        StatusCode::CONFLICT,
        Json(json!({"success": false, "message": "This email is already subscribed."})),
    )
        .into_response()
}

async fn contact_info(State(rec): State<Recorder>) -> Response {
    rec.push("GET /contact-info", HashMap::new(), JsonValue::Null);
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}

async fn blog_post(State(rec): State<Recorder>, Path(slug): Path<String>) -> Response {
    rec.push("GET /blog/posts/:slug", HashMap::new(), json!(slug));
    if slug != "hiring-trends" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Post not found"}))).into_response();
    }
    Json(json!({
        "_id": "p1",
        "title": "Hiring trends",
        "slug": "hiring-trends",
        "excerpt": "What changed",
        "content": "First paragraph.\n\nSecond paragraph.",
        "author": "Team",
        "readTime": "4 min read",
        "category": {"_id": "c1", "name": "Insights", "slug": "insights"},
        "tags": ["hiring"],
        "isPublished": true
    }))
    .into_response()
}

async fn delete_subscription(State(rec): State<Recorder>, Path(id): Path<String>) -> Response {
    rec.push("DELETE /subscriptions/:id", HashMap::new(), json!(id));
    Json(json!({"success": true, "message": "Subscription removed."})).into_response()
}

/// Starts the stub backend on an ephemeral port. The returned base URL
/// carries an `/api` prefix so path joining is exercised.
pub async fn spawn_backend() -> (Url, Recorder) {
    let recorder = Recorder::default();
    let api = Router::new()
        .route("/jobs", get(jobs))
        .route("/jobs/apply", post(apply))
        .route("/filter-options", get(filter_options))
        .route("/contact-us", post(contact_us))
        .route("/subscribe", post(subscribe))
        .route("/subscriptions/:id", axum::routing::delete(delete_subscription))
        .route("/contact-info", get(contact_info))
        .route("/blog/posts/:slug", get(blog_post))
        .with_state(recorder.clone());
    let app = Router::new().nest("/api", api);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr: SocketAddr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    let base = recruitment_site::config::parse_base_url(&format!("http://{}/api", addr))
        .expect("base url");
    (base, recorder)
}
