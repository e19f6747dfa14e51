use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::dto::admin_dto::{ContactInfoForm, ResponseForm, StatusUpdatePayload};
use crate::dto::application_dto::ApplicationForm;
use crate::dto::blog_dto::{BlogCategoryForm, BlogPostForm, BlogSearch};
use crate::dto::contact_dto::ContactForm;
use crate::dto::subscription_dto::SubscribeForm;
use crate::dto::vacancy_dto::{VacancyForm, VacancySearch};
use crate::error::Result;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::blog::{BlogCategory, BlogPost};
use crate::models::contact::{ContactInfo, ContactStatus, ContactSubmission};
use crate::models::subscription::Subscription;
use crate::models::vacancy::{FilterOptions, Vacancy};
use crate::services::api_client::{ApiReply, ApiRequest, Transport};

/// Listing knobs shared by the admin collection endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub admin_view: bool,
    pub limit: Option<u32>,
}

impl ListOptions {
    pub fn admin(limit: u32) -> Self {
        Self {
            admin_view: true,
            limit: Some(limit),
        }
    }

    fn apply(self, mut request: ApiRequest) -> ApiRequest {
        if self.admin_view {
            request = request.query("admin_view", "true");
        }
        if let Some(limit) = self.limit {
            request = request.query("limit", limit);
        }
        request
    }
}

/// Typed access to the recruitment backend. Every mutating call returns the
/// normalized reply so callers can surface the server's message.
#[derive(Clone)]
pub struct SiteApi {
    transport: Arc<dyn Transport>,
}

impl SiteApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call(&self, request: ApiRequest) -> Result<ApiReply> {
        self.transport.execute(request).await?.into_result()
    }

    // Vacancies

    #[instrument(skip(self))]
    pub async fn list_jobs(&self, search: &VacancySearch, options: ListOptions) -> Result<Vec<Vacancy>> {
        let request = options.apply(ApiRequest::get("/jobs").queries(search.to_query()));
        self.call(request).await?.extract_list(&["jobs"])
    }

    pub async fn filter_options(&self) -> Result<FilterOptions> {
        self.call(ApiRequest::get("/filter-options")).await?.extract(&[])
    }

    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn create_job(&self, form: &VacancyForm) -> Result<ApiReply> {
        self.call(ApiRequest::post("/jobs").multipart(form.to_multipart())).await
    }

    #[instrument(skip(self, form))]
    pub async fn update_job(&self, id: &str, form: &VacancyForm) -> Result<ApiReply> {
        self.call(ApiRequest::put(format!("/jobs/{}", id)).multipart(form.to_multipart()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_job(&self, id: &str) -> Result<ApiReply> {
        self.call(ApiRequest::delete(format!("/jobs/{}", id))).await
    }

    #[instrument(skip(self, form), fields(job = ?form.job.as_ref().map(|j| j.id.as_str())))]
    pub async fn apply(&self, form: &ApplicationForm) -> Result<ApiReply> {
        self.call(ApiRequest::post("/jobs/apply").multipart(form.to_multipart()))
            .await
    }

    // Contact info

    /// The singleton may come wrapped, bare, or as a one-element array.
    pub async fn contact_info(&self) -> Result<ContactInfo> {
        let reply = self.call(ApiRequest::get("/contact-info")).await?;
        let value = ["contactInfo", "data"]
            .iter()
            .find_map(|key| reply.body.get(*key).filter(|v| !v.is_null()))
            .unwrap_or(&reply.body);
        let value = match value {
            JsonValue::Array(items) => items.first().cloned().unwrap_or(JsonValue::Null),
            other => other.clone(),
        };
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update_contact_info(&self, form: &ContactInfoForm) -> Result<ApiReply> {
        self.call(ApiRequest::put("/contact-info").json(form)?).await
    }

    // Blog categories

    pub async fn blog_categories(&self) -> Result<Vec<BlogCategory>> {
        self.call(ApiRequest::get("/blog/categories"))
            .await?
            .extract_list(&["categories"])
    }

    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_blog_category(&self, form: &BlogCategoryForm) -> Result<ApiReply> {
        self.call(ApiRequest::post("/blog/categories").json(form)?).await
    }

    #[instrument(skip(self, form))]
    pub async fn update_blog_category(&self, id: &str, form: &BlogCategoryForm) -> Result<ApiReply> {
        self.call(ApiRequest::put(format!("/blog/categories/{}", id)).json(form)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_blog_category(&self, id: &str) -> Result<ApiReply> {
        self.call(ApiRequest::delete(format!("/blog/categories/{}", id)))
            .await
    }

    // Blog posts

    #[instrument(skip(self))]
    pub async fn blog_posts(&self, search: &BlogSearch, options: ListOptions) -> Result<Vec<BlogPost>> {
        let request = options.apply(ApiRequest::get("/blog/posts").queries(search.to_query()));
        self.call(request).await?.extract_list(&["posts"])
    }

    /// Accepts a slug on the public site and an id from the admin editor.
    #[instrument(skip(self))]
    pub async fn blog_post(&self, slug_or_id: &str) -> Result<BlogPost> {
        self.call(ApiRequest::get(format!("/blog/posts/{}", slug_or_id)))
            .await?
            .extract(&["post", "data"])
    }

    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn create_blog_post(&self, form: &BlogPostForm) -> Result<ApiReply> {
        self.call(ApiRequest::post("/blog/posts").multipart(form.to_multipart()))
            .await
    }

    #[instrument(skip(self, form))]
    pub async fn update_blog_post(&self, id: &str, form: &BlogPostForm) -> Result<ApiReply> {
        self.call(ApiRequest::put(format!("/blog/posts/{}", id)).multipart(form.to_multipart()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_blog_post(&self, id: &str) -> Result<ApiReply> {
        self.call(ApiRequest::delete(format!("/blog/posts/{}", id))).await
    }

    // Applications

    #[instrument(skip(self))]
    pub async fn applications(
        &self,
        limit: u32,
        status_filter: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>> {
        let mut request = ApiRequest::get("/applications").query("limit", limit);
        if let Some(status) = status_filter {
            request = request.query("status_filter", status);
        }
        self.call(request).await?.extract_list(&["applications"])
    }

    /// The reply may echo the full record, part of it, or nothing.
    #[instrument(skip(self, payload), fields(status = %payload.status))]
    pub async fn update_application_status(
        &self,
        id: &str,
        payload: &StatusUpdatePayload,
    ) -> Result<ApiReply> {
        self.call(ApiRequest::put(format!("/applications/{}/status", id)).json(payload)?)
            .await
    }

    #[instrument(skip(self, form))]
    pub async fn respond_to_application(&self, id: &str, form: &ResponseForm) -> Result<ApiReply> {
        self.call(ApiRequest::post(format!("/applications/{}/respond", id)).json(form)?)
            .await
    }

    // Contact submissions

    #[instrument(skip(self))]
    pub async fn contact_submissions(
        &self,
        limit: u32,
        status_filter: Option<ContactStatus>,
    ) -> Result<Vec<ContactSubmission>> {
        let mut request = ApiRequest::get("/contact-submissions").query("limit", limit);
        if let Some(status) = status_filter {
            request = request.query("status_filter", status);
        }
        self.call(request).await?.extract_list(&["submissions"])
    }

    #[instrument(skip(self, payload), fields(status = %payload.status))]
    pub async fn update_submission_status(
        &self,
        id: &str,
        payload: &StatusUpdatePayload,
    ) -> Result<ApiReply> {
        self.call(ApiRequest::put(format!("/contact-submissions/{}/status", id)).json(payload)?)
            .await
    }

    #[instrument(skip(self, form))]
    pub async fn respond_to_submission(&self, id: &str, form: &ResponseForm) -> Result<ApiReply> {
        self.call(ApiRequest::post(format!("/contact-submissions/{}/respond", id)).json(form)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_submission(&self, id: &str) -> Result<ApiReply> {
        self.call(ApiRequest::delete(format!("/contact-submissions/{}", id)))
            .await
    }

    /// Public contact form, `POST /contact-us`.
    #[instrument(skip(self, form), fields(country = %form.country_code))]
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ApiReply> {
        self.call(ApiRequest::post("/contact-us").json(&form.to_payload())?)
            .await
    }

    // Subscriptions

    pub async fn subscriptions(&self) -> Result<Vec<Subscription>> {
        self.call(ApiRequest::get("/subscriptions"))
            .await?
            .extract_list(&["subscriptions"])
    }

    #[instrument(skip(self, form))]
    pub async fn subscribe(&self, form: &SubscribeForm) -> Result<ApiReply> {
        let body = SubscribeForm {
            email: form.email.trim().to_string(),
        };
        self.call(ApiRequest::post("/subscribe").json(&body)?).await
    }

    #[instrument(skip(self))]
    pub async fn delete_subscription(&self, id: &str) -> Result<ApiReply> {
        self.call(ApiRequest::delete(format!("/subscriptions/{}", id)))
            .await
    }
}
