use async_trait::async_trait;
use tracing::{info, warn};

use crate::dto::admin_dto::ContactInfoForm;
use crate::dto::application_dto::ApplicationForm;
use crate::dto::blog_dto::{BlogCategoryForm, BlogPostForm};
use crate::dto::contact_dto::ContactForm;
use crate::dto::subscription_dto::SubscribeForm;
use crate::dto::vacancy_dto::VacancyForm;
use crate::error::{Error, Result};
use crate::models::contact::ContactInfo;
use crate::services::api_client::ApiReply;
use crate::services::notification_service::Notifier;
use crate::services::site_api::SiteApi;
use crate::utils::validation::{check, FieldErrors, INVALID_FORM_MESSAGE};

/// A form that can be checked locally and sent as exactly one request.
#[async_trait]
pub trait FormSubmission: Clone + Default + Send + Sync {
    fn check(&self) -> FieldErrors;

    async fn send(&self, api: &SiteApi) -> Result<ApiReply>;

    fn success_fallback(&self) -> &'static str;

    fn failure_fallback(&self) -> &'static str;

    /// False while a required file is missing.
    fn ready(&self) -> bool {
        true
    }

    /// State the form takes after a successful send.
    fn after_success(&mut self, _reply: &ApiReply) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// A request is already in flight; nothing was sent.
    Busy,
    /// Local checks failed; nothing was sent.
    Invalid(FieldErrors),
    Submitted(ApiReply),
    Failed(Error),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// Field values, per-field error flags and the submitting flag of one form.
#[derive(Debug, Clone, Default)]
pub struct FormController<F> {
    values: F,
    errors: FieldErrors,
    phase: FormPhase,
}

impl Default for FormPhase {
    fn default() -> Self {
        FormPhase::Idle
    }
}

impl<F: FormSubmission> FormController<F> {
    pub fn new(values: F) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            phase: FormPhase::Idle,
        }
    }

    pub fn values(&self) -> &F {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.values.ready()
    }

    /// Changes one field and drops its error flag.
    pub fn edit(&mut self, field: &str, change: impl FnOnce(&mut F)) {
        change(&mut self.values);
        self.errors.clear_field(field);
    }

    /// Replaces every value, e.g. when a row is opened for editing.
    pub fn load(&mut self, values: F) {
        self.values = values;
        self.errors = FieldErrors::new();
    }

    pub fn reset(&mut self) {
        self.load(F::default());
    }

    /// Validates and enters the submitting phase, handing back the values to
    /// send. On `Err` the attempt is already over.
    pub fn begin(&mut self, notifier: &dyn Notifier) -> std::result::Result<F, SubmitOutcome> {
        if self.is_submitting() {
            return Err(SubmitOutcome::Busy);
        }

        let errors = self.values.check();
        if !errors.is_empty() {
            warn!(fields = %errors, "Form rejected before submission");
            self.errors = errors.clone();
            notifier.error(INVALID_FORM_MESSAGE);
            return Err(SubmitOutcome::Invalid(errors));
        }

        self.errors = FieldErrors::new();
        self.phase = FormPhase::Submitting;
        Ok(self.values.clone())
    }

    /// Applies the result of the request started by [`begin`](Self::begin).
    pub fn finish(&mut self, result: Result<ApiReply>, notifier: &dyn Notifier) -> SubmitOutcome {
        self.phase = FormPhase::Idle;
        match result {
            Ok(reply) => {
                let message = reply
                    .message()
                    .unwrap_or_else(|| self.values.success_fallback())
                    .to_string();
                info!(status = reply.status, "Form submitted");
                notifier.success(&message);
                self.values.after_success(&reply);
                self.errors = FieldErrors::new();
                SubmitOutcome::Submitted(reply)
            }
            Err(err) => {
                warn!(error = %err, "Form submission failed");
                notifier.error(&err.user_message(self.values.failure_fallback()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    pub async fn submit(&mut self, api: &SiteApi, notifier: &dyn Notifier) -> SubmitOutcome {
        let values = match self.begin(notifier) {
            Ok(values) => values,
            Err(outcome) => return outcome,
        };
        let result = values.send(api).await;
        self.finish(result, notifier)
    }
}

#[async_trait]
impl FormSubmission for ContactForm {
    fn check(&self) -> FieldErrors {
        check(self)
    }

    async fn send(&self, api: &SiteApi) -> Result<ApiReply> {
        api.submit_contact(self).await
    }

    fn success_fallback(&self) -> &'static str {
        "Message sent successfully!"
    }

    fn failure_fallback(&self) -> &'static str {
        "An unexpected network error occurred. Please try again."
    }
}

#[async_trait]
impl FormSubmission for ApplicationForm {
    fn check(&self) -> FieldErrors {
        self.check_fields()
    }

    async fn send(&self, api: &SiteApi) -> Result<ApiReply> {
        api.apply(self).await
    }

    fn success_fallback(&self) -> &'static str {
        "Application submitted successfully!"
    }

    fn failure_fallback(&self) -> &'static str {
        "An unexpected error occurred while submitting."
    }

    fn ready(&self) -> bool {
        self.resume.is_some()
    }
}

#[async_trait]
impl FormSubmission for SubscribeForm {
    fn check(&self) -> FieldErrors {
        check(self)
    }

    async fn send(&self, api: &SiteApi) -> Result<ApiReply> {
        api.subscribe(self).await
    }

    fn success_fallback(&self) -> &'static str {
        "Successfully subscribed!"
    }

    fn failure_fallback(&self) -> &'static str {
        "Could not subscribe."
    }
}

#[async_trait]
impl FormSubmission for VacancyForm {
    fn check(&self) -> FieldErrors {
        self.check_fields()
    }

    async fn send(&self, api: &SiteApi) -> Result<ApiReply> {
        match &self.editing {
            Some(id) => api.update_job(id, self).await,
            None => api.create_job(self).await,
        }
    }

    fn success_fallback(&self) -> &'static str {
        if self.editing.is_some() {
            "Vacancy updated!"
        } else {
            "Vacancy added!"
        }
    }

    fn failure_fallback(&self) -> &'static str {
        if self.editing.is_some() {
            "Vacancy update failed."
        } else {
            "Vacancy add failed."
        }
    }
}

#[async_trait]
impl FormSubmission for BlogCategoryForm {
    fn check(&self) -> FieldErrors {
        check(self)
    }

    async fn send(&self, api: &SiteApi) -> Result<ApiReply> {
        match &self.editing {
            Some(id) => api.update_blog_category(id, self).await,
            None => api.create_blog_category(self).await,
        }
    }

    fn success_fallback(&self) -> &'static str {
        if self.editing.is_some() {
            "Blog category updated!"
        } else {
            "Blog category added!"
        }
    }

    fn failure_fallback(&self) -> &'static str {
        if self.editing.is_some() {
            "Could not update blog category."
        } else {
            "Could not add blog category."
        }
    }
}

#[async_trait]
impl FormSubmission for BlogPostForm {
    fn check(&self) -> FieldErrors {
        self.check_fields()
    }

    async fn send(&self, api: &SiteApi) -> Result<ApiReply> {
        match &self.editing {
            Some(id) => api.update_blog_post(id, self).await,
            None => api.create_blog_post(self).await,
        }
    }

    fn success_fallback(&self) -> &'static str {
        if self.editing.is_some() {
            "Blog post updated!"
        } else {
            "Blog post added!"
        }
    }

    fn failure_fallback(&self) -> &'static str {
        if self.editing.is_some() {
            "Blog post update failed."
        } else {
            "Blog post add failed."
        }
    }
}

#[async_trait]
impl FormSubmission for ContactInfoForm {
    fn check(&self) -> FieldErrors {
        check(self)
    }

    async fn send(&self, api: &SiteApi) -> Result<ApiReply> {
        api.update_contact_info(self).await
    }

    fn success_fallback(&self) -> &'static str {
        "Contact info updated!"
    }

    fn failure_fallback(&self) -> &'static str {
        "Update failed."
    }

    /// The singleton stays on screen; the stored copy wins when echoed back.
    fn after_success(&mut self, reply: &ApiReply) {
        if let Ok(info) = reply.extract::<ContactInfo>(&["data", "contactInfo"]) {
            if reply.body.get("data").is_some() || reply.body.get("contactInfo").is_some() {
                *self = ContactInfoForm::from(&info);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::api_client::{ApiRequest, MockTransport, RequestBody};
    use crate::services::notification_service::{Notification, NotificationLevel, NotificationLog};
    use crate::utils::upload::UploadFile;
    use bytes::Bytes;
    use mockall::predicate::function;
    use serde_json::json;

    fn api(mock: MockTransport) -> SiteApi {
        SiteApi::new(Arc::new(mock))
    }

    fn silent_backend() -> SiteApi {
        let mut mock = MockTransport::new();
        mock.expect_execute().never();
        api(mock)
    }

    fn filled_contact() -> ContactForm {
        ContactForm {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            phone: "98765432".into(),
            message: "Need 3 devs.".into(),
            ..ContactForm::default()
        }
    }

    #[tokio::test]
    async fn empty_required_fields_block_the_request() {
        let api = silent_backend();
        let log = NotificationLog::new();
        let mut form = FormController::new(ContactForm::default());

        let outcome = form.submit(&api, &log).await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 4);
        assert_eq!(form.errors(), &errors);
        assert!(errors.contains("phone"));
        assert_eq!(log.entries(), vec![Notification::error(INVALID_FORM_MESSAGE)]);
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[tokio::test]
    async fn contact_scenario_posts_once_with_full_number() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .with(function(|req: &ApiRequest| {
                let RequestBody::Json(body) = &req.body else {
                    return false;
                };
                req.path == "/contact-us"
                    && body["yourName"] == "Jo"
                    && body["yourEmail"] == "jo@x.com"
                    && body["phone"] == "98765432"
                    && body["yourMessage"] == "Need 3 devs."
                    && body["fullPhoneNumber"] == "+9198765432"
            }))
            .times(1)
            .returning(|_| Ok(ApiReply::new(201, json!({"success": true, "message": "Thanks, Jo!"}))));

        let api = api(mock);
        let log = NotificationLog::new();
        let mut form = FormController::new(filled_contact());

        let outcome = form.submit(&api, &log).await;

        assert!(outcome.is_submitted());
        assert_eq!(log.entries(), vec![Notification::success("Thanks, Jo!")]);
        assert_eq!(form.values(), &ContactForm::default());
    }

    #[tokio::test]
    async fn failure_keeps_values_and_notifies_once() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(ApiReply::new(200, json!({"success": false}))));

        let api = api(mock);
        let log = NotificationLog::new();
        let mut form = FormController::new(filled_contact());

        let outcome = form.submit(&api, &log).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form.values(), &filled_contact());
        assert_eq!(log.count(NotificationLevel::Error), 1);
        assert_eq!(
            log.last().map(|n| n.message),
            Some("An unexpected network error occurred. Please try again.".to_string())
        );
    }

    #[tokio::test]
    async fn transport_error_text_is_shown() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(Error::BadRequest("connection refused".into())));

        let api = api(mock);
        let log = NotificationLog::new();
        let mut form = FormController::new(SubscribeForm { email: "a@b.co".into() });

        form.submit(&api, &log).await;
        assert_eq!(log.last().map(|n| n.message), Some("connection refused".to_string()));
        assert_eq!(form.values().email, "a@b.co");
    }

    #[tokio::test]
    async fn missing_resume_disables_and_blocks_submit() {
        let api = silent_backend();
        let log = NotificationLog::new();
        let mut form = FormController::new(ApplicationForm {
            job: Some(crate::dto::application_dto::JobTarget {
                id: "j1".into(),
                title: "Nurse".into(),
                company: "Care".into(),
            }),
            name: "Asha".into(),
            email: "asha@care.in".into(),
            ..ApplicationForm::default()
        });

        assert!(!form.can_submit());
        let SubmitOutcome::Invalid(errors) = form.submit(&api, &log).await else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get("resume"), Some("Resume (.pdf, .doc, .docx) is required."));
        assert_eq!(log.len(), 1);

        form.edit("resume", |f| {
            f.resume = Some(UploadFile::new("cv.pdf", "application/pdf", Bytes::from_static(b"%PDF")));
        });
        assert!(form.can_submit());
        assert!(!form.errors().contains("resume"));
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_busy() {
        let api = silent_backend();
        let log = NotificationLog::new();
        let mut form = FormController::new(filled_contact());

        let started = form.begin(&log);
        assert!(started.is_ok());
        assert!(!form.can_submit());
        assert!(matches!(form.submit(&api, &log).await, SubmitOutcome::Busy));
        assert!(log.is_empty());

        form.finish(Ok(ApiReply::new(200, json!({}))), &log);
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(log.last(), Some(Notification::success("Message sent successfully!")));
    }

    #[tokio::test]
    async fn editing_vacancy_issues_put() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .with(function(|req: &ApiRequest| {
                req.path == "/jobs/v9" && req.method == crate::services::api_client::Method::Put
            }))
            .times(1)
            .returning(|_| Ok(ApiReply::new(200, json!({"success": true}))));

        let api = api(mock);
        let log = NotificationLog::new();
        let mut form = FormController::new(VacancyForm {
            editing: Some("v9".into()),
            title: "Welder".into(),
            company: "Forge".into(),
            location: "Pune".into(),
            job_type: "Full-time".into(),
            category: "Manufacturing".into(),
            description: "Shop floor".into(),
            ..VacancyForm::default()
        });

        assert!(form.submit(&api, &log).await.is_submitted());
        assert_eq!(log.last(), Some(Notification::success("Vacancy updated!")));
        assert_eq!(form.values(), &VacancyForm::default());
    }

    #[tokio::test]
    async fn contact_info_keeps_echoed_record() {
        let mut mock = MockTransport::new();
        mock.expect_execute().times(1).returning(|_| {
            Ok(ApiReply::new(
                200,
                json!({"success": true, "data": {"address": "2 Hill Rd", "phone": "+91 1", "email": "a@b.co", "locationMapUrl": ""}}),
            ))
        });

        let api = api(mock);
        let log = NotificationLog::new();
        let mut form = FormController::new(ContactInfoForm {
            address: "2 Hill Road".into(),
            phone: "+91 1".into(),
            email: "a@b.co".into(),
            location_map_url: String::new(),
        });

        assert!(form.submit(&api, &log).await.is_submitted());
        assert_eq!(form.values().address, "2 Hill Rd");
    }
}
