use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::dto::admin_dto::{ResponseForm, StatusUpdatePayload};
use crate::dto::blog_dto::{BlogCategoryForm, BlogPostForm, BlogSearch};
use crate::dto::vacancy_dto::{VacancyForm, VacancySearch};
use crate::error::Result;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::blog::{BlogCategory, BlogPost};
use crate::models::contact::{ContactStatus, ContactSubmission};
use crate::models::subscription::Subscription;
use crate::models::vacancy::Vacancy;
use crate::models::Record;
use crate::services::api_client::ApiReply;
use crate::services::form_service::{FormController, FormSubmission, SubmitOutcome};
use crate::services::notification_service::Notifier;
use crate::services::site_api::{ListOptions, SiteApi};
use crate::utils::validation::check;

/// Filter value that clears a status filter.
pub const ALL_FILTER: &str = "All";

/// Status filter of panels that have none. No value can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoFilter {}

impl fmt::Display for NoFilter {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl FromStr for NoFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Err(format!("This list has no filter: {}", s))
    }
}

/// One collection managed from the dashboard.
#[async_trait]
pub trait PanelResource: Send + Sync + 'static {
    type Item: Record + Clone + Send + Sync;
    type Filter: Copy + Send + Sync + FromStr<Err = String> + fmt::Display;

    const LABEL: &'static str;
    const LOAD_FALLBACK: &'static str;

    async fn fetch(api: &SiteApi, filter: Option<Self::Filter>) -> Result<Vec<Self::Item>>;
}

/// A collection whose rows can be deleted after confirmation.
#[async_trait]
pub trait RemovablePanel: PanelResource {
    const DELETED: &'static str;

    async fn remove(api: &SiteApi, id: &str) -> Result<ApiReply>;
}

pub struct VacancyPanel;
pub struct BlogCategoryPanel;
pub struct BlogPostPanel;
/// Applications are only triaged: the backend has no delete route for them,
/// so this panel is not a [`RemovablePanel`].
pub struct ApplicationPanel;
pub struct ContactSubmissionPanel;
pub struct SubscriptionPanel;

pub const VACANCY_LIMIT: u32 = 200;
pub const BLOG_POST_LIMIT: u32 = 200;
pub const APPLICATION_LIMIT: u32 = 200;
pub const CONTACT_SUBMISSION_LIMIT: u32 = 100;

#[async_trait]
impl PanelResource for VacancyPanel {
    type Item = Vacancy;
    type Filter = NoFilter;

    const LABEL: &'static str = "vacancy";
    const LOAD_FALLBACK: &'static str = "Could not load vacancies list.";

    async fn fetch(api: &SiteApi, _: Option<NoFilter>) -> Result<Vec<Vacancy>> {
        api.list_jobs(&VacancySearch::default(), ListOptions::admin(VACANCY_LIMIT))
            .await
    }
}

#[async_trait]
impl RemovablePanel for VacancyPanel {
    const DELETED: &'static str = "Vacancy deleted!";

    async fn remove(api: &SiteApi, id: &str) -> Result<ApiReply> {
        api.delete_job(id).await
    }
}

#[async_trait]
impl PanelResource for BlogCategoryPanel {
    type Item = BlogCategory;
    type Filter = NoFilter;

    const LABEL: &'static str = "blog category";
    const LOAD_FALLBACK: &'static str = "Could not load blog categories list.";

    async fn fetch(api: &SiteApi, _: Option<NoFilter>) -> Result<Vec<BlogCategory>> {
        api.blog_categories().await
    }
}

#[async_trait]
impl RemovablePanel for BlogCategoryPanel {
    const DELETED: &'static str = "Blog category deleted!";

    async fn remove(api: &SiteApi, id: &str) -> Result<ApiReply> {
        api.delete_blog_category(id).await
    }
}

#[async_trait]
impl PanelResource for BlogPostPanel {
    type Item = BlogPost;
    type Filter = NoFilter;

    const LABEL: &'static str = "blog post";
    const LOAD_FALLBACK: &'static str = "Could not load blog posts list.";

    async fn fetch(api: &SiteApi, _: Option<NoFilter>) -> Result<Vec<BlogPost>> {
        api.blog_posts(&BlogSearch::default(), ListOptions::admin(BLOG_POST_LIMIT))
            .await
    }
}

#[async_trait]
impl RemovablePanel for BlogPostPanel {
    const DELETED: &'static str = "Blog post deleted!";

    async fn remove(api: &SiteApi, id: &str) -> Result<ApiReply> {
        api.delete_blog_post(id).await
    }
}

#[async_trait]
impl PanelResource for ApplicationPanel {
    type Item = Application;
    type Filter = ApplicationStatus;

    const LABEL: &'static str = "application";
    const LOAD_FALLBACK: &'static str = "Could not load applications list.";

    async fn fetch(api: &SiteApi, filter: Option<ApplicationStatus>) -> Result<Vec<Application>> {
        api.applications(APPLICATION_LIMIT, filter).await
    }
}

#[async_trait]
impl PanelResource for ContactSubmissionPanel {
    type Item = ContactSubmission;
    type Filter = ContactStatus;

    const LABEL: &'static str = "contact submission";
    const LOAD_FALLBACK: &'static str = "Could not load contact submissions list.";

    async fn fetch(api: &SiteApi, filter: Option<ContactStatus>) -> Result<Vec<ContactSubmission>> {
        api.contact_submissions(CONTACT_SUBMISSION_LIMIT, filter).await
    }
}

#[async_trait]
impl RemovablePanel for ContactSubmissionPanel {
    const DELETED: &'static str = "Submission deleted!";

    async fn remove(api: &SiteApi, id: &str) -> Result<ApiReply> {
        api.delete_submission(id).await
    }
}

#[async_trait]
impl PanelResource for SubscriptionPanel {
    type Item = Subscription;
    type Filter = NoFilter;

    const LABEL: &'static str = "email subscription";
    const LOAD_FALLBACK: &'static str = "Could not fetch subscriptions.";

    async fn fetch(api: &SiteApi, _: Option<NoFilter>) -> Result<Vec<Subscription>> {
        api.subscriptions().await
    }
}

#[async_trait]
impl RemovablePanel for SubscriptionPanel {
    const DELETED: &'static str = "Subscription deleted!";

    async fn remove(api: &SiteApi, id: &str) -> Result<ApiReply> {
        api.delete_subscription(id).await
    }
}

/// Rows of one collection plus the pending delete confirmation.
pub struct ListPanel<R: PanelResource> {
    items: Vec<R::Item>,
    filter: Option<R::Filter>,
    pending_delete: Option<String>,
    loaded: bool,
    _resource: PhantomData<R>,
}

impl<R: PanelResource> Default for ListPanel<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filter: None,
            pending_delete: None,
            loaded: false,
            _resource: PhantomData,
        }
    }
}

impl<R: PanelResource> ListPanel<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&R::Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn filter(&self) -> Option<R::Filter> {
        self.filter
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Replaces the rows with a fresh fetch. A failed fetch keeps the last
    /// good rows and raises one error toast.
    pub async fn load(&mut self, api: &SiteApi, notifier: &dyn Notifier) -> bool {
        match R::fetch(api, self.filter).await {
            Ok(items) => {
                info!(panel = R::LABEL, count = items.len(), "Panel loaded");
                self.items = items;
                self.loaded = true;
                true
            }
            Err(err) => {
                warn!(panel = R::LABEL, error = %err, "Panel load failed");
                notifier.error(&err.user_message(R::LOAD_FALLBACK));
                false
            }
        }
    }

    /// `All` clears the filter. Takes effect on the next load.
    pub fn set_filter(&mut self, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        self.filter = if value.is_empty() || value.eq_ignore_ascii_case(ALL_FILTER) {
            None
        } else {
            Some(value.parse()?)
        };
        Ok(())
    }

    /// Submits a create/edit form owned by this panel and refetches the list
    /// when it goes through.
    pub async fn save<F: FormSubmission>(
        &mut self,
        form: &mut FormController<F>,
        api: &SiteApi,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        let outcome = form.submit(api, notifier).await;
        if outcome.is_submitted() {
            self.load(api, notifier).await;
        }
        outcome
    }

    /// Applies an acknowledged status change to the row. The requested
    /// fields go on first, then whatever record the backend echoed, which
    /// may be partial or absent. A row that no longer decodes is refetched.
    async fn apply_status_update(
        &mut self,
        api: &SiteApi,
        notifier: &dyn Notifier,
        id: &str,
        requested: &StatusUpdatePayload,
        echoed: Option<&JsonValue>,
    ) where
        R::Item: Serialize + DeserializeOwned,
    {
        let Some(row) = self.items.iter_mut().find(|row| row.id() == id) else {
            return;
        };
        match overlay(&*row, requested, echoed) {
            Ok(updated) => *row = updated,
            Err(err) => {
                warn!(panel = R::LABEL, id = %id, error = %err, "Could not merge status reply");
                self.load(api, notifier).await;
            }
        }
    }
}

fn overlay<T: Serialize + DeserializeOwned>(
    row: &T,
    requested: &StatusUpdatePayload,
    echoed: Option<&JsonValue>,
) -> Result<T> {
    let mut merged = serde_json::to_value(row)?;
    if let JsonValue::Object(fields) = &mut merged {
        fields.insert("status".into(), JsonValue::String(requested.status.clone()));
        if let Some(notes) = &requested.admin_notes {
            fields.insert("adminNotes".into(), JsonValue::String(notes.clone()));
        }
        if let Some(JsonValue::Object(patch)) = echoed {
            for (key, value) in patch {
                fields.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(serde_json::from_value(merged)?)
}

impl<R: RemovablePanel> ListPanel<R> {
    /// Opens the confirmation step for a row. Unknown ids are ignored.
    pub fn request_delete(&mut self, id: &str) -> bool {
        if self.item(id).is_some() {
            self.pending_delete = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Sends the confirmed DELETE. The row disappears only after the backend
    /// accepts it, then the list is refetched.
    pub async fn confirm_delete(&mut self, api: &SiteApi, notifier: &dyn Notifier) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };

        match R::remove(api, &id).await {
            Ok(reply) => {
                info!(panel = R::LABEL, id = %id, "Row deleted");
                notifier.success(reply.message().unwrap_or(R::DELETED));
                self.items.retain(|item| item.id() != id);
                self.load(api, notifier).await;
                true
            }
            Err(err) => {
                warn!(panel = R::LABEL, id = %id, error = %err, "Delete failed");
                notifier.error(&err.user_message("Delete failed."));
                false
            }
        }
    }
}

impl ListPanel<VacancyPanel> {
    pub fn begin_edit(&self, id: &str) -> Option<VacancyForm> {
        self.item(id).map(VacancyForm::from_vacancy)
    }
}

impl ListPanel<BlogCategoryPanel> {
    pub fn begin_edit(&self, id: &str) -> Option<BlogCategoryForm> {
        self.item(id).map(BlogCategoryForm::from_category)
    }
}

impl ListPanel<BlogPostPanel> {
    /// Listing rows are abbreviated; the editor loads the full post first.
    pub async fn begin_edit(
        &self,
        api: &SiteApi,
        notifier: &dyn Notifier,
        id: &str,
    ) -> Option<BlogPostForm> {
        match api.blog_post(id).await {
            Ok(post) => Some(BlogPostForm::from_post(&post)),
            Err(err) => {
                notifier.error(&err.user_message("Could not load post for editing."));
                None
            }
        }
    }
}

const STATUS_FALLBACK: &str = "Could not update status/notes.";
const RESPONSE_FALLBACK: &str = "Could not send response.";
const RESPONSE_REQUIRED: &str = "Subject and response body are required.";

impl ListPanel<ApplicationPanel> {
    pub async fn update_status(
        &mut self,
        api: &SiteApi,
        notifier: &dyn Notifier,
        id: &str,
        status: ApplicationStatus,
        admin_notes: Option<String>,
    ) -> bool {
        let payload = StatusUpdatePayload {
            status: status.to_string(),
            admin_notes,
        };
        match api.update_application_status(id, &payload).await {
            Ok(reply) => {
                self.apply_status_update(api, notifier, id, &payload, reply.record(&["application", "data"]))
                    .await;
                true
            }
            Err(err) => {
                notifier.error(&err.user_message(STATUS_FALLBACK));
                false
            }
        }
    }

    pub fn open_reply(&self, id: &str) -> Option<ResponseForm> {
        self.item(id).map(ResponseForm::for_application)
    }

    pub async fn respond(
        &mut self,
        api: &SiteApi,
        notifier: &dyn Notifier,
        id: &str,
        form: &ResponseForm,
    ) -> bool {
        if !check(form).is_empty() {
            notifier.error(RESPONSE_REQUIRED);
            return false;
        }
        match api.respond_to_application(id, form).await {
            Ok(reply) => {
                notifier.success(reply.message().unwrap_or("Response sent to applicant!"));
                self.load(api, notifier).await;
                true
            }
            Err(err) => {
                notifier.error(&err.user_message(RESPONSE_FALLBACK));
                false
            }
        }
    }
}

impl ListPanel<ContactSubmissionPanel> {
    pub async fn update_status(
        &mut self,
        api: &SiteApi,
        notifier: &dyn Notifier,
        id: &str,
        status: ContactStatus,
        admin_notes: Option<String>,
    ) -> bool {
        let payload = StatusUpdatePayload {
            status: status.to_string(),
            admin_notes,
        };
        match api.update_submission_status(id, &payload).await {
            Ok(reply) => {
                self.apply_status_update(api, notifier, id, &payload, reply.record(&["submission", "data"]))
                    .await;
                true
            }
            Err(err) => {
                notifier.error(&err.user_message(STATUS_FALLBACK));
                false
            }
        }
    }

    /// Saves notes while keeping the row's current status.
    pub async fn save_notes(
        &mut self,
        api: &SiteApi,
        notifier: &dyn Notifier,
        id: &str,
        notes: String,
    ) -> bool {
        let Some(status) = self.item(id).map(|row| row.status) else {
            notifier.error("Submission not found for notes update.");
            return false;
        };
        let saved = self.update_status(api, notifier, id, status, Some(notes)).await;
        if saved {
            notifier.success("Admin notes updated!");
        }
        saved
    }

    /// Builds the reply template. A `New` message counts as read once opened.
    pub async fn open_reply(
        &mut self,
        api: &SiteApi,
        notifier: &dyn Notifier,
        id: &str,
    ) -> Option<ResponseForm> {
        let row = self.item(id)?.clone();
        let form = ResponseForm::for_contact(&row);
        if row.status == ContactStatus::New {
            self.update_status(api, notifier, id, ContactStatus::Viewed, row.admin_notes.clone())
                .await;
        }
        Some(form)
    }

    pub async fn respond(
        &mut self,
        api: &SiteApi,
        notifier: &dyn Notifier,
        id: &str,
        form: &ResponseForm,
    ) -> bool {
        if !check(form).is_empty() {
            notifier.error(RESPONSE_REQUIRED);
            return false;
        }
        match api.respond_to_submission(id, form).await {
            Ok(reply) => {
                notifier.success(reply.message().unwrap_or("Response sent to user!"));
                self.load(api, notifier).await;
                true
            }
            Err(err) => {
                notifier.error(&err.user_message(RESPONSE_FALLBACK));
                false
            }
        }
    }
}

/// Dashboard sidebar entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    ContactInfo,
    VacancyForm,
    BlogCategoryForm,
    BlogPostForm,
    ManageVacancies,
    ManageBlogCategories,
    ManageBlogPosts,
    ManageApplications,
    ManageContactSubmissions,
    ManageSubscriptions,
}

impl AdminSection {
    pub const ALL: [AdminSection; 10] = [
        AdminSection::ContactInfo,
        AdminSection::ManageContactSubmissions,
        AdminSection::ManageSubscriptions,
        AdminSection::VacancyForm,
        AdminSection::ManageVacancies,
        AdminSection::ManageApplications,
        AdminSection::BlogCategoryForm,
        AdminSection::ManageBlogCategories,
        AdminSection::BlogPostForm,
        AdminSection::ManageBlogPosts,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            AdminSection::ContactInfo => "contact",
            AdminSection::VacancyForm => "vacancy",
            AdminSection::BlogCategoryForm => "blog-category",
            AdminSection::BlogPostForm => "blog-post",
            AdminSection::ManageVacancies => "manage-vacancies",
            AdminSection::ManageBlogCategories => "manage-blog-categories",
            AdminSection::ManageBlogPosts => "manage-blog-posts",
            AdminSection::ManageApplications => "manage-applications",
            AdminSection::ManageContactSubmissions => "manage-contact-submissions",
            AdminSection::ManageSubscriptions => "manage-subscriptions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminSection::ContactInfo => "Contact Info",
            AdminSection::VacancyForm => "Add Vacancy",
            AdminSection::BlogCategoryForm => "Add Blog Category",
            AdminSection::BlogPostForm => "Add Blog Post",
            AdminSection::ManageVacancies => "Manage Vacancies",
            AdminSection::ManageBlogCategories => "Manage Categories",
            AdminSection::ManageBlogPosts => "Manage Blog Posts",
            AdminSection::ManageApplications => "Manage Applications",
            AdminSection::ManageContactSubmissions => "Contact Inbox",
            AdminSection::ManageSubscriptions => "Email Subscribers",
        }
    }

    /// Sections that show a list fetched on activation.
    pub fn is_list(&self) -> bool {
        self.slug().starts_with("manage-")
    }
}

impl FromStr for AdminSection {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::ALL
            .iter()
            .copied()
            .find(|section| section.slug() == s)
            .unwrap_or(AdminSection::ContactInfo))
    }
}
