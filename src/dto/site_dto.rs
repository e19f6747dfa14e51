use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::vacancy::Vacancy;
use crate::services::notification_service::{Notification, NotificationLevel};
use crate::utils::time::format_posted;
use crate::utils::validation::FieldErrors;

/// What the gateway answers for a form post: the toast the user would see
/// plus the field flags of a rejected form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl FormResponse {
    pub fn from_notification(notification: &Notification, errors: Option<FieldErrors>) -> Self {
        Self {
            success: notification.level == NotificationLevel::Success,
            message: notification.message.clone(),
            errors: errors.filter(|e| !e.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyCard {
    #[serde(flatten)]
    pub vacancy: Vacancy,
    pub posted: String,
}

impl VacancyCard {
    pub fn new(vacancy: Vacancy, now: DateTime<Utc>) -> Self {
        let posted = format_posted(vacancy.posted_date.or(vacancy.created_at), now);
        Self { vacancy, posted }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VacancyListResponse {
    pub jobs: Vec<VacancyCard>,
}
