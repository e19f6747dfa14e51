use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::application::Application;
use crate::models::contact::{ContactInfo, ContactSubmission};
use crate::utils::validation::{validate_email_shape, validate_not_blank};

const SIGNATURE: &str = "Sincerely,\nThe Silver Talent Team";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoForm {
    #[validate(custom(function = "validate_not_blank", message = "Address is required."))]
    pub address: String,
    #[validate(custom(function = "validate_not_blank", message = "Phone is required."))]
    pub phone: String,
    #[validate(custom(function = "validate_email_shape", message = "Invalid email format."))]
    pub email: String,
    pub location_map_url: String,
}

impl From<&ContactInfo> for ContactInfoForm {
    fn from(info: &ContactInfo) -> Self {
        Self {
            address: info.address.clone(),
            phone: info.phone.clone(),
            email: info.email.clone(),
            location_map_url: info.location_map_url.clone(),
        }
    }
}

/// Admin reply mailed to an applicant or a contact-form sender.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ResponseForm {
    #[validate(custom(function = "validate_not_blank", message = "Subject is required."))]
    pub subject: String,
    #[validate(custom(function = "validate_not_blank", message = "Response body is required."))]
    pub body: String,
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

impl ResponseForm {
    pub fn for_application(application: &Application) -> Self {
        let job_title = or_default(&application.job_title, "the position");
        Self {
            subject: format!("Regarding your application for {}", job_title),
            body: format!(
                "Dear {},\n\nThank you for your interest in the {} at {}.\n\n[Your message here - please replace this bracketed text]\n\n{}",
                or_default(&application.name, "Applicant"),
                or_default(&application.job_title, "position"),
                or_default(&application.company_name, "our company"),
                SIGNATURE,
            ),
        }
    }

    pub fn for_contact(submission: &ContactSubmission) -> Self {
        let id_chars: Vec<char> = submission.id.chars().collect();
        let reference: String = id_chars[id_chars.len().saturating_sub(6)..].iter().collect();

        let quoted: String = submission.your_message.chars().take(100).collect();
        let ellipsis = if submission.your_message.chars().count() > 100 {
            "..."
        } else {
            ""
        };

        Self {
            subject: format!("Re: Your message to Silver Talent (Ref: {})", reference),
            body: format!(
                "Dear {},\n\nThank you for contacting us. Regarding your message:\n\n\"{}{}\"\n\n[Your response here]\n\n{}",
                submission.your_name, quoted, ellipsis, SIGNATURE,
            ),
        }
    }
}

/// Body of the status endpoints; notes are only sent when edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdatePayload {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct AdminLoginForm {
    #[validate(custom(function = "validate_not_blank", message = "Email is required."))]
    pub email: String,
    #[validate(custom(function = "validate_not_blank", message = "Password is required."))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}
