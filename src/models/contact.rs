use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactStatus {
    New,
    Viewed,
    Replied,
    Archived,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::New,
        ContactStatus::Viewed,
        ContactStatus::Replied,
        ContactStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "New",
            ContactStatus::Viewed => "Viewed",
            ContactStatus::Replied => "Replied",
            ContactStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown contact status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(rename = "_id")]
    pub id: String,
    pub your_name: String,
    pub your_email: String,
    #[serde(default)]
    pub full_phone_number: String,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    pub your_message: String,
    pub status: ContactStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replied_at: Option<DateTime<Utc>>,
}

impl Record for ContactSubmission {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Agency address block; a single record edited from the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location_map_url: String,
}

pub const NOT_AVAILABLE: &str = "Not Available";

impl ContactInfo {
    /// What the public contact section shows when the record can't be loaded.
    pub fn unavailable() -> Self {
        Self {
            id: None,
            address: NOT_AVAILABLE.to_string(),
            phone: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
            location_map_url: String::new(),
        }
    }

    /// `tel:` target with everything but digits and `+` stripped.
    pub fn phone_link(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{}", digits)
    }
}
