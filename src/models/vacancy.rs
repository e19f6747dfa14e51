use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_string_list, MediaRef, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub job_type: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<MediaRef>,
    #[serde(default)]
    pub posted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub applicants: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Vacancy {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Distinct values the backend offers for the public vacancy filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub job_types: Vec<String>,
}

pub const ALL_CATEGORIES: &str = "All Categories";
pub const ALL_LOCATIONS: &str = "All Locations";
pub const ALL_TYPES: &str = "All Types";

impl FilterOptions {
    /// Options as the public filter dropdowns show them, sentinel first.
    pub fn with_sentinels(&self) -> FilterOptions {
        fn prefixed(sentinel: &str, values: &[String]) -> Vec<String> {
            std::iter::once(sentinel.to_string())
                .chain(values.iter().filter(|v| v.as_str() != sentinel).cloned())
                .collect()
        }
        FilterOptions {
            categories: prefixed(ALL_CATEGORIES, &self.categories),
            locations: prefixed(ALL_LOCATIONS, &self.locations),
            job_types: prefixed(ALL_TYPES, &self.job_types),
        }
    }

    /// Options as the admin vacancy form uses them, sentinels dropped.
    pub fn without_sentinels(&self) -> FilterOptions {
        FilterOptions {
            categories: self
                .categories
                .iter()
                .filter(|c| c.as_str() != ALL_CATEGORIES)
                .cloned()
                .collect(),
            locations: self
                .locations
                .iter()
                .filter(|l| l.as_str() != ALL_LOCATIONS)
                .cloned()
                .collect(),
            job_types: self
                .job_types
                .iter()
                .filter(|t| t.as_str() != ALL_TYPES)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacancy_from_backend_json() {
        let raw = r#"{
            "_id": "665f1c",
            "title": "Backend Engineer",
            "company": "Acme",
            "location": "Pune",
            "type": "Full-time",
            "salary": "12 LPA",
            "category": "IT",
            "description": "Build services",
            "skills": "Rust, SQL",
            "logo": {"public_id": "logos/acme", "url": "https://cdn/acme.png"},
            "postedDate": "2025-05-01T10:00:00Z"
        }"#;
        let vacancy: Vacancy = serde_json::from_str(raw).unwrap();
        assert_eq!(vacancy.id(), "665f1c");
        assert_eq!(vacancy.job_type, "Full-time");
        assert_eq!(vacancy.skills, vec!["Rust", "SQL"]);
        assert_eq!(vacancy.logo.unwrap().url, "https://cdn/acme.png");
    }

    #[test]
    fn sentinels_are_added_once_and_removed() {
        let options = FilterOptions {
            categories: vec!["All Categories".into(), "IT".into()],
            locations: vec!["Pune".into()],
            job_types: vec!["Full-time".into()],
        };
        let shown = options.with_sentinels();
        assert_eq!(shown.categories, vec!["All Categories", "IT"]);
        assert_eq!(shown.locations, vec!["All Locations", "Pune"]);
        assert_eq!(shown.without_sentinels().job_types, vec!["Full-time"]);
    }
}
