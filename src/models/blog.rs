use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_paragraphs, deserialize_string_list, MediaRef, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for BlogCategory {
    fn id(&self) -> &str {
        &self.id
    }
}

pub const ALL_CATEGORIES_SLUG: &str = "all-categories";

/// A post's category: populated by the public listing, a bare id elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Populated {
        #[serde(rename = "_id")]
        id: String,
        name: String,
        #[serde(default)]
        slug: String,
    },
    Id(String),
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Populated { id, .. } => id,
            CategoryRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Populated { name, .. } => Some(name),
            CategoryRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, deserialize_with = "deserialize_paragraphs")]
    pub content: Vec<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub read_time: String,
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<MediaRef>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }
}
