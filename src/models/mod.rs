pub mod application;
pub mod blog;
pub mod contact;
pub mod subscription;
pub mod vacancy;

use serde::{Deserialize, Deserializer, Serialize};

/// A row an admin panel can address by its backend id.
pub trait Record {
    fn id(&self) -> &str;
}

/// Hosted file reference as stored by the backend (image CDN, resume store).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(default, alias = "publicId", skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    pub url: String,
}

/// Accepts either a JSON array of strings or a single comma separated string.
pub(crate) fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrText {
        List(Vec<String>),
        Text(String),
        Null(()),
    }

    Ok(match ListOrText::deserialize(deserializer)? {
        ListOrText::List(items) => items,
        ListOrText::Text(text) => split_list(&text),
        ListOrText::Null(()) => Vec::new(),
    })
}

/// Accepts either a list of paragraphs or one text blob split on blank lines.
pub(crate) fn deserialize_paragraphs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ParagraphsOrText {
        Paragraphs(Vec<String>),
        Text(String),
        Null(()),
    }

    Ok(match ParagraphsOrText::deserialize(deserializer)? {
        ParagraphsOrText::Paragraphs(items) => items,
        ParagraphsOrText::Text(text) => split_paragraphs(&text),
        ParagraphsOrText::Null(()) => Vec::new(),
    })
}

pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Tagged {
        #[serde(default, deserialize_with = "deserialize_string_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "deserialize_paragraphs")]
        content: Vec<String>,
    }

    #[test]
    fn lists_from_either_shape() {
        let a: Tagged =
            serde_json::from_str(r#"{"tags":["rust","hiring"],"content":["one","two"]}"#).unwrap();
        let b: Tagged =
            serde_json::from_str(r#"{"tags":"rust, hiring,","content":"one\n\ntwo"}"#).unwrap();
        assert_eq!(a.tags, b.tags);
        assert_eq!(a.content, b.content);

        let empty: Tagged = serde_json::from_str(r#"{"tags":null}"#).unwrap();
        assert!(empty.tags.is_empty());
        assert!(empty.content.is_empty());
    }
}
