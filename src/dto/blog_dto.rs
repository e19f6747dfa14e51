use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::vacancy_dto::push_filter;
use crate::models::blog::{BlogCategory, BlogPost, ALL_CATEGORIES_SLUG};
use crate::services::api_client::MultipartBody;
use crate::utils::upload::{validate_upload, UploadFile, FEATURED_IMAGE_RULES};
use crate::utils::validation::{check, validate_not_blank, FieldErrors};

pub const DEFAULT_READ_TIME: &str = "5 min read";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct BlogCategoryForm {
    #[serde(skip)]
    pub editing: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Category name is required."))]
    pub name: String,

    pub description: String,
}

impl BlogCategoryForm {
    pub fn from_category(category: &BlogCategory) -> Self {
        Self {
            editing: Some(category.id.clone()),
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BlogPostForm {
    pub editing: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Title is required."))]
    pub title: String,
    #[validate(custom(function = "validate_not_blank", message = "Excerpt is required."))]
    pub excerpt: String,
    /// Paragraphs separated by blank lines.
    #[validate(custom(function = "validate_not_blank", message = "Content is required."))]
    pub content: String,
    #[validate(custom(function = "validate_not_blank", message = "Author is required."))]
    pub author: String,
    pub read_time: String,
    #[validate(custom(function = "validate_not_blank", message = "Category is required."))]
    pub category_id: String,
    /// Comma separated.
    pub tags: String,
    pub is_published: bool,

    pub featured_image: Option<UploadFile>,
    pub existing_image_url: Option<String>,
    pub remove_featured_image: bool,
}

impl Default for BlogPostForm {
    fn default() -> Self {
        Self {
            editing: None,
            title: String::new(),
            excerpt: String::new(),
            content: String::new(),
            author: String::new(),
            read_time: DEFAULT_READ_TIME.to_string(),
            category_id: String::new(),
            tags: String::new(),
            is_published: false,
            featured_image: None,
            existing_image_url: None,
            remove_featured_image: false,
        }
    }
}

impl BlogPostForm {
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            editing: Some(post.id.clone()),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.join("\n\n"),
            author: post.author.clone(),
            read_time: post.read_time.clone(),
            category_id: post
                .category
                .as_ref()
                .map(|c| c.id().to_string())
                .unwrap_or_default(),
            tags: post.tags.join(", "),
            is_published: post.is_published,
            featured_image: None,
            existing_image_url: post.featured_image.as_ref().map(|i| i.url.clone()),
            remove_featured_image: false,
        }
    }

    /// Preselects the first category on an empty form.
    pub fn apply_default_category(&mut self, categories: &[BlogCategory]) {
        if self.category_id.is_empty() {
            if let Some(first) = categories.first() {
                self.category_id = first.id.clone();
            }
        }
    }

    pub fn attach_image(&mut self, file: UploadFile) -> Result<(), String> {
        validate_upload(&file, &FEATURED_IMAGE_RULES)?;
        self.featured_image = Some(file);
        self.remove_featured_image = false;
        Ok(())
    }

    pub fn remove_image(&mut self) {
        self.featured_image = None;
        if self.editing.is_some() {
            self.remove_featured_image = true;
            self.existing_image_url = None;
        }
    }

    pub fn check_fields(&self) -> FieldErrors {
        let mut errors = check(self);
        if let Some(image) = &self.featured_image {
            if let Err(message) = validate_upload(image, &FEATURED_IMAGE_RULES) {
                errors.insert("featured_image", message);
            }
        }
        errors
    }

    pub fn to_multipart(&self) -> MultipartBody {
        let read_time = if self.read_time.trim().is_empty() {
            DEFAULT_READ_TIME
        } else {
            self.read_time.trim()
        };
        let mut body = MultipartBody::new()
            .text("title", self.title.trim())
            .text("excerpt", self.excerpt.trim())
            .text("content", &self.content)
            .text("author", self.author.trim())
            .text("readTime", read_time)
            .text("categoryId", &self.category_id)
            .text("tags", &self.tags)
            .text("isPublished", if self.is_published { "true" } else { "false" });
        if self.remove_featured_image {
            body = body.text("removeFeaturedImage", "true");
        }
        if let Some(image) = &self.featured_image {
            body = body.file("featuredImageFile", image.clone());
        }
        body
    }
}

/// Public blog filters; `all-categories` means no category filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogSearch {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl BlogSearch {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push_filter(&mut query, "search", self.search.as_deref(), "");
        push_filter(&mut query, "category", self.category.as_deref(), ALL_CATEGORIES_SLUG);
        query
    }
}
