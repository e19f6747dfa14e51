use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vacancy::{FilterOptions, Vacancy, ALL_CATEGORIES, ALL_LOCATIONS, ALL_TYPES};
use crate::services::api_client::MultipartBody;
use crate::utils::upload::{validate_upload, UploadFile, LOGO_RULES};
use crate::utils::validation::{check, validate_not_blank, FieldErrors};

/// Admin create/edit form for a vacancy. `editing` holds the id of the
/// record being edited; `None` means the form creates a new one.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct VacancyForm {
    pub editing: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Title is required."))]
    pub title: String,
    #[validate(custom(function = "validate_not_blank", message = "Company is required."))]
    pub company: String,
    #[validate(custom(function = "validate_not_blank", message = "Location is required."))]
    pub location: String,
    #[validate(custom(function = "validate_not_blank", message = "Job type is required."))]
    pub job_type: String,
    pub salary: String,
    #[validate(custom(function = "validate_not_blank", message = "Category is required."))]
    pub category: String,
    #[validate(custom(function = "validate_not_blank", message = "Description is required."))]
    pub description: String,
    /// Comma separated.
    pub skills: String,

    pub logo: Option<UploadFile>,
    pub existing_logo_url: Option<String>,
    pub remove_logo: bool,
}

impl VacancyForm {
    pub fn from_vacancy(vacancy: &Vacancy) -> Self {
        Self {
            editing: Some(vacancy.id.clone()),
            title: vacancy.title.clone(),
            company: vacancy.company.clone(),
            location: vacancy.location.clone(),
            job_type: vacancy.job_type.clone(),
            salary: vacancy.salary.clone(),
            category: vacancy.category.clone(),
            description: vacancy.description.clone(),
            skills: vacancy.skills.join(", "),
            logo: None,
            existing_logo_url: vacancy.logo.as_ref().map(|l| l.url.clone()),
            remove_logo: false,
        }
    }

    /// Preselects the first offered category and type on an empty form.
    pub fn apply_defaults(&mut self, options: &FilterOptions) {
        let options = options.without_sentinels();
        if self.category.is_empty() {
            if let Some(first) = options.categories.first() {
                self.category = first.clone();
            }
        }
        if self.job_type.is_empty() {
            if let Some(first) = options.job_types.first() {
                self.job_type = first.clone();
            }
        }
    }

    pub fn attach_logo(&mut self, file: UploadFile) -> Result<(), String> {
        validate_upload(&file, &LOGO_RULES)?;
        self.logo = Some(file);
        self.remove_logo = false;
        Ok(())
    }

    pub fn remove_logo(&mut self) {
        self.logo = None;
        if self.editing.is_some() {
            self.remove_logo = true;
            self.existing_logo_url = None;
        }
    }

    pub fn check_fields(&self) -> FieldErrors {
        let mut errors = check(self);
        if let Some(logo) = &self.logo {
            if let Err(message) = validate_upload(logo, &LOGO_RULES) {
                errors.insert("logo", message);
            }
        }
        errors
    }

    pub fn to_multipart(&self) -> MultipartBody {
        let mut body = MultipartBody::new()
            .text("title", self.title.trim())
            .text("company", self.company.trim())
            .text("location", self.location.trim())
            .text("type", &self.job_type)
            .text("salary", self.salary.trim())
            .text("category", &self.category)
            .text("description", &self.description)
            .text("skills", &self.skills);
        if self.remove_logo {
            body = body.text("removeLogo", "true");
        }
        if let Some(logo) = &self.logo {
            body = body.file("logoImage", logo.clone());
        }
        body
    }
}

/// Public vacancy filters; the "All ..." sentinels mean no filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VacancySearch {
    pub q: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}

impl VacancySearch {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push_filter(&mut query, "q", self.q.as_deref(), "");
        push_filter(&mut query, "category", self.category.as_deref(), ALL_CATEGORIES);
        push_filter(&mut query, "location", self.location.as_deref(), ALL_LOCATIONS);
        push_filter(&mut query, "type", self.job_type.as_deref(), ALL_TYPES);
        query
    }
}

pub(crate) fn push_filter(
    query: &mut Vec<(String, String)>,
    key: &str,
    value: Option<&str>,
    sentinel: &str,
) {
    if let Some(value) = value.map(str::trim) {
        if !value.is_empty() && value != sentinel {
            query.push((key.to_string(), value.to_string()));
        }
    }
}
