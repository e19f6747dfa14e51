use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

pub const INVALID_FORM_MESSAGE: &str = "Please correct the errors in the form.";

pub fn validate<T: Validate>(val: &T) -> Result<(), ValidationErrors> {
    val.validate()
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

fn strict_email_regex() -> &'static Regex {
    static STRICT_EMAIL: OnceLock<Regex> = OnceLock::new();
    STRICT_EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("strict email pattern compiles")
    })
}

/// One `@`, no whitespace, and a dot in the domain.
pub fn is_strict_email(value: &str) -> bool {
    strict_email_regex().is_match(value.trim())
}

/// 7 to 15 ASCII digits, nothing else once surrounding whitespace is trimmed.
pub fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    (7..=15).contains(&trimmed.len()) && trimmed.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_email_shape(value: &str) -> Result<(), ValidationError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

pub fn validate_strict_email_shape(value: &str) -> Result<(), ValidationError> {
    if is_strict_email(value) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

pub fn validate_phone_digits(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

pub fn validate_name_length(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() >= 2 {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}

pub fn validate_message_length(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() >= 10 {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}

/// Per-field error flags of a form, keyed by the form's field names.
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.insert(field, message);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let message = errs
                .iter()
                .find_map(|e| e.message.clone())
                .map(Cow::into_owned)
                .unwrap_or_else(|| format!("{} is invalid", field));
            out.insert(field.to_string(), message);
        }
        out
    }
}

/// Runs the derived rules and folds them into field flags.
pub fn check<T: Validate>(val: &T) -> FieldErrors {
    match validate(val) {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}
