use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{
    validate_email_shape, validate_message_length, validate_name_length, validate_phone_digits,
};

/// Dial codes offered next to the phone input; the first one is preselected.
pub const COUNTRY_CODES: [(&str, &str); 4] = [
    ("+91", "India"),
    ("+1", "USA"),
    ("+44", "UK"),
    ("+61", "Australia"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(rename = "yourName")]
    #[validate(custom(
        function = "validate_name_length",
        message = "Please enter your name (at least 2 characters)."
    ))]
    pub name: String,

    #[serde(rename = "yourEmail")]
    #[validate(custom(
        function = "validate_email_shape",
        message = "Please enter a valid email address."
    ))]
    pub email: String,

    #[validate(custom(
        function = "validate_phone_digits",
        message = "Phone number must be 7 to 15 digits."
    ))]
    pub phone: String,

    #[serde(rename = "yourMessage")]
    #[validate(custom(
        function = "validate_message_length",
        message = "Message must be at least 10 characters."
    ))]
    pub message: String,

    pub country_code: String,
    pub country_name: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        let (code, name) = COUNTRY_CODES[0];
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            country_code: code.to_string(),
            country_name: name.to_string(),
        }
    }
}

impl ContactForm {
    pub fn select_country(&mut self, code: &str) -> bool {
        match COUNTRY_CODES.iter().find(|(c, _)| *c == code) {
            Some((c, n)) => {
                self.country_code = c.to_string();
                self.country_name = n.to_string();
                true
            }
            None => false,
        }
    }

    pub fn full_phone_number(&self) -> String {
        format!("{}{}", self.country_code, self.phone.trim())
    }

    pub fn to_payload(&self) -> ContactSubmissionPayload {
        ContactSubmissionPayload {
            your_name: self.name.trim().to_string(),
            your_email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            your_message: self.message.trim().to_string(),
            full_phone_number: self.full_phone_number(),
            country_code: self.country_code.clone(),
            country_name: self.country_name.clone(),
        }
    }
}

/// Body of `POST /contact-us`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionPayload {
    pub your_name: String,
    pub your_email: String,
    pub phone: String,
    pub your_message: String,
    pub full_phone_number: String,
    pub country_code: String,
    pub country_name: String,
}
