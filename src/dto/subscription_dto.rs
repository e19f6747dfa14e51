use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_email_shape;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SubscribeForm {
    #[validate(custom(
        function = "validate_email_shape",
        message = "Please enter a valid email address."
    ))]
    pub email: String,
}
