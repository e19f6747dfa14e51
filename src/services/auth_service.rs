use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::dto::admin_dto::{AdminLoginForm, LoginResponse};
use crate::error::{Error, Result};
use crate::utils::crypto::verify_password;
use crate::utils::validation::check;

pub const DASHBOARD_ROUTE: &str = "/admin/dashboard";
pub const INVALID_CREDENTIALS: &str = "Invalid admin credentials. Please try again.";

/// Checks the dashboard credentials. Nothing is issued on success; the
/// caller only learns where to go next.
#[derive(Debug, Clone)]
pub struct AdminAuthService {
    email: String,
    password_hash: String,
}

impl AdminAuthService {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn login(&self, form: &AdminLoginForm) -> Result<LoginResponse> {
        let errors = check(form);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        let submitted = form.email.trim().to_ascii_lowercase();
        let expected = self.email.trim().to_ascii_lowercase();
        let email_ok: bool = submitted.as_bytes().ct_eq(expected.as_bytes()).into();

        // Always run the hash check so timing does not reveal the email.
        let password_ok = verify_password(&form.password, &self.password_hash).map_err(|e| {
            Error::Config(format!("ADMIN_PASSWORD_HASH is not a valid PHC string: {}", e))
        })?;

        if email_ok && password_ok {
            info!("Admin signed in");
            Ok(LoginResponse {
                success: true,
                message: "Login successful!".to_string(),
                redirect: Some(DASHBOARD_ROUTE.to_string()),
            })
        } else {
            warn!("Rejected admin sign-in attempt");
            Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()))
        }
    }
}
