//! Login and registration form checks.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::ValidationErrors;
use crate::net::types::{LoginRequest, RegisterRequest};

pub const MISSING_CREDENTIALS: &str = "Please enter email and password";
pub const MISSING_REGISTRATION: &str = "Please enter name, email and password";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Trim the email and require both fields.
    ///
    /// # Errors
    ///
    /// Returns a single form-level message when either field is empty.
    pub fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let email = self.email.trim();
        let mut errors = ValidationErrors::new();
        if email.is_empty() || self.password.is_empty() {
            errors.add("form", MISSING_CREDENTIALS);
        }
        errors.into_result(LoginRequest { email: email.to_owned(), password: self.password.clone() })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// Trim name and email and require all three fields.
    ///
    /// # Errors
    ///
    /// Returns a single form-level message when any field is empty.
    pub fn validate(&self) -> Result<RegisterRequest, ValidationErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        let mut errors = ValidationErrors::new();
        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            errors.add("form", MISSING_REGISTRATION);
        }
        errors.into_result(RegisterRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: self.password.clone(),
        })
    }
}
