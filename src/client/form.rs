//! Login and registration forms.
//!
//! `validate` applies the same email and password rules as the server so
//! obviously bad input never leaves the machine.

use crate::client::error::ClientError;
use crate::shared::types::{LoginRequest, RegisterRequest, Role};
use crate::shared::validation::{validate_email, validate_password, MIN_PASSWORD_LEN};

fn check_credentials(email: &str, password: &str) -> Result<(), ClientError> {
    if !validate_email(email) {
        return Err(ClientError::validation("email", "Please enter a valid email address"));
    }
    if !validate_password(password) {
        return Err(ClientError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Trim the email, check both fields and build the request body
    pub fn validate(&self) -> Result<LoginRequest, ClientError> {
        let email = self.email.trim();
        check_credentials(email, &self.password)?;

        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub student_id: String,
    /// Only honoured by servers that allow role selection
    pub role: Option<Role>,
}

impl RegisterForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = student_id.into();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn validate(&self) -> Result<RegisterRequest, ClientError> {
        let email = self.email.trim();
        check_credentials(email, &self.password)?;

        Ok(RegisterRequest {
            email: email.to_string(),
            password: self.password.clone(),
            name: self.name.trim().to_string(),
            student_id: self.student_id.trim().to_string(),
            role: self.role.map(|role| role.to_string()),
        })
    }
}
