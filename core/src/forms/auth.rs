use crate::api::types::{ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest};
use crate::error::{ValidationErrors, ValidationFailure};

fn require(failures: &mut Vec<ValidationFailure>, value: &str, field: &'static str) {
    if value.trim().is_empty() {
        failures.push(ValidationFailure::MissingField(field));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut failures = Vec::new();
        require(&mut failures, &self.email, "Email");
        require(&mut failures, &self.password, "Password");
        ValidationErrors(failures)
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut failures = Vec::new();
        require(&mut failures, &self.username, "Username");
        require(&mut failures, &self.email, "Email");
        require(&mut failures, &self.password, "Password");
        ValidationErrors(failures)
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut failures = Vec::new();
        require(&mut failures, &self.email, "Email");
        ValidationErrors(failures)
    }

    pub fn to_request(&self) -> ForgotPasswordRequest {
        ForgotPasswordRequest {
            email: self.email.trim().to_string(),
        }
    }
}

/// Reset form; `token` comes from the `?token=` query of the emailed link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub token: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut failures = Vec::new();
        if self.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            failures.push(ValidationFailure::MissingResetToken);
        }
        require(&mut failures, &self.password, "New password");
        require(&mut failures, &self.confirm_password, "Password confirmation");
        if !self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self.password != self.confirm_password
        {
            failures.push(ValidationFailure::PasswordMismatch);
        }
        ValidationErrors(failures)
    }

    pub fn to_request(&self) -> ResetPasswordRequest {
        ResetPasswordRequest {
            token: self.token.clone().unwrap_or_default(),
            new_password: self.password.clone(),
        }
    }
}
