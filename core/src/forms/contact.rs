use crate::api::types::ContactRequest;
use crate::error::{ValidationErrors, ValidationFailure};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut failures = Vec::new();
        for (value, field) in [
            (&self.name, "Name"),
            (&self.email, "Email"),
            (&self.message, "Message"),
        ] {
            if value.trim().is_empty() {
                failures.push(ValidationFailure::MissingField(field));
            }
        }
        ValidationErrors(failures)
    }

    pub fn to_request(&self) -> ContactRequest {
        ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}
