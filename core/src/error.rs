use std::fmt;

use thiserror::Error;

/// A single named reason a form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Please attach a project {0}")]
    MissingAttachment(&'static str),

    #[error("{slot} must be less than {limit_mb}MB")]
    AttachmentTooLarge {
        slot: &'static str,
        size: u64,
        limit_mb: u64,
    },

    #[error("Tag already exists: {0}")]
    DuplicateTag(String),

    #[error("Tag cannot be empty")]
    EmptyTag,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Reset link is missing its token")]
    MissingResetToken,
}

/// Every failure found by one validation pass, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<ValidationFailure>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.0
    }

    pub fn contains(&self, failure: &ValidationFailure) -> bool {
        self.0.contains(failure)
    }

    /// Ok when nothing failed, otherwise the collected failures as an error.
    pub fn into_result(self) -> Result<(), ClientError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The request never produced a server response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with an error payload.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// An authenticated call was refused because the credential is no longer valid.
    #[error("{0}")]
    SessionExpired(String),

    #[error("Please log in first")]
    NotAuthenticated,

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ClientError {
    /// True for a server response that refuses the bearer credential.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected { status: 401, .. })
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation(errors)
    }
}

impl From<ClientError> for String {
    fn from(err: ClientError) -> Self {
        err.to_string()
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
