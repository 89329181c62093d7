use crate::error::{ClientError, ValidationFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice notice-success",
            NoticeLevel::Info => "notice notice-info",
            NoticeLevel::Warning => "notice notice-warning",
            NoticeLevel::Error => "notice notice-error",
        }
    }
}

/// A transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Convert a failure into the notice shown for it.
    ///
    /// Server messages are surfaced verbatim; `fallback` is used when the
    /// server gave none.
    pub fn from_error(err: &ClientError, fallback: &str) -> Self {
        match err {
            ClientError::Validation(errors) => match errors.failures() {
                [dup @ ValidationFailure::DuplicateTag(_)] => Notice::warning(dup.to_string()),
                _ => Notice::error(errors.to_string()),
            },
            ClientError::Network(_) => Notice::error("Network error. Please try again later."),
            ClientError::Rejected { message, .. } => {
                if message.trim().is_empty() {
                    Notice::error(fallback)
                } else {
                    Notice::error(message.clone())
                }
            }
            ClientError::SessionExpired(message) => {
                if message.trim().is_empty() {
                    Notice::warning("Your session has expired. Please log in again.")
                } else {
                    Notice::warning(message.clone())
                }
            }
            ClientError::NotAuthenticated => Notice::warning("Please login first."),
            ClientError::Decode(_) | ClientError::Storage(_) | ClientError::Config(_) => {
                Notice::error(fallback)
            }
        }
    }
}
