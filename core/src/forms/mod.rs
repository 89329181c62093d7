//! Form state and the validation rules checked before anything is sent.

pub mod auth;
pub mod contact;
pub mod project;

pub use auth::{ForgotPasswordForm, LoginForm, ResetPasswordForm, SignupForm};
pub use contact::ContactForm;
pub use project::{
    check_attachment, check_size, validate_draft, Attachment, AttachmentSlot, FormMode,
    ProjectDraft, TagList,
};
