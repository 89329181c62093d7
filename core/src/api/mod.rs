//! Boundary to the remote project API.
//!
//! `Backend` is the seam the services are written against; `HttpBackend` is
//! the production implementation. Authenticated calls take the bearer token
//! explicitly so the session store stays the only holder of it.

pub mod http;
pub mod types;

use crate::error::ClientResult;
use crate::forms::project::{Attachment, ProjectDraft};

pub use http::HttpBackend;
pub use types::{
    ContactRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, RemoteProject, ResetPasswordRequest, UserProfile,
};

#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<MessageResponse>;

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ClientResult<MessageResponse>;

    async fn reset_password(&self, request: &ResetPasswordRequest) -> ClientResult<MessageResponse>;

    async fn current_user(&self, token: &str) -> ClientResult<UserProfile>;

    /// Returns the URL of the stored avatar.
    async fn change_avatar(&self, token: &str, avatar: &Attachment) -> ClientResult<String>;

    async fn list_projects(&self) -> ClientResult<Vec<RemoteProject>>;

    async fn get_project(&self, token: &str, id: &str) -> ClientResult<RemoteProject>;

    async fn upload_project(&self, token: &str, draft: &ProjectDraft) -> ClientResult<MessageResponse>;

    async fn update_project(
        &self,
        token: &str,
        id: &str,
        draft: &ProjectDraft,
    ) -> ClientResult<MessageResponse>;

    async fn delete_project(&self, token: &str, id: &str) -> ClientResult<MessageResponse>;

    async fn send_contact(&self, request: &ContactRequest) -> ClientResult<MessageResponse>;
}
