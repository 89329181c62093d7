use tracing::info;

use super::{expire_on_rejection, message_or, require_token};
use crate::api::{Backend, UserProfile};
use crate::error::{ClientError, ClientResult, ValidationErrors};
use crate::forms::{
    check_attachment, Attachment, AttachmentSlot, ForgotPasswordForm, LoginForm, ResetPasswordForm,
    SignupForm,
};
use crate::session::{CommitOutcome, LoginGrant, SessionStore};

pub async fn register<B: Backend>(backend: &B, form: &SignupForm) -> ClientResult<String> {
    form.validate().into_result()?;
    let response = backend.register(&form.to_request()).await?;
    info!("Registered {}", form.username.trim());
    Ok(message_or(response, "Registration successful. Please log in."))
}

/// Log in and commit the session, unless a newer session request overtook
/// this one while it was in flight.
pub async fn login<B: Backend>(
    backend: &B,
    store: &SessionStore,
    form: &LoginForm,
) -> ClientResult<CommitOutcome> {
    form.validate().into_result()?;
    let ticket = store.begin_request();
    let response = backend.login(&form.to_request()).await?;
    store.commit_login(
        ticket,
        LoginGrant {
            token: response.token,
            username: response.user.username,
            avatar_url: response.user.avatar,
        },
    )
}

pub fn logout(store: &SessionStore) -> ClientResult<()> {
    store.clear()
}

pub async fn forgot_password<B: Backend>(backend: &B, form: &ForgotPasswordForm) -> ClientResult<String> {
    form.validate().into_result()?;
    let response = backend.forgot_password(&form.to_request()).await?;
    Ok(message_or(response, "Password reset link sent to your email."))
}

pub async fn reset_password<B: Backend>(backend: &B, form: &ResetPasswordForm) -> ClientResult<String> {
    form.validate().into_result()?;
    let response = backend.reset_password(&form.to_request()).await?;
    Ok(message_or(response, "Password has been reset. Please log in."))
}

pub async fn current_user<B: Backend>(backend: &B, store: &SessionStore) -> ClientResult<UserProfile> {
    let token = require_token(store)?;
    expire_on_rejection(store, backend.current_user(&token).await)
}

/// Upload a new avatar. Only a successful upload touches the session, and
/// then only its avatar.
pub async fn change_avatar<B: Backend>(
    backend: &B,
    store: &SessionStore,
    avatar: &Attachment,
) -> ClientResult<CommitOutcome> {
    let token = require_token(store)?;
    check_attachment(AttachmentSlot::Image, avatar)
        .map_err(|failure| ClientError::Validation(ValidationErrors(vec![failure])))?;

    let ticket = store.begin_request();
    let avatar_url = expire_on_rejection(store, backend.change_avatar(&token, avatar).await)?;
    store.commit_avatar(ticket, &avatar_url)
}
