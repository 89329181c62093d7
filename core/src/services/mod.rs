//! Operations the views call. Each one validates locally, talks to the
//! backend, and applies the session rules to the outcome.

pub mod auth;
pub mod contact;
pub mod projects;

use tracing::warn;

use crate::api::MessageResponse;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// The bearer token of the current session.
pub(crate) fn require_token(store: &SessionStore) -> ClientResult<String> {
    store.token().ok_or(ClientError::NotAuthenticated)
}

/// A refused credential ends the session before the error reaches the caller.
pub(crate) fn expire_on_rejection<T>(store: &SessionStore, result: ClientResult<T>) -> ClientResult<T> {
    match result {
        Err(err) if err.is_credential_rejection() => {
            warn!("Credential rejected, clearing session: {}", err);
            if let Err(clear_err) = store.clear() {
                warn!("Failed to clear rejected session: {}", clear_err);
            }
            let message = match err {
                ClientError::Rejected { message, .. } => message,
                other => other.to_string(),
            };
            Err(ClientError::SessionExpired(message))
        }
        other => other,
    }
}

pub(crate) fn message_or(response: MessageResponse, fallback: &str) -> String {
    if response.message.trim().is_empty() {
        fallback.to_string()
    } else {
        response.message
    }
}
