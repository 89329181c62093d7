use tracing::info;

use super::{expire_on_rejection, message_or, require_token};
use crate::api::{Backend, RemoteProject};
use crate::catalog::{Catalog, ProjectSummary};
use crate::error::ClientResult;
use crate::forms::{validate_draft, FormMode, ProjectDraft};
use crate::session::SessionStore;

/// Submit a new project. Nothing is sent unless the draft is valid.
pub async fn upload<B: Backend>(
    backend: &B,
    store: &SessionStore,
    draft: &ProjectDraft,
) -> ClientResult<String> {
    let token = require_token(store)?;
    validate_draft(draft, FormMode::Create).into_result()?;
    let response = expire_on_rejection(store, backend.upload_project(&token, draft).await)?;
    info!("Uploaded project {}", draft.name.trim());
    Ok(message_or(response, "Project uploaded successfully!"))
}

pub async fn update<B: Backend>(
    backend: &B,
    store: &SessionStore,
    id: &str,
    draft: &ProjectDraft,
) -> ClientResult<String> {
    let token = require_token(store)?;
    validate_draft(draft, FormMode::Update).into_result()?;
    let response = expire_on_rejection(store, backend.update_project(&token, id, draft).await)?;
    info!("Updated project {}", id);
    Ok(message_or(response, "Project updated successfully!"))
}

pub async fn get<B: Backend>(backend: &B, store: &SessionStore, id: &str) -> ClientResult<RemoteProject> {
    let token = require_token(store)?;
    expire_on_rejection(store, backend.get_project(&token, id).await)
}

pub async fn delete<B: Backend>(backend: &B, store: &SessionStore, id: &str) -> ClientResult<String> {
    let token = require_token(store)?;
    let response = expire_on_rejection(store, backend.delete_project(&token, id).await)?;
    info!("Deleted project {}", id);
    Ok(message_or(response, "Project deleted successfully!"))
}

/// Projects in `catalog` created by the logged-in user.
pub async fn my_projects<B: Backend>(
    backend: &B,
    store: &SessionStore,
    catalog: &Catalog,
) -> ClientResult<Vec<ProjectSummary>> {
    let profile = super::auth::current_user(backend, store).await?;
    Ok(catalog.owned_by(&profile.id))
}
