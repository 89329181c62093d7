use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use url::Url;

use super::types::{
    AvatarResponse, ContactRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, MeResponse,
    MessageResponse, RegisterRequest, RemoteProject, ResetPasswordRequest, UserProfile,
};
use super::Backend;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::forms::project::{Attachment, ProjectDraft};

/// `reqwest`-backed client for the project API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut base = config.base_url()?;
        // `Url::join` treats the last segment as a file unless it ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ClientError::Config(format!("Invalid endpoint '{}': {}", path, e)))
    }

    /// `collection/<id>` with the id percent-encoded as one path segment.
    fn item_endpoint(&self, collection: &str, id: &str) -> ClientResult<Url> {
        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("Cannot extend '{}'", collection)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let body = self.fetch_text(request).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Like `fetch`, but an empty or unexpected success body is not an error.
    async fn fetch_message(&self, request: RequestBuilder) -> ClientResult<MessageResponse> {
        let body = self.fetch_text(request).await?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    async fn fetch_text(&self, request: RequestBuilder) -> ClientResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            warn!("API returned {}", status.as_u16());
            return Err(rejection_from_body(status.as_u16(), &body));
        }
        Ok(body)
    }
}

impl Backend for HttpBackend {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<MessageResponse> {
        let url = self.endpoint("api/auth/register")?;
        self.fetch_message(self.client.post(url).json(request)).await
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let url = self.endpoint("api/auth/login")?;
        self.fetch(self.client.post(url).json(request)).await
    }

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ClientResult<MessageResponse> {
        let url = self.endpoint("api/auth/forgot-password")?;
        self.fetch_message(self.client.post(url).json(request)).await
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> ClientResult<MessageResponse> {
        let url = self.endpoint("api/auth/reset-password")?;
        self.fetch_message(self.client.post(url).json(request)).await
    }

    async fn current_user(&self, token: &str) -> ClientResult<UserProfile> {
        let url = self.endpoint("api/auth/me")?;
        let me: MeResponse = self.fetch(self.client.get(url).bearer_auth(token)).await?;
        Ok(me.user)
    }

    async fn change_avatar(&self, token: &str, avatar: &Attachment) -> ClientResult<String> {
        let url = self.endpoint("api/auth/profileAvatar")?;
        let form = Form::new().part("avatar", attachment_part(avatar));
        let response: AvatarResponse = self
            .fetch(self.client.put(url).bearer_auth(token).multipart(form))
            .await?;
        Ok(response.avatar)
    }

    async fn list_projects(&self) -> ClientResult<Vec<RemoteProject>> {
        let url = self.endpoint("api/projects/all")?;
        let projects: Vec<RemoteProject> = self.fetch(self.client.get(url)).await?;
        info!("Fetched {} projects", projects.len());
        Ok(projects)
    }

    async fn get_project(&self, token: &str, id: &str) -> ClientResult<RemoteProject> {
        let url = self.item_endpoint("api/projects", id)?;
        self.fetch(self.client.get(url).bearer_auth(token)).await
    }

    async fn upload_project(&self, token: &str, draft: &ProjectDraft) -> ClientResult<MessageResponse> {
        let url = self.endpoint("api/projects/upload")?;
        let form = project_form(draft);
        self.fetch_message(self.client.post(url).bearer_auth(token).multipart(form))
            .await
    }

    async fn update_project(
        &self,
        token: &str,
        id: &str,
        draft: &ProjectDraft,
    ) -> ClientResult<MessageResponse> {
        let url = self.item_endpoint("api/projects", id)?;
        let form = project_form(draft);
        self.fetch_message(self.client.put(url).bearer_auth(token).multipart(form))
            .await
    }

    async fn delete_project(&self, token: &str, id: &str) -> ClientResult<MessageResponse> {
        let url = self.item_endpoint("api/projects", id)?;
        self.fetch_message(self.client.delete(url).bearer_auth(token))
            .await
    }

    async fn send_contact(&self, request: &ContactRequest) -> ClientResult<MessageResponse> {
        let url = self.endpoint("api/contact")?;
        self.fetch_message(self.client.post(url).json(request)).await
    }
}

/// Turn an error reply into `Rejected`, keeping the server's message when it sent one.
pub fn rejection_from_body(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<MessageResponse>(body)
        .map(|m| m.message)
        .unwrap_or_default();
    ClientError::Rejected { status, message }
}

/// Multipart body shared by upload and update. File parts are only sent when present.
fn project_form(draft: &ProjectDraft) -> Form {
    let mut form = Form::new()
        .text("name", draft.name.trim().to_string())
        .text("status", draft.status.clone())
        .text("category", draft.category.clone())
        .text("tags", draft.tags.joined())
        .text("description", draft.description.clone());
    for (field, attachment) in draft.attachments() {
        form = form.part(field, attachment_part(attachment));
    }
    form
}

fn attachment_part(attachment: &Attachment) -> Part {
    let part = || Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());
    if attachment.mime_type.is_empty() {
        return part();
    }
    part().mime_str(&attachment.mime_type).unwrap_or_else(|e| {
        warn!("Ignoring invalid mime type '{}': {}", attachment.mime_type, e);
        part()
    })
}
