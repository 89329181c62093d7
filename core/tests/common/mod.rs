#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use filefolio_core::api::types::{LoginUser, MessageResponse};
use filefolio_core::api::{
    Backend, ContactRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
    RemoteProject, ResetPasswordRequest, UserProfile,
};
use filefolio_core::config::DEFAULT_FALLBACK_AVATARS;
use filefolio_core::forms::{Attachment, ProjectDraft};
use filefolio_core::{ClientError, ClientResult, MemoryStorage, SessionStore};
use tracing_subscriber::EnvFilter;

/// Canned replies for one endpoint, handed out in order.
pub struct Script<T> {
    replies: RefCell<VecDeque<(usize, ClientResult<T>)>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            replies: RefCell::new(VecDeque::new()),
        }
    }
}

impl<T> Script<T> {
    pub fn push(&self, reply: ClientResult<T>) {
        self.push_delayed(0, reply);
    }

    /// Reply only after yielding to the executor `yields` times.
    pub fn push_delayed(&self, yields: usize, reply: ClientResult<T>) {
        self.replies.borrow_mut().push_back((yields, reply));
    }

    async fn next(&self, endpoint: &str) -> ClientResult<T> {
        let scripted = self.replies.borrow_mut().pop_front();
        match scripted {
            Some((yields, reply)) => {
                for _ in 0..yields {
                    tokio::task::yield_now().await;
                }
                reply
            }
            None => Err(ClientError::Network(format!("no reply scripted for {}", endpoint))),
        }
    }
}

/// In-process `Backend` that records every call it receives.
#[derive(Default)]
pub struct FakeBackend {
    pub calls: RefCell<Vec<&'static str>>,
    pub register: Script<MessageResponse>,
    pub login: Script<LoginResponse>,
    pub forgot_password: Script<MessageResponse>,
    pub reset_password: Script<MessageResponse>,
    pub current_user: Script<UserProfile>,
    pub change_avatar: Script<String>,
    pub list_projects: Script<Vec<RemoteProject>>,
    pub get_project: Script<RemoteProject>,
    pub upload_project: Script<MessageResponse>,
    pub update_project: Script<MessageResponse>,
    pub delete_project: Script<MessageResponse>,
    pub send_contact: Script<MessageResponse>,
    pub uploaded: RefCell<Vec<ProjectDraft>>,
    pub tokens_seen: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        init_tracing();
        Self::default()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, endpoint: &'static str) {
        self.calls.borrow_mut().push(endpoint);
    }

    fn record_token(&self, endpoint: &'static str, token: &str) {
        self.record(endpoint);
        self.tokens_seen.borrow_mut().push(token.to_string());
    }
}

impl Backend for FakeBackend {
    async fn register(&self, _request: &RegisterRequest) -> ClientResult<MessageResponse> {
        self.record("register");
        self.register.next("register").await
    }

    async fn login(&self, _request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.record("login");
        self.login.next("login").await
    }

    async fn forgot_password(&self, _request: &ForgotPasswordRequest) -> ClientResult<MessageResponse> {
        self.record("forgot_password");
        self.forgot_password.next("forgot_password").await
    }

    async fn reset_password(&self, _request: &ResetPasswordRequest) -> ClientResult<MessageResponse> {
        self.record("reset_password");
        self.reset_password.next("reset_password").await
    }

    async fn current_user(&self, token: &str) -> ClientResult<UserProfile> {
        self.record_token("current_user", token);
        self.current_user.next("current_user").await
    }

    async fn change_avatar(&self, token: &str, _avatar: &Attachment) -> ClientResult<String> {
        self.record_token("change_avatar", token);
        self.change_avatar.next("change_avatar").await
    }

    async fn list_projects(&self) -> ClientResult<Vec<RemoteProject>> {
        self.record("list_projects");
        self.list_projects.next("list_projects").await
    }

    async fn get_project(&self, token: &str, _id: &str) -> ClientResult<RemoteProject> {
        self.record_token("get_project", token);
        self.get_project.next("get_project").await
    }

    async fn upload_project(&self, token: &str, draft: &ProjectDraft) -> ClientResult<MessageResponse> {
        self.record_token("upload_project", token);
        self.uploaded.borrow_mut().push(draft.clone());
        self.upload_project.next("upload_project").await
    }

    async fn update_project(
        &self,
        token: &str,
        _id: &str,
        _draft: &ProjectDraft,
    ) -> ClientResult<MessageResponse> {
        self.record_token("update_project", token);
        self.update_project.next("update_project").await
    }

    async fn delete_project(&self, token: &str, _id: &str) -> ClientResult<MessageResponse> {
        self.record_token("delete_project", token);
        self.delete_project.next("delete_project").await
    }

    async fn send_contact(&self, _request: &ContactRequest) -> ClientResult<MessageResponse> {
        self.record("send_contact");
        self.send_contact.next("send_contact").await
    }
}

/// Route core logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn fallback_avatars() -> Vec<String> {
    DEFAULT_FALLBACK_AVATARS.iter().map(|a| a.to_string()).collect()
}

pub fn create_test_store() -> (SessionStore, MemoryStorage) {
    init_tracing();
    let storage = MemoryStorage::new();
    let store = SessionStore::new(Rc::new(storage.clone()), fallback_avatars(), 7);
    (store, storage)
}

pub fn login_reply(token: &str, username: &str, avatar: Option<&str>) -> LoginResponse {
    LoginResponse {
        token: token.to_string(),
        user: LoginUser {
            username: username.to_string(),
            avatar: avatar.map(str::to_string),
        },
    }
}

pub fn message(text: &str) -> MessageResponse {
    MessageResponse {
        message: text.to_string(),
    }
}

pub fn rejected(status: u16, text: &str) -> ClientError {
    ClientError::Rejected {
        status,
        message: text.to_string(),
    }
}

pub fn profile(id: &str, username: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        avatar: None,
    }
}

pub const MB: usize = 1024 * 1024;

pub fn attachment(name: &str, mime: &str, size: usize) -> Attachment {
    Attachment::new(name, mime, vec![0u8; size])
}
