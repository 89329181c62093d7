use serde::{Deserialize, Serialize};

/// The identity triple written by a successful login. Always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub username: String,
    pub avatar_url: String,
}

/// Who is logged in, if anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.username.as_str())
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.avatar_url.as_str())
    }

    pub(crate) fn with_avatar(&self, avatar_url: String) -> Option<Self> {
        self.credentials.as_ref().map(|c| Session {
            credentials: Some(Credentials {
                avatar_url,
                ..c.clone()
            }),
        })
    }
}

/// Values produced by a login exchange, before fallback avatar resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Issued before a session-producing request; only the newest ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(pub(crate) u64);

impl RequestTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What happened to a commit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Superseded,
    /// Nobody is logged in, so there is nothing to update.
    NoSession,
}

/// Handle returned by `SessionStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub(crate) u64);
