use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Generic `{ "message": ... }` body used for both success and error replies.
/// Some replies carry `error` instead, or both; `message` wins when present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawMessageResponse")]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize)]
struct RawMessageResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<RawMessageResponse> for MessageResponse {
    fn from(raw: RawMessageResponse) -> Self {
        let message = raw
            .message
            .filter(|m| !m.trim().is_empty())
            .or(raw.error)
            .unwrap_or_default();
        Self { message }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginUser {
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A project as the API returns it. Every field may be missing or null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteProject {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<TagsField>,
    #[serde(rename = "createdBy", default)]
    pub created_by: Option<OwnerRef>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub views: Option<u64>,
}

/// Tags arrive as an array, or as the comma-joined string the upload form sends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    List(Vec<String>),
    Joined(String),
}

impl TagsField {
    pub fn into_tags(self) -> Vec<String> {
        let raw = match self {
            TagsField::List(tags) => tags,
            TagsField::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// `createdBy` is either populated with the owner or just the owner's id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    Populated(ProjectOwner),
    Id(String),
}

impl OwnerRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            OwnerRef::Populated(owner) => owner.id.as_deref(),
            OwnerRef::Id(id) => Some(id.as_str()),
        }
    }

    pub fn owner(&self) -> Option<&ProjectOwner> {
        match self {
            OwnerRef::Populated(owner) => Some(owner),
            OwnerRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectOwner {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_with_populated_owner() {
        let json = r#"{
            "_id": "p1",
            "name": "Weather Bot",
            "status": "Complete",
            "tags": ["rust", "cli"],
            "createdBy": { "_id": "u1", "email": "ada@example.com", "avatar": "/a.png" },
            "createdAt": "2025-03-01T10:00:00.000Z",
            "views": 4
        }"#;
        let project: RemoteProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.id.as_deref(), Some("p1"));
        let owner = project.created_by.unwrap();
        assert_eq!(owner.id(), Some("u1"));
        assert_eq!(owner.owner().unwrap().email.as_deref(), Some("ada@example.com"));
        assert_eq!(project.views, Some(4));
    }

    #[test]
    fn test_project_with_bare_owner_id_and_nulls() {
        let json = r#"{ "_id": "p2", "name": null, "createdBy": "u9", "tags": null }"#;
        let project: RemoteProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, None);
        assert_eq!(project.tags, None);
        assert_eq!(project.created_by.unwrap().id(), Some("u9"));
    }

    #[test]
    fn test_joined_tags_are_split_and_trimmed() {
        let tags = TagsField::Joined(" react, node ,,css".into()).into_tags();
        assert_eq!(tags, vec!["react", "node", "css"]);
    }

    #[test]
    fn test_reset_request_uses_new_password_key() {
        let body = serde_json::to_value(ResetPasswordRequest {
            token: "t".into(),
            new_password: "hunter2".into(),
        })
        .unwrap();
        assert_eq!(body["newPassword"], "hunter2");
    }

    #[test]
    fn test_message_accepts_error_alias() {
        let parsed: MessageResponse = serde_json::from_str(r#"{"error":"Nope"}"#).unwrap();
        assert_eq!(parsed.message, "Nope");
    }

    #[test]
    fn test_message_preferred_over_error_when_both_sent() {
        let parsed: MessageResponse =
            serde_json::from_str(r#"{"message":"Invalid credentials","error":"Unauthorized"}"#)
                .unwrap();
        assert_eq!(parsed.message, "Invalid credentials");

        let parsed: MessageResponse =
            serde_json::from_str(r#"{"message":"","error":"Unauthorized"}"#).unwrap();
        assert_eq!(parsed.message, "Unauthorized");

        let parsed: MessageResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.message.is_empty());
    }
}
