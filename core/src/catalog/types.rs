use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a project, always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Pending,
    Complete,
    Draft,
    Published,
    /// Any other value, lowercased.
    Other(String),
}

impl ProjectStatus {
    /// Missing or blank input means `Pending`.
    pub fn parse(raw: Option<&str>) -> Self {
        let lowered = raw.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        match lowered.as_str() {
            "" | "pending" => ProjectStatus::Pending,
            "complete" => ProjectStatus::Complete,
            "draft" => ProjectStatus::Draft,
            "published" => ProjectStatus::Published,
            _ => ProjectStatus::Other(lowered),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Complete => "complete",
            ProjectStatus::Draft => "draft",
            ProjectStatus::Published => "published",
            ProjectStatus::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ProjectStatus::Complete | ProjectStatus::Published)
    }
}

/// Where a summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Remote,
    Static,
}

/// Display-ready project, whatever its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Server id; static entries have none.
    pub id: Option<String>,
    pub image_url: String,
    pub name: String,
    pub owner_label: String,
    pub status: ProjectStatus,
    pub description: String,
    pub tags: Vec<String>,
    pub source: Source,
    pub category: Option<String>,
    pub video_url: Option<String>,
    pub file_url: Option<String>,
    pub owner_id: Option<String>,
    pub owner_avatar: Option<String>,
    pub created_at: Option<String>,
    pub views: Option<u64>,
}

impl ProjectSummary {
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self.owner_label.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// Owner avatar to show. Without one, a fallback avatar is picked at
    /// random, seeded by the project name so re-renders keep the same pick.
    /// Nothing is written back.
    pub fn display_avatar(&self, fallbacks: &[String]) -> Option<String> {
        if let Some(avatar) = self.owner_avatar.as_ref().filter(|a| !a.trim().is_empty()) {
            return Some(avatar.clone());
        }
        if fallbacks.is_empty() {
            return None;
        }
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        let mut rng = SmallRng::seed_from_u64(hasher.finish());
        Some(fallbacks[rng.random_range(0..fallbacks.len())].clone())
    }

    /// Route to the detail view. The name is the lookup key.
    pub fn detail_path(&self) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(self.name.as_bytes()).collect();
        format!("/project?name={}", encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_normalizes_case() {
        assert_eq!(ProjectStatus::parse(Some("Complete")), ProjectStatus::Complete);
        assert_eq!(ProjectStatus::parse(Some(" PUBLISHED ")), ProjectStatus::Published);
        assert_eq!(ProjectStatus::parse(None), ProjectStatus::Pending);
        assert_eq!(ProjectStatus::parse(Some("")), ProjectStatus::Pending);
    }

    #[test]
    fn test_unknown_status_kept_lowercase() {
        let status = ProjectStatus::parse(Some("In Review"));
        assert_eq!(status, ProjectStatus::Other("in review".into()));
        assert_eq!(status.as_str(), "in review");
    }

    fn bare(name: &str) -> ProjectSummary {
        ProjectSummary {
            id: None,
            image_url: String::new(),
            name: name.into(),
            owner_label: String::new(),
            status: ProjectStatus::Pending,
            description: String::new(),
            tags: Vec::new(),
            source: Source::Static,
            category: None,
            video_url: None,
            file_url: None,
            owner_id: None,
            owner_avatar: None,
            created_at: None,
            views: None,
        }
    }

    #[test]
    fn test_detail_path_encodes_name() {
        assert_eq!(bare("Chat & Go").detail_path(), "/project?name=Chat+%26+Go");
    }

    #[test]
    fn test_display_avatar_prefers_owner_avatar() {
        let fallbacks = vec!["/avatar/avatar1.jpg".to_string()];
        let mut project = bare("Weather Bot");
        project.owner_avatar = Some("/uploads/ada.png".into());
        assert_eq!(project.display_avatar(&fallbacks).as_deref(), Some("/uploads/ada.png"));
    }

    #[test]
    fn test_missing_owner_avatar_uses_stable_fallback() {
        let fallbacks: Vec<String> = (1..=5).map(|i| format!("/avatar/avatar{}.jpg", i)).collect();
        let mut project = bare("Weather Bot");
        project.owner_avatar = Some("  ".into());

        let picked = project.display_avatar(&fallbacks).unwrap();
        assert!(fallbacks.contains(&picked));
        assert_eq!(project.display_avatar(&fallbacks), Some(picked));
        assert_eq!(project.owner_avatar.as_deref(), Some("  "));
        assert!(project.display_avatar(&[]).is_none());
    }
}
