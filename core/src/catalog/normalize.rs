use super::baseline::StaticProject;
use super::types::{ProjectStatus, ProjectSummary, Source};
use crate::api::types::RemoteProject;

pub const FALLBACK_IMAGE: &str = "/fallback.jpg";
pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_OWNER: &str = "Unknown";

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Apply the defaulting rules to one API project.
pub fn normalize_remote(project: RemoteProject) -> ProjectSummary {
    let owner = project.created_by.as_ref().and_then(|o| o.owner()).cloned();
    let owner_id = project
        .created_by
        .as_ref()
        .and_then(|o| o.id())
        .map(str::to_string);
    let owner_label = owner
        .as_ref()
        .and_then(|o| present(o.email.clone()).or_else(|| present(o.username.clone())))
        .unwrap_or_else(|| UNKNOWN_OWNER.to_string());

    ProjectSummary {
        id: present(project.id),
        image_url: present(project.image).unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
        name: present(project.name)
            .map(|n| n.trim().to_string())
            .unwrap_or_else(|| UNTITLED.to_string()),
        owner_label,
        status: ProjectStatus::parse(project.status.as_deref()),
        description: project.description.unwrap_or_default(),
        tags: project.tags.map(|t| t.into_tags()).unwrap_or_default(),
        source: Source::Remote,
        category: present(project.category),
        video_url: present(project.video),
        file_url: present(project.file),
        owner_id,
        owner_avatar: owner.and_then(|o| present(o.avatar)),
        created_at: present(project.created_at),
        views: project.views,
    }
}

/// Apply the same rules to a bundled entry.
pub fn normalize_static(project: StaticProject) -> ProjectSummary {
    ProjectSummary {
        id: None,
        image_url: present(project.projectimage).unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
        name: present(project.projectname)
            .map(|n| n.trim().to_string())
            .unwrap_or_else(|| UNTITLED.to_string()),
        owner_label: present(project.username).unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
        status: ProjectStatus::parse(project.status.as_deref()),
        description: project.description.unwrap_or_default(),
        tags: project
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        source: Source::Static,
        category: None,
        video_url: None,
        file_url: None,
        owner_id: None,
        owner_avatar: present(project.userimage),
        created_at: None,
        views: None,
    }
}
