use filefolio_core::{ProjectSummary, Source};
use leptos::prelude::*;

/// One catalog entry as a card linking to its detail view.
#[component]
pub fn ProjectCard(project: ProjectSummary) -> impl IntoView {
    let status_class = if project.status.is_finished() {
        "status-badge status-finished"
    } else {
        "status-badge status-open"
    };
    let origin = match project.source {
        Source::Remote => "card-remote",
        Source::Static => "card-static",
    };

    view! {
        <a href=project.detail_path() class=format!("card project-card {}", origin)>
            <img src=project.image_url.clone() alt=project.name.clone() class="project-image" />
            <div class="project-card-body">
                <h3 class="project-name">{project.name.clone()}</h3>
                <p class="project-owner">{project.owner_label.clone()}</p>
                <span class=status_class>{project.status.as_str().to_string()}</span>
                <div class="tag-row">
                    {project
                        .tags
                        .iter()
                        .map(|tag| view! { <span class="tag">{tag.clone()}</span> })
                        .collect_view()}
                </div>
            </div>
        </a>
    }
}
