use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::app::use_app;

/// Detail view for one catalog entry, looked up by name.
#[component]
pub fn ViewProjectPage() -> impl IntoView {
    let ctx = use_app();
    let query = use_query_map();

    let project = Memo::new(move |_| {
        let name = query.with(|q| q.get("name")).unwrap_or_default();
        ctx.catalog.with(|c| c.find_by_name(&name))
    });

    move || match project.get() {
        None if ctx.catalog_loading.get() => view! {
            <div class="page"><p>"Loading project..."</p></div>
        }
        .into_any(),
        None => view! {
            <div class="page">
                <h2>"Project not found"</h2>
                <a href="/" class="btn btn-secondary">"Back to projects"</a>
            </div>
        }
        .into_any(),
        Some(p) => {
            let status_class = if p.status.is_finished() {
                "status-badge status-finished"
            } else {
                "status-badge status-open"
            };
            view! {
                <div class="page view-project-page">
                    <img src=p.image_url.clone() alt=p.name.clone() class="project-hero-image" />
                    {p.video_url.clone().map(|src| view! {
                        <video class="project-video" controls=true src=src></video>
                    })}
                    <div class="project-header">
                        <h2>{p.name.clone()}</h2>
                        <span class=status_class>{p.status.as_str().to_string()}</span>
                    </div>
                    <div class="project-owner-row">
                        {ctx.fallback_avatars.with_value(|f| p.display_avatar(f)).map(|src| view! {
                            <img src=src alt="Owner" class="avatar" />
                        })}
                        <span>{p.owner_label.clone()}</span>
                    </div>
                    <dl class="project-meta">
                        {p.category.clone().map(|c| view! { <dt>"Category"</dt><dd>{c}</dd> })}
                        {p.created_at.clone().map(|d| view! { <dt>"Created"</dt><dd>{d}</dd> })}
                        {p.views.map(|v| view! { <dt>"Views"</dt><dd>{v}</dd> })}
                    </dl>
                    <p class="project-description">{p.description.clone()}</p>
                    <div class="tag-row">
                        {p.tags
                            .iter()
                            .map(|tag| view! { <span class="tag">{tag.clone()}</span> })
                            .collect_view()}
                    </div>
                    {p.file_url.clone().map(|href| view! {
                        <a href=href class="btn btn-primary" download="">"Download project files"</a>
                    })}
                </div>
            }
            .into_any()
        }
    }
}
