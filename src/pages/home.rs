use leptos::prelude::*;

use crate::app::use_app;
use crate::components::project_card::ProjectCard;

/// Landing page with the searchable project catalog.
#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app();
    let (query, set_query) = signal(String::new());

    let visible = Memo::new(move |_| {
        let q = query.get();
        ctx.catalog.with(|c| c.view(&q))
    });

    view! {
        <div class="page home-page">
            <section class="hero">
                <h2>"Discover projects built by the community"</h2>
                <p class="page-description">
                    "Browse, search and share the projects people are working on."
                </p>
                <a href="/upload" class="btn btn-primary">"Upload your project"</a>
            </section>

            <section class="search-section">
                <input
                    type="search"
                    class="input search-input"
                    placeholder="Search by project, owner or tag"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <Show when=move || ctx.catalog_loading.get()>
                    <span class="input-hint">"Loading latest projects..."</span>
                </Show>
            </section>

            <div class="card-grid">
                <For
                    each=move || visible.get().into_iter().enumerate()
                    key=|(i, p)| (*i, p.source, p.name.clone())
                    children=move |(_, project)| view! { <ProjectCard project=project /> }
                />
            </div>
            <Show when=move || visible.with(|v| v.is_empty())>
                <div class="empty-state">"No projects match your search."</div>
            </Show>
        </div>
    }
}
