//! The logged-in user's own projects, with edit and delete.

use filefolio_core::catalog::load_remote;
use filefolio_core::services::projects;
use filefolio_core::{ClientError, Notice, ProjectSummary};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let (my_projects, set_my_projects) = signal::<Vec<ProjectSummary>>(vec![]);
    let (is_loading, set_is_loading) = signal(false);
    let (pending_delete, set_pending_delete) = signal::<Option<ProjectSummary>>(None);

    // Reload whenever the logged-in user changes
    Effect::new(move |_| {
        if !ctx.session.with(|s| s.is_authenticated()) {
            set_my_projects.set(vec![]);
            return;
        }
        set_is_loading.set(true);
        spawn_local(async move {
            let backend = ctx.backend();
            let remote = load_remote(&backend).await;
            ctx.catalog.update(|c| c.set_remote(remote));
            let catalog = ctx.catalog.get_untracked();
            match projects::my_projects(&backend, &ctx.store(), &catalog).await {
                Ok(list) => set_my_projects.set(list),
                Err(e) => ctx.report(&e, "Could not load your projects."),
            }
            set_is_loading.set(false);
        });
    });

    let do_delete = move || {
        let Some(project) = pending_delete.get_untracked() else {
            return;
        };
        set_pending_delete.set(None);
        let Some(id) = project.id.clone() else {
            return;
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            match projects::delete(&ctx.backend(), &ctx.store(), &id).await {
                Ok(message) => {
                    set_my_projects.update(|list| list.retain(|p| p.id.as_deref() != Some(id.as_str())));
                    ctx.catalog.update(|c| {
                        c.remove_remote(&id);
                    });
                    ctx.notify(Notice::success(message));
                }
                Err(e @ ClientError::SessionExpired(_)) => {
                    ctx.report(&e, "Please login again.");
                    navigate("/login", Default::default());
                }
                Err(e) => ctx.report(&e, "Could not delete the project."),
            }
        });
    };

    view! {
        <div class="page profile-page">
            <Show
                when=move || ctx.is_authenticated()
                fallback=|| view! {
                    <div class="empty-state">
                        <p>"Please login first."</p>
                        <a href="/login" class="btn btn-primary">"Login"</a>
                    </div>
                }
            >
                <div class="profile-header">
                    <img
                        class="avatar avatar-large"
                        alt="Profile"
                        src=move || ctx.session.with(|s| s.avatar_url().unwrap_or_default().to_string())
                    />
                    <h2>{move || ctx.session.with(|s| s.username().unwrap_or_default().to_string())}</h2>
                    <a href="/upload" class="btn btn-primary">"Upload new project"</a>
                </div>

                <Show when=move || is_loading.get()>
                    <p>"Loading your projects..."</p>
                </Show>

                <div class="my-projects">
                    <For
                        each=move || my_projects.get()
                        key=|p| p.id.clone()
                        children=move |p| {
                            let for_delete = p.clone();
                            let edit_href = format!("/update-project/{}", p.id.clone().unwrap_or_default());
                            view! {
                                <div class="my-project-row">
                                    <img src=p.image_url.clone() alt=p.name.clone() class="thumb" />
                                    <a href=p.detail_path() class="my-project-name">{p.name.clone()}</a>
                                    <span class="status-badge">{p.status.as_str().to_string()}</span>
                                    <a href=edit_href class="btn btn-secondary">"Edit"</a>
                                    <button
                                        class="btn btn-danger"
                                        on:click=move |_| set_pending_delete.set(Some(for_delete.clone()))
                                    >
                                        "Delete"
                                    </button>
                                </div>
                            }
                        }
                    />
                    <Show when=move || my_projects.with(|l| l.is_empty()) && !is_loading.get()>
                        <div class="empty-state">"You have not uploaded any projects yet."</div>
                    </Show>
                </div>
            </Show>

            // Delete confirmation modal
            <Show when=move || pending_delete.with(|p| p.is_some())>
                <div class="modal-overlay" on:click=move |_| set_pending_delete.set(None)>
                    <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                        <h3>"Delete Project?"</h3>
                        <p>
                            "This will permanently delete \""
                            {move || pending_delete.with(|p| p.as_ref().map(|p| p.name.clone()).unwrap_or_default())}
                            "\". This cannot be undone."
                        </p>
                        <div class="modal-actions">
                            <button class="btn btn-secondary" on:click=move |_| set_pending_delete.set(None)>
                                "Cancel"
                            </button>
                            <button class="btn btn-danger" on:click={
                                let do_delete = do_delete.clone();
                                move |_| do_delete()
                            }>
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
