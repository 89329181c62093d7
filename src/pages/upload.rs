use filefolio_core::forms::{FormMode, ProjectDraft};
use filefolio_core::services::projects;
use filefolio_core::{ClientError, Notice};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::components::project_form::ProjectForm;

#[component]
pub fn UploadPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let (is_saving, set_is_saving) = signal(false);

    let on_submit = Callback::new(move |draft: ProjectDraft| {
        let navigate = navigate.clone();
        set_is_saving.set(true);
        spawn_local(async move {
            match projects::upload(&ctx.backend(), &ctx.store(), &draft).await {
                Ok(message) => {
                    ctx.notify(Notice::success(message));
                    ctx.refresh_catalog();
                    navigate("/profile", Default::default());
                }
                Err(e @ (ClientError::SessionExpired(_) | ClientError::NotAuthenticated)) => {
                    ctx.report(&e, "Please login first.");
                    navigate("/login", Default::default());
                }
                Err(e) => ctx.report(&e, "Upload failed. Please try again."),
            }
            set_is_saving.set(false);
        });
    });

    view! {
        <div class="page upload-page">
            <h2>"Upload a project"</h2>
            <Show
                when=move || ctx.is_authenticated()
                fallback=|| view! {
                    <div class="empty-state">
                        <p>"Please login first."</p>
                        <a href="/login" class="btn btn-primary">"Login"</a>
                    </div>
                }
            >
                <ProjectForm
                    mode=FormMode::Create
                    initial=ProjectDraft::default()
                    busy=is_saving
                    on_submit=on_submit
                    submit_label="Upload Project"
                />
            </Show>
        </div>
    }
}
