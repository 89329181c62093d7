use filefolio_core::forms::{FormMode, ProjectDraft};
use filefolio_core::services::projects;
use filefolio_core::{ClientError, Notice};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::components::project_form::ProjectForm;

#[component]
pub fn UpdateProjectPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let params = use_params_map();
    let project_id = move || params.with(|p| p.get("id")).unwrap_or_default();

    let loaded = RwSignal::new(None::<ProjectDraft>);
    let (load_error, set_load_error) = signal::<Option<String>>(None);
    let (is_saving, set_is_saving) = signal(false);

    // Prefill from the stored project
    Effect::new(move |_| {
        let id = project_id();
        spawn_local(async move {
            match projects::get(&ctx.backend(), &ctx.store(), &id).await {
                Ok(project) => loaded.set(Some(ProjectDraft::from_remote(&project))),
                Err(e) => {
                    set_load_error.set(Some(e.to_string()));
                    ctx.report(&e, "Could not load project.");
                }
            }
        });
    });

    let on_submit = Callback::new(move |draft: ProjectDraft| {
        let navigate = navigate.clone();
        let id = project_id();
        set_is_saving.set(true);
        spawn_local(async move {
            match projects::update(&ctx.backend(), &ctx.store(), &id, &draft).await {
                Ok(message) => {
                    ctx.notify(Notice::success(message));
                    ctx.refresh_catalog();
                    navigate("/profile", Default::default());
                }
                Err(e @ (ClientError::SessionExpired(_) | ClientError::NotAuthenticated)) => {
                    ctx.report(&e, "Please login first.");
                    navigate("/login", Default::default());
                }
                Err(e) => ctx.report(&e, "Update failed. Please try again."),
            }
            set_is_saving.set(false);
        });
    });

    view! {
        <div class="page update-project-page">
            <h2>"Update project"</h2>
            {move || load_error.get().map(|e| view! { <div class="form-error">{e}</div> })}
            {move || match loaded.get() {
                Some(initial) => view! {
                    <ProjectForm
                        mode=FormMode::Update
                        initial=initial
                        busy=is_saving
                        on_submit=on_submit
                        submit_label="Update Project"
                    />
                }
                .into_any(),
                None if load_error.get().is_none() => view! { <p>"Loading project..."</p> }.into_any(),
                None => ().into_any(),
            }}
        </div>
    }
}
