//! Upload and update form for a project.
//!
//! Size limits are checked as soon as a file is picked, and the whole draft
//! is validated again by the service on submit.

use filefolio_core::forms::project::CATEGORIES;
use filefolio_core::forms::{check_size, AttachmentSlot, FormMode, ProjectDraft, TagList};
use filefolio_core::Notice;
use leptos::prelude::*;
use tracing::error;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::components::tag_input::TagInput;
use crate::files::{picked_file, read_attachment, reset_input};

#[component]
pub fn ProjectForm(
    mode: FormMode,
    /// Starting values; empty for a new project.
    initial: ProjectDraft,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<ProjectDraft>,
    #[prop(into)] submit_label: String,
) -> impl IntoView {
    let tags = RwSignal::new(initial.tags.clone());
    let draft = RwSignal::new(ProjectDraft {
        tags: TagList::new(),
        ..initial
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut submitted = draft.get();
        submitted.tags = tags.get();
        on_submit.run(submitted);
    };

    view! {
        <form class="project-form" on:submit=submit>
            <div class="form-group">
                <label>"Project name"</label>
                <input
                    type="text"
                    class="input"
                    prop:value=move || draft.with(|d| d.name.clone())
                    on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                />
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label>"Status"</label>
                    <select
                        class="input"
                        prop:value=move || draft.with(|d| d.status.clone())
                        on:change=move |ev| draft.update(|d| d.status = event_target_value(&ev))
                    >
                        <option value="">"Select status"</option>
                        {mode
                            .statuses()
                            .iter()
                            .map(|s| view! { <option value=*s>{*s}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"Category"</label>
                    <select
                        class="input"
                        prop:value=move || draft.with(|d| d.category.clone())
                        on:change=move |ev| draft.update(|d| d.category = event_target_value(&ev))
                    >
                        <option value="">"Select category"</option>
                        {CATEGORIES
                            .iter()
                            .map(|c| view! { <option value=*c>{*c}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <div class="form-group">
                <label>"Description"</label>
                <textarea
                    class="input"
                    rows="5"
                    prop:value=move || draft.with(|d| d.description.clone())
                    on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                ></textarea>
            </div>

            <TagInput tags=tags />

            <AttachmentField draft=draft slot=AttachmentSlot::Image accept="image/*" />
            <AttachmentField draft=draft slot=AttachmentSlot::Video accept="video/*" />
            <AttachmentField draft=draft slot=AttachmentSlot::File accept="" />
            {(mode == FormMode::Update).then(|| view! {
                <p class="input-hint">"Leave a file empty to keep the current one."</p>
            })}

            <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                {move || if busy.get() { "Saving...".to_string() } else { submit_label.clone() }}
            </button>
        </form>
    }
}

/// File input for one slot. Oversized files are refused on the spot.
#[component]
fn AttachmentField(
    draft: RwSignal<ProjectDraft>,
    slot: AttachmentSlot,
    #[prop(into)] accept: String,
) -> impl IntoView {
    let ctx = use_app();
    let (is_reading, set_is_reading) = signal(false);
    let hint = match slot.limit_mb() {
        Some(limit) => format!("{} (max {}MB)", slot.label(), limit),
        None => slot.label().to_string(),
    };

    let on_change = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else {
            draft.update(|d| d.detach(slot));
            return;
        };
        if let Err(failure) = check_size(slot, file.size() as u64) {
            reset_input(&ev);
            draft.update(|d| d.detach(slot));
            ctx.notify(Notice::error(failure.to_string()));
            return;
        }
        set_is_reading.set(true);
        spawn_local(async move {
            match read_attachment(file).await {
                Ok(attachment) => {
                    let mut outcome = Ok(());
                    draft.update(|d| outcome = d.attach(slot, attachment));
                    if let Err(failure) = outcome {
                        reset_input(&ev);
                        ctx.notify(Notice::error(failure.to_string()));
                    }
                }
                Err(e) => {
                    error!("{} could not be read: {}", slot.label(), e);
                    reset_input(&ev);
                    ctx.notify(Notice::from_error(&e, "Could not read the selected file."));
                }
            }
            set_is_reading.set(false);
        });
    };

    view! {
        <div class="form-group attachment-field">
            <label>{hint}</label>
            <input type="file" class="input" accept=accept on:change=on_change />
            {move || {
                if is_reading.get() {
                    Some(view! { <span class="input-hint">"Reading file..."</span> }.into_any())
                } else {
                    draft.with(|d| d.slot(slot).map(|a| {
                        let label = format!("{} ({} KB)", a.file_name, a.size() / 1024);
                        view! { <span class="input-hint">{label}</span> }.into_any()
                    }))
                }
            }}
        </div>
    }
}
