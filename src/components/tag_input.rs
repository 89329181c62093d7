use filefolio_core::forms::TagList;
use filefolio_core::{Notice, ValidationFailure};
use leptos::prelude::*;

use crate::app::use_app;

/// Free-text tag entry. Enter or the Add button commits the typed tag.
#[component]
pub fn TagInput(tags: RwSignal<TagList>) -> impl IntoView {
    let ctx = use_app();
    let (pending, set_pending) = signal(String::new());

    let commit = move || {
        let raw = pending.get();
        let mut added = Ok(String::new());
        tags.update(|list| added = list.add(&raw));
        match added {
            Ok(_) => set_pending.set(String::new()),
            Err(ValidationFailure::EmptyTag) => {}
            Err(failure) => ctx.notify(Notice::warning(failure.to_string())),
        }
    };

    view! {
        <div class="form-group tag-input">
            <label>"Tags"</label>
            <div class="input-row">
                <input
                    type="text"
                    class="input"
                    placeholder="Add a tag"
                    prop:value=move || pending.get()
                    on:input=move |ev| set_pending.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            commit();
                        }
                    }
                />
                <button type="button" class="btn btn-secondary" on:click=move |_| commit()>
                    "Add"
                </button>
            </div>
            <div class="tag-row">
                <For
                    each=move || tags.with(|t| t.as_slice().to_vec())
                    key=|tag| tag.clone()
                    children=move |tag| {
                        let target = tag.clone();
                        view! {
                            <span class="tag">
                                {tag}
                                <button
                                    type="button"
                                    class="tag-remove"
                                    on:click=move |_| {
                                        tags.update(|list| {
                                            list.remove(&target);
                                        });
                                    }
                                >
                                    "\u{00d7}"
                                </button>
                            </span>
                        }
                    }
                />
            </div>
        </div>
    }
}
