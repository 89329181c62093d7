use filefolio_core::forms::{check_size, AttachmentSlot};
use filefolio_core::services::auth;
use filefolio_core::{CommitOutcome, Notice};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use tracing::error;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::files::{picked_file, read_attachment, reset_input};

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let (is_uploading, set_is_uploading) = signal(false);
    let avatar_input_id = "avatar-file-input";

    let on_logout = move |_| {
        if let Err(e) = auth::logout(&ctx.store()) {
            ctx.report(&e, "Logout did not fully complete");
        } else {
            ctx.notify(Notice::info("You have been logged out."));
        }
        navigate("/login", Default::default());
    };

    let on_avatar_change = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        reset_input(&ev);
        if let Err(failure) = check_size(AttachmentSlot::Image, file.size() as u64) {
            ctx.notify(Notice::error(failure.to_string()));
            return;
        }
        set_is_uploading.set(true);
        spawn_local(async move {
            match read_attachment(file).await {
                Ok(avatar) => {
                    match auth::change_avatar(&ctx.backend(), &ctx.store(), &avatar).await {
                        Ok(CommitOutcome::Applied) => {
                            ctx.notify(Notice::success("Profile picture updated."))
                        }
                        Ok(_) => {}
                        Err(e) => ctx.report(&e, "Image upload failed"),
                    }
                }
                Err(e) => {
                    error!("Avatar file could not be read: {}", e);
                    ctx.notify(Notice::from_error(&e, "Could not read the selected image."));
                }
            }
            set_is_uploading.set(false);
        });
    };

    view! {
        <nav class="navbar">
            <a href="/" class="navbar-brand">
                <img src="/logo.jpeg" alt="Logo" class="navbar-logo" />
                <span class="navbar-title">"FileFolio"</span>
            </a>
            <ul class="nav-list">
                <li class="nav-item"><a href="/" class="nav-link">"Home"</a></li>
                <li class="nav-item"><a href="/upload" class="nav-link">"Upload"</a></li>
                <li class="nav-item"><a href="/contact" class="nav-link">"Contact"</a></li>
            </ul>
            <div class="navbar-account">
                <Show
                    when=move || ctx.is_authenticated()
                    fallback=|| view! {
                        <a href="/login" class="btn btn-primary">"Login"</a>
                        <a href="/signup" class="btn btn-secondary">"Signup"</a>
                    }
                >
                    <label
                        for=avatar_input_id
                        class="avatar-button"
                        class:avatar-busy=move || is_uploading.get()
                        title="Change profile picture"
                    >
                        <img
                            class="avatar"
                            alt="Profile"
                            src=move || ctx.session.with(|s| s.avatar_url().unwrap_or_default().to_string())
                        />
                    </label>
                    <input
                        type="file"
                        id=avatar_input_id
                        accept="image/*"
                        style="display: none"
                        on:change=on_avatar_change
                    />
                    <span class="navbar-username">
                        {move || ctx.session.with(|s| s.username().unwrap_or_default().to_string())}
                    </span>
                    <a href="/profile" class="btn btn-primary">"Visit Profile"</a>
                    <button class="btn btn-danger" on:click=on_logout.clone()>"Logout"</button>
                </Show>
            </div>
        </nav>
    }
}
