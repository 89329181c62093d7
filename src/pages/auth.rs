//! Login, signup and password recovery forms.

use filefolio_core::forms::{ForgotPasswordForm, LoginForm, ResetPasswordForm, SignupForm};
use filefolio_core::services::auth;
use filefolio_core::{CommitOutcome, Notice};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let form = RwSignal::new(LoginForm::default());
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let submitted = form.get();
        let navigate = navigate.clone();
        set_is_loading.set(true);
        spawn_local(async move {
            match auth::login(&ctx.backend(), &ctx.store(), &submitted).await {
                Ok(CommitOutcome::Applied) => {
                    ctx.notify(Notice::success("Login successful!"));
                    navigate("/", Default::default());
                }
                // A newer login or a logout overtook this one
                Ok(_) => {}
                Err(e) => ctx.report(&e, "Login failed. Please try again."),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="page auth-page">
            <h2>"Login"</h2>
            <form class="auth-form" on:submit=on_submit>
                <div class="form-group">
                    <label>"Email"</label>
                    <input
                        type="email"
                        class="input"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Password"</label>
                    <input
                        type="password"
                        class="input input-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                    {move || if is_loading.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
            <p class="auth-links">
                <a href="/forgot-password">"Forgot password?"</a>
                " "
                <a href="/signup">"Create an account"</a>
            </p>
        </div>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let form = RwSignal::new(SignupForm::default());
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let submitted = form.get();
        let navigate = navigate.clone();
        set_is_loading.set(true);
        spawn_local(async move {
            match auth::register(&ctx.backend(), &submitted).await {
                Ok(message) => {
                    ctx.notify(Notice::success(message));
                    navigate("/login", Default::default());
                }
                Err(e) => ctx.report(&e, "Signup failed. Please try again."),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="page auth-page">
            <h2>"Sign up"</h2>
            <form class="auth-form" on:submit=on_submit>
                <div class="form-group">
                    <label>"Username"</label>
                    <input
                        type="text"
                        class="input"
                        prop:value=move || form.with(|f| f.username.clone())
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Email"</label>
                    <input
                        type="email"
                        class="input"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Password"</label>
                    <input
                        type="password"
                        class="input input-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                    {move || if is_loading.get() { "Creating account..." } else { "Sign up" }}
                </button>
            </form>
            <p class="auth-links">
                "Already registered? "
                <a href="/login">"Login"</a>
            </p>
        </div>
    }
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let ctx = use_app();
    let form = RwSignal::new(ForgotPasswordForm::default());
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let submitted = form.get();
        set_is_loading.set(true);
        spawn_local(async move {
            match auth::forgot_password(&ctx.backend(), &submitted).await {
                Ok(message) => ctx.notify(Notice::success(message)),
                Err(e) => ctx.report(&e, "Something went wrong. Please try again."),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="page auth-page">
            <h2>"Forgot password"</h2>
            <p class="page-description">"We will email you a link to choose a new password."</p>
            <form class="auth-form" on:submit=on_submit>
                <div class="form-group">
                    <label>"Email"</label>
                    <input
                        type="email"
                        class="input"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                    {move || if is_loading.get() { "Sending..." } else { "Send reset link" }}
                </button>
            </form>
        </div>
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let query = use_query_map();
    let form = RwSignal::new(ResetPasswordForm::default());
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut submitted = form.get();
        submitted.token = query.with_untracked(|q| q.get("token"));
        let navigate = navigate.clone();
        set_is_loading.set(true);
        spawn_local(async move {
            match auth::reset_password(&ctx.backend(), &submitted).await {
                Ok(message) => {
                    ctx.notify(Notice::success(message));
                    navigate("/login", Default::default());
                }
                Err(e) => ctx.report(&e, "Password reset failed. The link may have expired."),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="page auth-page">
            <h2>"Reset password"</h2>
            <form class="auth-form" on:submit=on_submit>
                <div class="form-group">
                    <label>"New password"</label>
                    <input
                        type="password"
                        class="input input-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Confirm password"</label>
                    <input
                        type="password"
                        class="input input-password"
                        prop:value=move || form.with(|f| f.confirm_password.clone())
                        on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                    {move || if is_loading.get() { "Resetting..." } else { "Reset password" }}
                </button>
            </form>
        </div>
    }
}
