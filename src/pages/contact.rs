use filefolio_core::forms::ContactForm;
use filefolio_core::services::contact;
use filefolio_core::Notice;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;

#[component]
pub fn ContactPage() -> impl IntoView {
    let ctx = use_app();
    let form = RwSignal::new(ContactForm::default());
    let (is_sending, set_is_sending) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let submitted = form.get();
        set_is_sending.set(true);
        spawn_local(async move {
            match contact::send(&ctx.backend(), &submitted).await {
                Ok(message) => {
                    ctx.notify(Notice::success(message));
                    form.set(ContactForm::default());
                }
                Err(e) => ctx.report(&e, "Could not send your message."),
            }
            set_is_sending.set(false);
        });
    };

    view! {
        <div class="page contact-page">
            <h2>"Contact us"</h2>
            <p class="page-description">"Questions, feedback or a project to feature? Drop us a line."</p>
            <form class="contact-form" on:submit=on_submit>
                <div class="form-group">
                    <label>"Name"</label>
                    <input
                        type="text"
                        class="input"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
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
                    <label>"Message"</label>
                    <textarea
                        class="input"
                        rows="6"
                        prop:value=move || form.with(|f| f.message.clone())
                        on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
                    ></textarea>
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || is_sending.get()>
                    {move || if is_sending.get() { "Sending..." } else { "Send message" }}
                </button>
            </form>
        </div>
    }
}
