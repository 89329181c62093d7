use leptos::prelude::*;

use crate::app::use_app;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_app();

    move || {
        ctx.notice.get().map(|notice| {
            view! {
                <div class=notice.level.css_class() role="status">
                    <span class="notice-message">{notice.message}</span>
                    <button class="notice-close" on:click=move |_| ctx.notice.set(None)>
                        "\u{2715}"
                    </button>
                </div>
            }
        })
    }
}
