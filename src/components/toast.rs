//! Toast Component
//!
//! Renders the single transient notification from `AppContext`. Auto-dismiss
//! is scheduled by the context when the notice is raised; the button here is
//! the manual escape hatch.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        {move || {
            ctx.notice.get().map(|notice| {
                view! {
                    <div class=notice.severity.css_class()>
                        <span class="toast-message">{notice.message.clone()}</span>
                        <button type="button" class="toast-dismiss" on:click=move |_| ctx.dismiss_notice()>
                            "\u{00D7}"
                        </button>
                    </div>
                }
            })
        }}
    }
}
