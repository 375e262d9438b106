//! Navigation Bar Component
//!
//! Top-level page switcher. The visit-queue entry carries a live count badge
//! driven by the queue revision signal.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::pages::Page;
use crate::store::use_visit_queue;

const NAV_ITEMS: &[(&str, Page)] = &[
    ("Home", Page::Home),
    ("Children", Page::Children),
    ("Visit queue", Page::VisitQueue),
    ("Visitations", Page::Visitations),
    ("Find by area", Page::FindByArea),
    ("Classes", Page::Classes),
    ("Academic years", Page::AcademicYears),
];

#[component]
pub fn NavBar(current: ReadSignal<Page>, set_current: WriteSignal<Page>) -> impl IntoView {
    let ctx = use_app_context();
    let queue = use_visit_queue();

    let queue_count = move || {
        ctx.queue_revision.get();
        queue.count()
    };

    view! {
        <nav class="nav-bar">
            <span class="nav-brand">"Outreach"</span>
            {NAV_ITEMS
                .iter()
                .map(|(label, page)| {
                    let page = *page;
                    let queue_count = queue_count.clone();
                    let is_active = move || current.get().section() == page.section();
                    view! {
                        <button
                            class=move || if is_active() { "nav-btn active" } else { "nav-btn" }
                            on:click=move |_| set_current.set(page)
                        >
                            {*label}
                            {(page == Page::VisitQueue)
                                .then(|| {
                                    view! {
                                        <span class="nav-badge">{queue_count}</span>
                                    }
                                })}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
