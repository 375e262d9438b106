//! Children Page
//!
//! Full register with server-side name search, plus per-child open, edit,
//! delete, and add-to-queue actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::ChildCard;
use crate::context::{use_app_context, Severity};
use crate::models::ChildId;
use crate::pages::Page;
use crate::store::{use_app_store, use_visit_queue, AppStateStoreFields};

#[component]
pub fn ChildrenPage(set_page: WriteSignal<Page>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let queue = use_visit_queue();

    let (search_term, set_search_term) = signal(String::new());
    let (loading, set_loading) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let term = search_term.get();
        set_loading.set(true);
        spawn_local(async move {
            let result = if term.trim().is_empty() {
                api::list_children().await
            } else {
                api::search_children(term.trim()).await
            };
            match result {
                Ok(children) => store.children().set(children),
                Err(err) => ctx.notify_error(err.to_string()),
            }
            set_loading.set(false);
        });
    });

    let (search_input, set_search_input) = signal(String::new());
    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_search_term.set(search_input.get());
    };

    let on_open = Callback::new(move |id: ChildId| set_page.set(Page::ChildDetail(id)));
    let on_edit = Callback::new(move |id: ChildId| set_page.set(Page::ChildEdit(id)));

    let on_remove = Callback::new(move |id: ChildId| {
        spawn_local(async move {
            match api::delete_child(id).await {
                Ok(()) => {
                    ctx.notify_success("Child deleted");
                    ctx.reload();
                }
                Err(err) => ctx.notify_error(err.to_string()),
            }
        });
    });

    let queue_for_add = queue.clone();
    let on_queue = Callback::new(move |id: ChildId| {
        if queue_for_add.add(id) {
            ctx.queue_changed();
            ctx.notify_success("Child added to queue");
        } else if queue_for_add.contains(id) {
            ctx.notify(Severity::Info, "Child is already in the queue");
        } else {
            ctx.notify_error("Could not update the queue");
        }
    });

    view! {
        <div class="page">
            <div class="page-header">
                <h1>"Children"</h1>
                <button class="primary-btn" on:click=move |_| set_page.set(Page::ChildAdd)>
                    "Add child"
                </button>
            </div>

            <form class="search-form" on:submit=on_search>
                <input
                    type="text"
                    placeholder="Search by name..."
                    prop:value=move || search_input.get()
                    on:input=move |ev| set_search_input.set(event_target_value(&ev))
                />
                <button type="submit" class="secondary-btn" disabled=move || loading.get()>
                    {move || if loading.get() { "Searching..." } else { "Search" }}
                </button>
            </form>

            {move || {
                if store.children().get().is_empty() {
                    view! {
                        <p class="empty-state">"No children found."</p>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="card-grid">
                            {store
                                .children()
                                .get()
                                .into_iter()
                                .map(|child| view! {
                                    <ChildCard
                                        child=child
                                        on_open=on_open
                                        on_edit=on_edit
                                        on_remove=on_remove
                                        on_queue=on_queue
                                    />
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
