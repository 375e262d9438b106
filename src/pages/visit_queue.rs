//! Visit Queue Page
//!
//! The list of children still awaiting a visit. Queue ids live in the
//! persisted store; the child records behind them are re-fetched on every
//! load, one concurrent lookup per id, and an id whose lookup fails is
//! hidden from the grid without being dequeued.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ChildCard, VisitDialog};
use crate::context::use_app_context;
use crate::models::{Child, ChildId};
use crate::pages::Page;
use crate::store::{use_app_store, use_visit_queue, AppStateStoreFields};
use crate::workflow::{fetch_children_tolerant, VisitOrigin};

#[component]
pub fn VisitQueuePage(set_page: WriteSignal<Page>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let queue = use_visit_queue();

    let (queued_children, set_queued_children) = signal(Vec::<Child>::new());
    let (visiting, set_visiting) = signal(None::<Child>);
    let (adding, set_adding) = signal(false);
    let (new_child_id, set_new_child_id) = signal(String::new());

    // Load queue entries whenever the queue or the reload trigger moves.
    let load_queue = queue.clone();
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = ctx.queue_revision.get();
        let ids = load_queue.list();
        web_sys::console::log_1(&format!("[QUEUE] Loading {} queued children", ids.len()).into());
        spawn_local(async move {
            let children = fetch_children_tolerant(&ids).await;
            set_queued_children.set(children);
        });
    });

    // Full child list backs the add-to-queue picker.
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            if let Ok(children) = api::list_children().await {
                store.children().set(children);
            }
        });
    });

    let remove_queue = queue.clone();
    let on_remove = Callback::new(move |id: ChildId| {
        if remove_queue.remove(id) {
            ctx.queue_changed();
            ctx.notify_success("Removed from queue");
        } else {
            ctx.notify_error("Could not update the queue");
        }
    });

    let on_visit = Callback::new(move |child: Child| set_visiting.set(Some(child)));

    let on_open = Callback::new(move |id: ChildId| set_page.set(Page::ChildDetail(id)));

    let add_queue = queue.clone();
    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Ok(id) = new_child_id.get().parse::<ChildId>() else {
            ctx.notify(crate::context::Severity::Warning, "Select a child first");
            return;
        };
        if add_queue.add(id) {
            ctx.queue_changed();
            set_new_child_id.set(String::new());
            set_adding.set(false);
            ctx.notify_success("Child added to queue");
        } else {
            ctx.notify(crate::context::Severity::Info, "Child is already in the queue");
        }
    };

    // Children not yet queued, for the picker.
    let available_queue = queue.clone();
    let available = move || {
        ctx.queue_revision.get();
        let queued = available_queue.list();
        store
            .children()
            .get()
            .into_iter()
            .filter(|child| !queued.contains(&child.id))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h1>"Visit queue"</h1>
                <button class="primary-btn" on:click=move |_| set_adding.set(true)>
                    "Add child"
                </button>
            </div>

            {move || {
                if queued_children.get().is_empty() {
                    view! {
                        <p class="empty-state">"No children queued for a visit."</p>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="card-grid">
                            {queued_children
                                .get()
                                .into_iter()
                                .map(|child| view! {
                                    <ChildCard
                                        child=child
                                        on_open=on_open
                                        on_visit=on_visit
                                        on_remove=on_remove
                                    />
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}

            {move || adding.get().then(|| view! {
                <div class="dialog-backdrop">
                    <div class="dialog">
                        <div class="dialog-header">
                            <h2>"Add child to queue"</h2>
                            <button type="button" class="close-btn" on:click=move |_| set_adding.set(false)>
                                "\u{00D7}"
                            </button>
                        </div>
                        <form on:submit=on_add.clone()>
                            <select
                                class="select-input"
                                prop:value=move || new_child_id.get()
                                on:change=move |ev| set_new_child_id.set(event_target_value(&ev))
                            >
                                <option value="">"Select a child"</option>
                                <For
                                    each=available.clone()
                                    key=|child| (child.id, child.full_name.clone())
                                    children=move |child| {
                                        view! {
                                            <option value=child.id.to_string()>
                                                {child.full_name.clone()}
                                                {child.address.clone().map(|a| format!(" - {a}"))}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                            <div class="dialog-actions">
                                <button type="button" class="secondary-btn" on:click=move |_| set_adding.set(false)>
                                    "Cancel"
                                </button>
                                <button type="submit" class="primary-btn">
                                    "Add"
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            })}

            {move || visiting.get().map(|child| view! {
                <VisitDialog
                    child=child
                    origin=VisitOrigin::Queue
                    on_close=Callback::new(move |()| set_visiting.set(None))
                />
            })}
        </div>
    }
}
