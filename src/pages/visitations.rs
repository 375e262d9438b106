//! Visitations Page
//!
//! Every child as a card; clicking one opens the record-visit dialog. Visits
//! recorded here come from direct selection, so the queue is left alone.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ChildCard, VisitDialog};
use crate::context::use_app_context;
use crate::models::Child;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::workflow::VisitOrigin;

#[component]
pub fn VisitationsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (visiting, set_visiting) = signal(None::<Child>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match api::list_children().await {
                Ok(children) => store.children().set(children),
                Err(err) => ctx.notify_error(err.to_string()),
            }
        });
    });

    let on_visit = Callback::new(move |child: Child| set_visiting.set(Some(child)));

    view! {
        <div class="page">
            <h1>"Visitations"</h1>
            <p class="hint">"Select a child to record a visit."</p>

            {move || {
                if store.children().get().is_empty() {
                    view! {
                        <p class="empty-state">"No children registered yet."</p>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="card-grid">
                            {store
                                .children()
                                .get()
                                .into_iter()
                                .map(|child| view! { <ChildCard child=child on_visit=on_visit /> })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}

            {move || visiting.get().map(|child| view! {
                <VisitDialog
                    child=child
                    origin=VisitOrigin::Direct
                    on_close=Callback::new(move |()| set_visiting.set(None))
                />
            })}
        </div>
    }
}
