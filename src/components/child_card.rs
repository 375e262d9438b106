//! Child Card Component
//!
//! Shared card for the visitation, queue, and area-search grids. Actions are
//! optional; a page passes only the callbacks it supports.

use leptos::prelude::*;

use crate::components::ConfirmButton;
use crate::models::{Child, ChildId};

#[component]
pub fn ChildCard(
    child: Child,
    #[prop(optional, into)] on_open: Option<Callback<ChildId>>,
    #[prop(optional, into)] on_visit: Option<Callback<Child>>,
    #[prop(optional, into)] on_edit: Option<Callback<ChildId>>,
    #[prop(optional, into)] on_remove: Option<Callback<ChildId>>,
    #[prop(optional, into)] on_queue: Option<Callback<ChildId>>,
) -> impl IntoView {
    let id = child.id;
    let visit_child = child.clone();

    view! {
        <div class="child-card">
            {child.image_url.clone().map(|url| view! {
                <img class="child-photo" src=url alt=child.full_name.clone() />
            })}
            <div class="child-card-body">
                {match on_open {
                    Some(on_open) => view! {
                        <h3 class="child-name link" on:click=move |_| on_open.run(id)>
                            {child.full_name.clone()}
                        </h3>
                    }
                    .into_any(),
                    None => view! {
                        <h3 class="child-name">{child.full_name.clone()}</h3>
                    }
                    .into_any(),
                }}
                {child.address.clone().map(|address| view! {
                    <p class="child-address">{address}</p>
                })}
                {child.class_name.clone().map(|name| view! {
                    <span class="chip">{name}</span>
                })}
            </div>
            <div class="child-card-actions">
                {on_edit.map(|on_edit| view! {
                    <button class="secondary-btn" on:click=move |_| on_edit.run(id)>
                        "Edit"
                    </button>
                })}
                {on_remove.map(|on_remove| view! {
                    <ConfirmButton
                        button_class="delete-btn"
                        label="Remove"
                        on_confirm=Callback::new(move |()| on_remove.run(id))
                    />
                })}
                {on_queue.map(|on_queue| view! {
                    <button class="secondary-btn" on:click=move |_| on_queue.run(id)>
                        "Add to queue"
                    </button>
                })}
                {on_visit.map(|on_visit| {
                    let visit_child = visit_child.clone();
                    view! {
                        <button
                            class="primary-btn"
                            on:click=move |_| on_visit.run(visit_child.clone())
                        >
                            "Visit"
                        </button>
                    }
                })}
            </div>
        </div>
    }
}
