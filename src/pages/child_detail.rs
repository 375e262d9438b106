//! Child Detail Page
//!
//! Profile, home-location map, and visit history with inline notes editing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{MapMarker, MapView, DEFAULT_ZOOM};
use crate::context::use_app_context;
use crate::models::{Child, ChildId};
use crate::pages::Page;

#[component]
pub fn ChildDetailPage(id: ChildId, set_page: WriteSignal<Page>) -> impl IntoView {
    let ctx = use_app_context();

    let (child, set_child) = signal(None::<Child>);
    let (loading, set_loading) = signal(true);
    let (editing_visit, set_editing_visit) = signal(None::<u32>);
    let (visit_notes, set_visit_notes) = signal(String::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match api::get_child(id).await {
                Ok(fetched) => set_child.set(Some(fetched)),
                Err(err) => ctx.notify_error(err.to_string()),
            }
            set_loading.set(false);
        });
    });

    let save_notes = move |visit_id: u32| {
        let notes = visit_notes.get_untracked();
        spawn_local(async move {
            match api::update_visit_notes(visit_id, &notes).await {
                Ok(()) => {
                    set_editing_visit.set(None);
                    set_visit_notes.set(String::new());
                    ctx.notify_success("Visit notes updated");
                    ctx.reload();
                }
                Err(err) => ctx.notify_error(err.to_string()),
            }
        });
    };

    view! {
        <div class="page">
            <div class="page-header">
                <button class="secondary-btn" on:click=move |_| set_page.set(Page::Children)>
                    "Back to children"
                </button>
                <button class="primary-btn" on:click=move |_| set_page.set(Page::ChildEdit(id))>
                    "Edit"
                </button>
            </div>

            {move || {
                if loading.get() {
                    return view! { <p class="empty-state">"Loading..."</p> }.into_any();
                }
                let Some(child) = child.get() else {
                    return view! { <p class="empty-state">"Child not found."</p> }.into_any();
                };
                let location = child.location();
                let markers = location
                    .map(|position| {
                        vec![MapMarker {
                            position,
                            label: child.full_name.clone(),
                        }]
                    })
                    .unwrap_or_default();
                view! {
                    <div class="detail-card">
                        {child.image_url.clone().map(|url| view! {
                            <img class="child-photo large" src=url alt=child.full_name.clone() />
                        })}
                        <h1>{child.full_name.clone()}</h1>
                        {child.date_of_birth.clone().map(|dob| view! {
                            <p>"Date of birth: " {dob}</p>
                        })}
                        {child.address.clone().map(|address| view! {
                            <p>"Address: " {address}</p>
                        })}
                        {child.class_name.clone().map(|name| view! {
                            <span class="chip">{name}</span>
                        })}
                        {child.academic_year_name.clone().map(|name| view! {
                            <span class="chip">{name}</span>
                        })}
                        {(!child.parent_phones.is_empty()).then(|| view! {
                            <ul class="phone-list">
                                {child.parent_phones.iter().map(|phone| view! {
                                    <li>{phone.phone_number.clone()}</li>
                                }).collect_view()}
                            </ul>
                        })}
                        {location.map(|position| view! {
                            <MapView
                                center=position
                                zoom=DEFAULT_ZOOM
                                markers=Signal::from(markers.clone())
                            />
                        })}
                    </div>

                    <h2>"Visit history"</h2>
                    {if child.visits.is_empty() {
                        view! { <p class="empty-state">"No visits recorded yet."</p> }.into_any()
                    } else {
                        view! {
                            <div class="visit-list">
                                {child.visits.iter().cloned().map(|visit| {
                                    let visit_id = visit.id;
                                    let is_editing = move || editing_visit.get() == Some(visit_id);
                                    let stored_notes = visit.notes.clone().unwrap_or_default();
                                    view! {
                                        <div class="visit-entry">
                                            <div class="visit-meta">
                                                {visit.user_name.clone().map(|name| view! {
                                                    <span class="visit-user">{name}</span>
                                                })}
                                                <span class="visit-date">{visit.visit_date.clone()}</span>
                                                {(visit.visit_latitude.is_some() && visit.visit_longitude.is_some())
                                                    .then(|| view! {
                                                        <span class="chip success">"Location recorded"</span>
                                                    })}
                                            </div>
                                            {move || {
                                                if is_editing() {
                                                    view! {
                                                        <textarea
                                                            rows="3"
                                                            prop:value=move || visit_notes.get()
                                                            on:input=move |ev| set_visit_notes.set(event_target_value(&ev))
                                                        ></textarea>
                                                        <div class="visit-actions">
                                                            <button class="primary-btn" on:click=move |_| save_notes(visit_id)>
                                                                "Save"
                                                            </button>
                                                            <button
                                                                class="secondary-btn"
                                                                on:click=move |_| set_editing_visit.set(None)
                                                            >
                                                                "Cancel"
                                                            </button>
                                                        </div>
                                                    }
                                                    .into_any()
                                                } else {
                                                    let stored_notes = stored_notes.clone();
                                                    view! {
                                                        <p class="visit-notes">{stored_notes.clone()}</p>
                                                        <button
                                                            class="secondary-btn"
                                                            on:click=move |_| {
                                                                set_visit_notes.set(stored_notes.clone());
                                                                set_editing_visit.set(Some(visit_id));
                                                            }
                                                        >
                                                            "Edit notes"
                                                        </button>
                                                    }
                                                    .into_any()
                                                }
                                            }}
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        }
                        .into_any()
                    }}
                }
                .into_any()
            }}
        </div>
    }
}
