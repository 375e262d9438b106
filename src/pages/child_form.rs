//! Child Form Page
//!
//! Add/edit form: identity fields, class and academic-year selects, dynamic
//! parent-phone rows, and a map-based home-location picker.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{MapView, DEFAULT_ZOOM};
use crate::context::use_app_context;
use crate::models::{ChildId, ChildUpsert, Coordinate, ParentPhone, DEFAULT_CENTER};
use crate::pages::Page;
use crate::store::{use_app_store, AppStateStoreFields};

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim().to_string();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[component]
pub fn ChildFormPage(
    #[prop(optional, into)] existing: Option<ChildId>,
    set_page: WriteSignal<Page>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (full_name, set_full_name) = signal(String::new());
    let (date_of_birth, set_date_of_birth) = signal(String::new());
    let (address, set_address) = signal(String::new());
    let (class_id, set_class_id) = signal(String::new());
    let (year_id, set_year_id) = signal(String::new());
    let phones = RwSignal::new(vec![String::new()]);
    let (location, set_location) = signal(None::<Coordinate>);
    let (map_center, set_map_center) = signal(DEFAULT_CENTER);
    let (saving, set_saving) = signal(false);

    // Select options.
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(classes) = api::list_classes().await {
                store.classes().set(classes);
            }
            if let Ok(years) = api::list_academic_years().await {
                store.academic_years().set(years);
            }
        });
    });

    // Seed fields when editing.
    Effect::new(move |_| {
        let Some(id) = existing else {
            return;
        };
        spawn_local(async move {
            match api::get_child(id).await {
                Ok(child) => {
                    set_full_name.set(child.full_name.clone());
                    set_date_of_birth.set(child.date_of_birth.clone().unwrap_or_default());
                    set_address.set(child.address.clone().unwrap_or_default());
                    set_class_id.set(child.class_id.map(|v| v.to_string()).unwrap_or_default());
                    set_year_id.set(
                        child
                            .academic_year_id
                            .map(|v| v.to_string())
                            .unwrap_or_default(),
                    );
                    let stored: Vec<String> = child
                        .parent_phones
                        .iter()
                        .map(|p| p.phone_number.clone())
                        .collect();
                    phones.set(if stored.is_empty() { vec![String::new()] } else { stored });
                    if let Some(coord) = child.location() {
                        set_location.set(Some(coord));
                        set_map_center.set(coord);
                    }
                }
                Err(err) => ctx.notify_error(err.to_string()),
            }
        });
    });

    let on_pick = Callback::new(move |coord: Coordinate| {
        set_location.set(Some(coord));
        set_map_center.set(coord);
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let Some(name) = non_empty(full_name.get_untracked()) else {
            ctx.notify_error("Full name is required");
            return;
        };
        let coord = location.get_untracked();
        let body = ChildUpsert {
            full_name: name,
            date_of_birth: non_empty(date_of_birth.get_untracked()),
            address: non_empty(address.get_untracked()),
            latitude: coord.map(|c| c.lat),
            longitude: coord.map(|c| c.lng),
            class_id: class_id.get_untracked().parse().ok(),
            academic_year_id: year_id.get_untracked().parse().ok(),
            parent_phones: phones
                .get_untracked()
                .into_iter()
                .filter_map(non_empty)
                .map(|phone_number| ParentPhone {
                    phone_number,
                    label: None,
                })
                .collect(),
        };
        set_saving.set(true);
        spawn_local(async move {
            let result = match existing {
                Some(id) => api::update_child(id, &body).await.map(|_| ()),
                None => api::create_child(&body).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    ctx.notify_success(if existing.is_some() {
                        "Child updated"
                    } else {
                        "Child created"
                    });
                    ctx.reload();
                    set_page.set(Page::Children);
                }
                Err(err) => {
                    ctx.notify_error(err.to_string());
                    let _ = set_saving.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="page">
            <h1>{if existing.is_some() { "Edit child" } else { "Add child" }}</h1>

            <form class="child-form" on:submit=on_submit>
                <label>
                    "Full name"
                    <input
                        type="text"
                        prop:value=move || full_name.get()
                        on:input=move |ev| set_full_name.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Date of birth"
                    <input
                        type="date"
                        prop:value=move || date_of_birth.get()
                        on:input=move |ev| set_date_of_birth.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Address"
                    <input
                        type="text"
                        prop:value=move || address.get()
                        on:input=move |ev| set_address.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Class"
                    <select
                        prop:value=move || class_id.get()
                        on:change=move |ev| set_class_id.set(event_target_value(&ev))
                    >
                        <option value="">"None"</option>
                        <For
                            each=move || store.classes().get()
                            key=|class| (class.id, class.name.clone())
                            children=move |class| {
                                view! {
                                    <option value=class.id.to_string()>{class.name.clone()}</option>
                                }
                            }
                        />
                    </select>
                </label>

                <label>
                    "Academic year"
                    <select
                        prop:value=move || year_id.get()
                        on:change=move |ev| set_year_id.set(event_target_value(&ev))
                    >
                        <option value="">"None"</option>
                        <For
                            each=move || store.academic_years().get()
                            key=|year| (year.id, year.name.clone())
                            children=move |year| {
                                view! {
                                    <option value=year.id.to_string()>{year.name.clone()}</option>
                                }
                            }
                        />
                    </select>
                </label>

                <fieldset class="phone-rows">
                    <legend>"Parent phones"</legend>
                    <For
                        each={move || phones.get().into_iter().enumerate().collect::<Vec<_>>()}
                        key=|(index, _)| *index
                        children=move |(index, value)| {
                            view! {
                                <div class="phone-row">
                                    <input
                                        type="tel"
                                        prop:value=value.clone()
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            phones.update(|list| {
                                                if let Some(slot) = list.get_mut(index) {
                                                    *slot = value.clone();
                                                }
                                            });
                                        }
                                    />
                                    <button
                                        type="button"
                                        class="secondary-btn"
                                        on:click=move |_| {
                                            phones.update(|list| {
                                                if list.len() > 1 {
                                                    list.remove(index);
                                                }
                                            });
                                        }
                                    >
                                        "Remove"
                                    </button>
                                </div>
                            }
                        }
                    />
                    <button
                        type="button"
                        class="secondary-btn"
                        on:click=move |_| phones.update(|list| list.push(String::new()))
                    >
                        "Add phone"
                    </button>
                </fieldset>

                <p class="hint">"Tap the map to set the home location."</p>
                <MapView
                    center=map_center
                    zoom=DEFAULT_ZOOM
                    selection={Signal::<Option<Coordinate>>::from(location)}
                    on_pick=on_pick
                />

                <div class="dialog-actions">
                    <button
                        type="button"
                        class="secondary-btn"
                        on:click=move |_| set_page.set(Page::Children)
                    >
                        "Cancel"
                    </button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
