//! Classes Page
//!
//! Name + description CRUD over `/classes`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::ConfirmButton;
use crate::context::use_app_context;
use crate::models::NamedUpsert;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ClassesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // None = dialog closed, Some(None) = adding, Some(Some(id)) = editing
    let (editing, set_editing) = signal(None::<Option<u32>>);
    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (saving, set_saving) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match api::list_classes().await {
                Ok(classes) => store.classes().set(classes),
                Err(err) => ctx.notify_error(err.to_string()),
            }
        });
    });

    let open_add = move |_| {
        set_name.set(String::new());
        set_description.set(String::new());
        set_editing.set(Some(None));
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let trimmed = name.get_untracked().trim().to_string();
        if trimmed.is_empty() {
            ctx.notify_error("Name is required");
            return;
        }
        let desc = description.get_untracked().trim().to_string();
        let body = NamedUpsert {
            name: trimmed,
            description: (!desc.is_empty()).then_some(desc),
        };
        let target = editing.get_untracked().flatten();
        set_saving.set(true);
        spawn_local(async move {
            let result = match target {
                Some(id) => api::update_class(id, &body).await.map(|_| ()),
                None => api::create_class(&body).await.map(|_| ()),
            };
            match result {
                Ok(()) => {
                    ctx.notify_success(if target.is_some() {
                        "Class updated"
                    } else {
                        "Class created"
                    });
                    set_editing.set(None);
                    ctx.reload();
                }
                Err(err) => ctx.notify_error(err.to_string()),
            }
            let _ = set_saving.try_set(false);
        });
    };

    let delete = move |id: u32| {
        spawn_local(async move {
            match api::delete_class(id).await {
                Ok(()) => {
                    ctx.notify_success("Class deleted");
                    ctx.reload();
                }
                Err(err) => ctx.notify_error(err.to_string()),
            }
        });
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h1>"Classes"</h1>
                <button class="primary-btn" on:click=open_add>"Add class"</button>
            </div>

            {move || {
                if store.classes().get().is_empty() {
                    view! { <p class="empty-state">"No classes yet."</p> }.into_any()
                } else {
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Description"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || store.classes().get()
                                    key=|class| (class.id, class.name.clone(), class.description.clone())
                                    children=move |class| {
                                        let id = class.id;
                                        let edit_name = class.name.clone();
                                        let edit_description = class.description.clone();
                                        view! {
                                            <tr>
                                                <td>{class.name.clone()}</td>
                                                <td>{class.description.clone().unwrap_or_default()}</td>
                                                <td class="row-actions">
                                                    <button
                                                        class="secondary-btn"
                                                        on:click=move |_| {
                                                            set_name.set(edit_name.clone());
                                                            set_description.set(
                                                                edit_description.clone().unwrap_or_default(),
                                                            );
                                                            set_editing.set(Some(Some(id)));
                                                        }
                                                    >
                                                        "Edit"
                                                    </button>
                                                    <ConfirmButton
                                                        button_class="delete-btn"
                                                        label="Delete"
                                                        on_confirm=Callback::new(move |()| delete(id))
                                                    />
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    }
                    .into_any()
                }
            }}

            {move || editing.get().map(|target| view! {
                <div class="dialog-backdrop">
                    <div class="dialog">
                        <div class="dialog-header">
                            <h2>{if target.is_some() { "Edit class" } else { "Add class" }}</h2>
                            <button type="button" class="close-btn" on:click=move |_| set_editing.set(None)>
                                "\u{00D7}"
                            </button>
                        </div>
                        <form on:submit=on_submit>
                            <label>
                                "Name"
                                <input
                                    type="text"
                                    prop:value=move || name.get()
                                    on:input=move |ev| set_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Description"
                                <input
                                    type="text"
                                    prop:value=move || description.get()
                                    on:input=move |ev| set_description.set(event_target_value(&ev))
                                />
                            </label>
                            <div class="dialog-actions">
                                <button type="button" class="secondary-btn" on:click=move |_| set_editing.set(None)>
                                    "Cancel"
                                </button>
                                <button type="submit" class="primary-btn" disabled=move || saving.get()>
                                    {move || if saving.get() { "Saving..." } else { "Save" }}
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            })}
        </div>
    }
}
