//! Find By Area Page
//!
//! Two search modes against the same result list: address-substring search,
//! and radius search around a point picked on the map (or the device
//! position). Results render as map markers and cards.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ChildCard, MapMarker, MapView, DEFAULT_ZOOM};
use crate::context::{use_app_context, Severity};
use crate::models::{Child, ChildId, Coordinate, DEFAULT_CENTER};
use crate::pages::Page;
use crate::store::use_visit_queue;

const DEFAULT_RADIUS_KM: f64 = 5.0;

#[component]
pub fn FindByAreaPage(set_page: WriteSignal<Page>) -> impl IntoView {
    let ctx = use_app_context();
    let queue = use_visit_queue();

    let (results, set_results) = signal(Vec::<Child>::new());
    let (address, set_address) = signal(String::new());
    let (radius_km, set_radius_km) = signal(DEFAULT_RADIUS_KM);
    let (map_center, set_map_center) = signal(DEFAULT_CENTER);
    let (picked, set_picked) = signal(None::<Coordinate>);
    let (loading, set_loading) = signal(false);

    let on_address_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let term = address.get_untracked().trim().to_string();
        if term.is_empty() {
            ctx.notify(Severity::Warning, "Enter part of an address first");
            return;
        }
        set_loading.set(true);
        spawn_local(async move {
            match api::search_by_address(&term).await {
                Ok(children) => {
                    if let Some(coord) = children.first().and_then(Child::location) {
                        set_map_center.set(coord);
                    }
                    set_results.set(children);
                }
                Err(err) => ctx.notify_error(err.to_string()),
            }
            set_loading.set(false);
        });
    };

    // A map pick or a located position both run a radius query around it.
    let on_pick = Callback::new(move |coord: Coordinate| {
        set_picked.set(Some(coord));
        set_map_center.set(coord);
        let radius = radius_km.get_untracked();
        set_loading.set(true);
        spawn_local(async move {
            match api::search_by_location(coord, radius).await {
                Ok(children) => set_results.set(children),
                Err(err) => ctx.notify_error(err.to_string()),
            }
            set_loading.set(false);
        });
    });

    let markers = Signal::derive(move || {
        results
            .get()
            .iter()
            .filter_map(|child| {
                child.location().map(|position| MapMarker {
                    position,
                    label: child.full_name.clone(),
                })
            })
            .collect::<Vec<_>>()
    });

    let on_open = Callback::new(move |id: ChildId| set_page.set(Page::ChildDetail(id)));

    let queue_for_add = queue.clone();
    let on_queue = Callback::new(move |id: ChildId| {
        if queue_for_add.add(id) {
            ctx.queue_changed();
            ctx.notify_success("Child added to queue");
        } else {
            ctx.notify(Severity::Info, "Child is already in the queue");
        }
    });

    view! {
        <div class="page">
            <h1>"Find by area"</h1>

            <form class="search-form" on:submit=on_address_search>
                <input
                    type="text"
                    placeholder="Part of an address..."
                    prop:value=move || address.get()
                    on:input=move |ev| set_address.set(event_target_value(&ev))
                />
                <button type="submit" class="secondary-btn" disabled=move || loading.get()>
                    {move || if loading.get() { "Searching..." } else { "Search" }}
                </button>
            </form>

            <label class="radius-row">
                "Radius (km)"
                <input
                    type="number"
                    min="1"
                    max="50"
                    prop:value=move || radius_km.get().to_string()
                    on:input=move |ev| {
                        if let Ok(radius) = event_target_value(&ev).parse::<f64>() {
                            if radius.is_finite() && radius > 0.0 {
                                set_radius_km.set(radius);
                            }
                        }
                    }
                />
            </label>

            <p class="hint">"Tap the map (or locate yourself) to search around a point."</p>
            <MapView
                center=map_center
                zoom=DEFAULT_ZOOM
                markers=markers
                selection={Signal::<Option<Coordinate>>::from(picked)}
                on_pick=on_pick
            />

            {move || {
                let found = results.get();
                if found.is_empty() {
                    view! { <p class="empty-state">"No children in this area yet."</p> }.into_any()
                } else {
                    view! {
                        <div class="card-grid">
                            {found
                                .into_iter()
                                .map(|child| view! {
                                    <ChildCard child=child on_open=on_open on_queue=on_queue />
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
