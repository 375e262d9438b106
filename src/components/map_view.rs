//! Map View Component
//!
//! Leaflet-backed map surface: base tiles, labeled point markers, an optional
//! selection marker, click-to-pick, and a "use my location" button. Map
//! clicks and located positions feed the same `on_pick` channel. When the
//! Leaflet script never loaded, renders a static placeholder instead.

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use crate::context::use_app_context;
use crate::geolocation;
use crate::leaflet::{self, LeafletMap, MapEngine, TILE_URL};
use crate::models::Coordinate;

/// Default zoom for neighborhood-scale views.
pub const DEFAULT_ZOOM: f64 = 13.0;
/// Zoom applied after a successful device-location fix.
const LOCATE_ZOOM: f64 = 15.0;

/// Ignore re-center requests closer than this to the applied view; the
/// coordinate round-trips through floating point and would jitter otherwise.
pub const RECENTER_TOLERANCE_DEG: f64 = 1e-4;

/// A labeled point to render on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub position: Coordinate,
    pub label: String,
}

/// Whether `next` differs enough from the applied view to warrant an
/// animated transition.
pub fn view_changed(applied: Option<(Coordinate, f64)>, next: (Coordinate, f64)) -> bool {
    match applied {
        None => true,
        Some((center, zoom)) => {
            (center.lat - next.0.lat).abs() > RECENTER_TOLERANCE_DEG
                || (center.lng - next.0.lng).abs() > RECENTER_TOLERANCE_DEG
                || zoom != next.1
        }
    }
}

/// Everything owned by one mounted map, torn down exactly once.
#[derive(Default)]
struct MapState {
    map: Option<LeafletMap>,
    markers: Vec<leaflet::Marker>,
    selection: Option<leaflet::Marker>,
    applied: Option<(Coordinate, f64)>,
    click_handler: Option<Closure<dyn FnMut(JsValue)>>,
    torn_down: bool,
}

#[component]
pub fn MapView(
    #[prop(into)] center: Signal<Coordinate>,
    #[prop(into)] zoom: Signal<f64>,
    #[prop(optional, into)] markers: Option<Signal<Vec<MapMarker>>>,
    #[prop(optional, into)] selection: Option<Signal<Option<Coordinate>>>,
    #[prop(optional, into)] on_pick: Option<Callback<Coordinate>>,
) -> impl IntoView {
    let markers = markers.unwrap_or_else(|| Signal::from(Vec::new()));
    let selection = selection.unwrap_or_else(|| Signal::from(None));
    let engine = expect_context::<MapEngine>();
    if let MapEngine::Unavailable(reason) = engine {
        web_sys::console::warn_1(&format!("[MAP] {reason}, rendering fallback").into());
        return view! {
            <div class="map-fallback">"Map unavailable"</div>
        }
        .into_any();
    }

    let ctx = use_app_context();
    // Leaflet handles are JS objects; keep them in an arena slot scoped to
    // this component rather than in a Send-bounded signal.
    let state = StoredValue::new_local(MapState::default());
    let node_ref: NodeRef<Div> = NodeRef::new();

    // The view the map actually shows. Seeded from props, nudged to the
    // device position by the locate button.
    let (view_center, set_view_center) = signal(center.get_untracked());
    let (view_zoom, set_view_zoom) = signal(zoom.get_untracked());
    Effect::new(move |_| set_view_center.set(center.get()));
    Effect::new(move |_| set_view_zoom.set(zoom.get()));

    // Engine init, once the container exists. Teardown can outrun this
    // effect on fast unmounts; the torn_down flag keeps a late init from
    // attaching to a dead component.
    Effect::new(move |_| {
        let Some(container) = node_ref.get() else {
            return;
        };
        state.update_value(|st| {
            if st.torn_down || st.map.is_some() {
                return;
            }

            let map = leaflet::new_map(&container);
            leaflet::new_tile_layer(TILE_URL, &leaflet::tile_options()).add_to(&map);
            let c = view_center.get_untracked();
            let z = view_zoom.get_untracked();
            map.set_view(&leaflet::lat_lng(c), z);
            st.applied = Some((c, z));

            if let Some(on_pick) = on_pick {
                let handler = Closure::wrap(Box::new(move |event: JsValue| {
                    if let Some((lat, lng)) = leaflet::event_lat_lng(&event) {
                        if let Some(coord) = Coordinate::new(lat, lng) {
                            on_pick.run(coord);
                        }
                    }
                }) as Box<dyn FnMut(JsValue)>);
                map.on("click", handler.as_ref().unchecked_ref());
                st.click_handler = Some(handler);
            }
            st.map = Some(map);
        });
    });

    // Animated re-center, with the tolerance guard.
    Effect::new(move |_| {
        let next = (view_center.get(), view_zoom.get());
        state.update_value(|st| {
            if st.torn_down {
                return;
            }
            let Some(map) = st.map.as_ref() else {
                return;
            };
            if view_changed(st.applied, next) {
                map.fly_to(&leaflet::lat_lng(next.0), next.1, &leaflet::fly_options());
                st.applied = Some(next);
            }
        });
    });

    // Display markers: replace the whole set when the list changes.
    Effect::new(move |_| {
        let desired = markers.get();
        state.update_value(|st| {
            if st.torn_down || st.map.is_none() {
                return;
            }
            let mut handles = Vec::with_capacity(desired.len());
            {
                let map = st.map.as_ref().unwrap();
                for marker in &desired {
                    let handle = leaflet::new_marker(
                        &leaflet::lat_lng(marker.position),
                        &leaflet::marker_options(&marker.label),
                    );
                    handle.add_to(map);
                    handles.push(handle);
                }
            }
            let old = std::mem::replace(&mut st.markers, handles);
            for handle in old {
                handle.remove();
            }
        });
    });

    // Selection marker.
    Effect::new(move |_| {
        let picked = selection.get();
        state.update_value(|st| {
            if st.torn_down || st.map.is_none() {
                return;
            }
            if let Some(old) = st.selection.take() {
                old.remove();
            }
            if let Some(coord) = picked {
                let handle =
                    leaflet::new_marker(&leaflet::lat_lng(coord), &leaflet::selection_options());
                handle.add_to(st.map.as_ref().unwrap());
                st.selection = Some(handle);
            }
        });
    });

    on_cleanup(move || {
        let _ = state.try_update_value(|st| {
            st.torn_down = true;
            for handle in st.markers.drain(..) {
                handle.remove();
            }
            if let Some(selection) = st.selection.take() {
                selection.remove();
            }
            if let Some(map) = st.map.take() {
                map.remove();
            }
            st.click_handler = None;
        });
    });

    // Device geolocation: same pick channel as a map click.
    let (locating, set_locating) = signal(false);
    let locate = move |_| {
        if locating.get_untracked() {
            return;
        }
        set_locating.set(true);
        spawn_local(async move {
            let result = geolocation::current_position().await;
            if state.try_with_value(|st| st.torn_down).unwrap_or(true) {
                // fix arrived after unmount, drop it
                return;
            }
            match result {
                Ok(coord) => {
                    set_view_center.set(coord);
                    set_view_zoom.set(LOCATE_ZOOM);
                    if let Some(on_pick) = on_pick {
                        on_pick.run(coord);
                    }
                }
                Err(err) => ctx.notify_error(err.to_string()),
            }
            let _ = set_locating.try_set(false);
        });
    };

    view! {
        <div class="map-wrapper">
            <div class="map-container" node_ref=node_ref></div>
            <button
                type="button"
                class="locate-btn"
                title="Use my current location"
                disabled=move || locating.get()
                on:click=locate
            >
                {move || if locating.get() { "..." } else { "\u{25CE}" }}
            </button>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn first_view_always_applies() {
        assert!(view_changed(None, (coord(30.0, 31.0), 13.0)));
    }

    #[test]
    fn sub_tolerance_drift_does_not_recenter() {
        let applied = Some((coord(30.04440, 31.23570), 13.0));
        assert!(!view_changed(applied, (coord(30.04441, 31.23571), 13.0)));
    }

    #[test]
    fn real_moves_recenter() {
        let applied = Some((coord(30.04440, 31.23570), 13.0));
        assert!(view_changed(applied, (coord(31.0, 31.0), 13.0)));
    }

    #[test]
    fn zoom_change_recenters() {
        let applied = Some((coord(30.0444, 31.2357), 13.0));
        assert!(view_changed(applied, (coord(30.0444, 31.2357), 15.0)));
    }
}
