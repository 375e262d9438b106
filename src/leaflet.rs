//! Leaflet Bindings
//!
//! Minimal `wasm-bindgen` bindings against the global `L` object, plus the
//! resolved-once [`MapEngine`] capability check. The Leaflet script and CSS
//! are network-loaded from `index.html`, so `L` may legitimately be missing
//! at startup; every map consumer must go through [`MapEngine`] first.

use wasm_bindgen::prelude::*;

use crate::models::Coordinate;

/// OpenStreetMap tile template.
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[wasm_bindgen]
extern "C" {
    /// Leaflet map instance (`L.Map`).
    pub type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn new_map(container: &web_sys::HtmlElement) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &LeafletMap, center: &JsValue, zoom: f64, options: &JsValue) -> LeafletMap;

    #[wasm_bindgen(method)]
    pub fn on(this: &LeafletMap, event: &str, handler: &js_sys::Function) -> LeafletMap;

    #[wasm_bindgen(method)]
    pub fn remove(this: &LeafletMap) -> LeafletMap;

    /// Tile layer (`L.TileLayer`).
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn new_tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayer, map: &LeafletMap) -> TileLayer;

    /// Point marker (`L.Marker`).
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn new_marker(latlng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Marker, map: &LeafletMap) -> Marker;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Marker) -> Marker;
}

/// `[lat, lng]` array in the form Leaflet accepts everywhere.
pub fn lat_lng(coord: Coordinate) -> JsValue {
    js_sys::Array::of2(&coord.lat.into(), &coord.lng.into()).into()
}

/// Options object for the base tile layer.
pub fn tile_options() -> JsValue {
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"attribution".into(), &TILE_ATTRIBUTION.into());
    options.into()
}

/// Options object for a labeled marker.
pub fn marker_options(title: &str) -> JsValue {
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"title".into(), &title.into());
    options.into()
}

/// Options object for the single selection marker; raised above the display
/// markers so it stays visible among them.
pub fn selection_options() -> JsValue {
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"zIndexOffset".into(), &1000.0.into());
    options.into()
}

/// `flyTo` options: short animated transition.
pub fn fly_options() -> JsValue {
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"duration".into(), &0.5.into());
    let _ = js_sys::Reflect::set(&options, &"animate".into(), &true.into());
    options.into()
}

/// Pull the clicked `(lat, lng)` out of a Leaflet mouse event.
pub fn event_lat_lng(event: &JsValue) -> Option<(f64, f64)> {
    let latlng = js_sys::Reflect::get(event, &"latlng".into()).ok()?;
    let lat = js_sys::Reflect::get(&latlng, &"lat".into()).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(&latlng, &"lng".into()).ok()?.as_f64()?;
    Some((lat, lng))
}

/// Whether the Leaflet script made it onto the page.
///
/// Resolved once at startup and provided through context; consumers render a
/// static placeholder instead of a map when `Unavailable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapEngine {
    Available,
    Unavailable(&'static str),
}

impl MapEngine {
    pub fn detect() -> Self {
        let loaded = web_sys::window()
            .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("L")).unwrap_or(false))
            .unwrap_or(false);
        if loaded {
            MapEngine::Available
        } else {
            MapEngine::Unavailable("map script failed to load")
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, MapEngine::Available)
    }
}
