//! Outreach Console Entry Point

mod api;
mod app;
mod components;
mod context;
mod geolocation;
mod leaflet;
mod models;
mod pages;
mod store;
mod workflow;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
