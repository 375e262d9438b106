//! REST Client
//!
//! JSON-over-HTTP bindings to the backend, built on the browser `fetch` API.
//! Request bodies go out as `serde_json` strings; responses come back as
//! `JsValue` and are decoded with `serde_wasm_bindgen`.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::models::{
    AcademicYear, Child, ChildId, ChildUpsert, ClassRoom, Coordinate, DashboardStats, NamedUpsert,
    NewVisit,
};

/// API root. Overridable at build time, defaults to a same-origin prefix.
pub fn api_base() -> &'static str {
    option_env!("API_BASE").unwrap_or("/api")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Unexpected response payload: {0}")]
    Decode(String),
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn encode(term: &str) -> String {
    utf8_percent_encode(term, NON_ALPHANUMERIC).to_string()
}

/// One fetch round-trip; non-2xx statuses become `ApiError::Status`.
async fn request(method: &str, path: &str, body: Option<String>) -> Result<web_sys::Response, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;

    let init = web_sys::RequestInit::new();
    init.set_method(method);
    if let Some(body) = &body {
        init.set_body(&JsValue::from_str(body));
    }

    let url = format!("{}{}", api_base(), path);
    let request = web_sys::Request::new_with_str_and_init(&url, &init)
        .map_err(|e| ApiError::Network(js_message(&e)))?;
    if body.is_some() {
        let _ = request.headers().set("Content-Type", "application/json");
    }
    let _ = request.headers().set("Accept", "application/json");

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(js_message(&e)))?;
    let response: web_sys::Response = response.unchecked_into();

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: web_sys::Response) -> Result<T, ApiError> {
    let promise = response.json().map_err(|e| ApiError::Decode(js_message(&e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Decode(js_message(&e)))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    decode(request("GET", path, None).await?).await
}

async fn send_json<B: Serialize, T: DeserializeOwned>(
    method: &str,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    decode(request(method, path, Some(body)).await?).await
}

async fn send_json_no_response<B: Serialize>(
    method: &str,
    path: &str,
    body: &B,
) -> Result<(), ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    request(method, path, Some(body)).await?;
    Ok(())
}

// ========================
// Children
// ========================

pub async fn list_children() -> Result<Vec<Child>, ApiError> {
    get_json("/children").await
}

pub async fn search_children(term: &str) -> Result<Vec<Child>, ApiError> {
    get_json(&format!("/children?search={}", encode(term))).await
}

pub async fn get_child(id: ChildId) -> Result<Child, ApiError> {
    get_json(&format!("/children/{id}")).await
}

pub async fn search_by_address(address_part: &str) -> Result<Vec<Child>, ApiError> {
    get_json(&format!("/children/search-by-address?addressPart={}", encode(address_part))).await
}

pub async fn search_by_location(center: Coordinate, radius_km: f64) -> Result<Vec<Child>, ApiError> {
    get_json(&format!(
        "/children/search-by-location?latitude={}&longitude={}&radiusKm={}",
        center.lat, center.lng, radius_km
    ))
    .await
}

pub async fn create_child(child: &ChildUpsert) -> Result<Child, ApiError> {
    send_json("POST", "/children", child).await
}

pub async fn update_child(id: ChildId, child: &ChildUpsert) -> Result<Child, ApiError> {
    send_json("PUT", &format!("/children/{id}"), child).await
}

pub async fn delete_child(id: ChildId) -> Result<(), ApiError> {
    request("DELETE", &format!("/children/{id}"), None).await?;
    Ok(())
}

// ========================
// Visits
// ========================

pub async fn create_visit(visit: &NewVisit) -> Result<(), ApiError> {
    send_json_no_response("POST", "/visits", visit).await
}

#[derive(Serialize)]
struct VisitNotes<'a> {
    notes: &'a str,
}

pub async fn update_visit_notes(visit_id: u32, notes: &str) -> Result<(), ApiError> {
    send_json_no_response("PUT", &format!("/visits/{visit_id}"), &VisitNotes { notes }).await
}

// ========================
// Classes
// ========================

pub async fn list_classes() -> Result<Vec<ClassRoom>, ApiError> {
    get_json("/classes").await
}

pub async fn create_class(body: &NamedUpsert) -> Result<ClassRoom, ApiError> {
    send_json("POST", "/classes", body).await
}

pub async fn update_class(id: u32, body: &NamedUpsert) -> Result<ClassRoom, ApiError> {
    send_json("PUT", &format!("/classes/{id}"), body).await
}

pub async fn delete_class(id: u32) -> Result<(), ApiError> {
    request("DELETE", &format!("/classes/{id}"), None).await?;
    Ok(())
}

// ========================
// Academic Years
// ========================

pub async fn list_academic_years() -> Result<Vec<AcademicYear>, ApiError> {
    get_json("/academicyears").await
}

pub async fn create_academic_year(body: &NamedUpsert) -> Result<AcademicYear, ApiError> {
    send_json("POST", "/academicyears", body).await
}

pub async fn update_academic_year(id: u32, body: &NamedUpsert) -> Result<AcademicYear, ApiError> {
    send_json("PUT", &format!("/academicyears/{id}"), body).await
}

pub async fn delete_academic_year(id: u32) -> Result<(), ApiError> {
    request("DELETE", &format!("/academicyears/{id}"), None).await?;
    Ok(())
}

// ========================
// Dashboard
// ========================

pub async fn dashboard_stats() -> Result<DashboardStats, ApiError> {
    get_json("/dashboard/stats").await
}
