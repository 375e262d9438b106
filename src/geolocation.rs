//! Geolocation Provider
//!
//! Wraps the browser's callback-based `getCurrentPosition` into a single
//! awaitable returning either a validated [`Coordinate`] or a classified
//! [`GeoError`]. The provider never touches the queue or the API; callers
//! decide what a failed fix means for their workflow.

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::models::Coordinate;

/// Hardware timeout for a position fix.
pub const GEOLOCATION_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("Location permission was denied")]
    PermissionDenied,
    #[error("Current position is unavailable")]
    PositionUnavailable,
    #[error("Timed out waiting for a location fix")]
    Timeout,
    #[error("This browser does not support geolocation")]
    Unsupported,
    #[error("Device reported an invalid coordinate")]
    InvalidCoordinate,
    #[error("Unable to get current location")]
    Unknown,
}

/// Request a single fresh position fix.
///
/// High accuracy, 15 s timeout, caching disabled: a stale cached position
/// could silently misattribute a visit's location. One-shot; a result that
/// arrives after the caller went away is simply dropped.
pub async fn current_position() -> Result<Coordinate, GeoError> {
    let geolocation = web_sys::window()
        .and_then(|w| w.navigator().geolocation().ok())
        .ok_or(GeoError::Unsupported)?;

    let options = web_sys::PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(GEOLOCATION_TIMEOUT_MS);
    options.set_maximum_age(0);

    let promise = Promise::new(&mut |resolve, reject| {
        let on_success = Closure::once_into_js(move |position: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &position);
        });
        let on_error = Closure::once_into_js(move |err: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &err);
        });
        geolocation.get_current_position_with_error_callback_and_options(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
            &options,
        );
    });

    match JsFuture::from(promise).await {
        Ok(position) => {
            let position: web_sys::GeolocationPosition = position.unchecked_into();
            let coords = position.coords();
            Coordinate::new(coords.latitude(), coords.longitude()).ok_or(GeoError::InvalidCoordinate)
        }
        Err(err) => Err(classify(&err)),
    }
}

fn classify(err: &JsValue) -> GeoError {
    let Some(err) = err.dyn_ref::<web_sys::GeolocationPositionError>() else {
        return GeoError::Unknown;
    };
    match err.code() {
        web_sys::GeolocationPositionError::PERMISSION_DENIED => GeoError::PermissionDenied,
        web_sys::GeolocationPositionError::POSITION_UNAVAILABLE => GeoError::PositionUnavailable,
        web_sys::GeolocationPositionError::TIMEOUT => GeoError::Timeout,
        _ => GeoError::Unknown,
    }
}
