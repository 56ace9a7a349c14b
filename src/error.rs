//! Error types for the platform seams
//!
//! The simulation itself never fails; these only surface while wiring the
//! game into a host page or changing persisted preferences.

use thiserror::Error;

/// Failures while attaching to the host page
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(&'static str),
    #[error("element #{0} has an unexpected type")]
    WrongElementType(&'static str),
    #[error("2d canvas context unavailable")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
}

/// Rejected vehicle selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown vehicle '{0}'")]
    Unknown(String),
    #[error("vehicle '{0}' is locked")]
    Locked(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PlatformError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PlatformError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
