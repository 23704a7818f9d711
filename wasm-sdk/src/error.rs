//! Error conversion utilities for WASM.

use marzpay_core::{Error, ErrorKind};
use wasm_bindgen::prelude::*;

fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Connectivity => "connectivity",
        ErrorKind::Api => "api",
        ErrorKind::Validation => "validation",
        ErrorKind::Decode => "decode",
        ErrorKind::Other => "other",
    }
}

/// Convert an SDK error into a JavaScript `Error`.
///
/// The error carries a `kind` property; API errors also carry `code`,
/// `status` and `details`, validation errors carry `errors`.
pub fn to_js_error(err: Error) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    let obj: &JsValue = js_err.as_ref();

    let set = |key: &str, value: JsValue| {
        // Setting a property on a fresh Error object cannot fail.
        let _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), &value);
    };

    set("kind", JsValue::from_str(kind_name(err.kind())));
    match &err {
        Error::Api(api) => {
            set("code", JsValue::from_str(&api.code));
            set("status", JsValue::from_f64(f64::from(api.status)));
            if let Some(details) = &api.details {
                set(
                    "details",
                    crate::to_js_value(details).unwrap_or(JsValue::NULL),
                );
            }
        }
        Error::Validation { errors, .. } => {
            set("errors", crate::to_js_value(errors).unwrap_or(JsValue::NULL));
        }
        _ => {}
    }

    js_err.into()
}

/// Macro to convert Rust errors to JavaScript values.
#[macro_export]
macro_rules! map_err_to_js {
    ($expr:expr) => {
        $expr.map_err($crate::error::to_js_error)
    };
}
