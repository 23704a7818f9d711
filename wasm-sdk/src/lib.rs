//! MarzPay Client SDK - WASM Bindings
//!
//! This crate provides WebAssembly bindings for the MarzPay Client SDK.
//! It wraps the core library with WASM-compatible types and JavaScript interop.
//!
//! **Note:** This crate is WASM-only and will not compile for native targets.
//!
//! # Usage from JavaScript/TypeScript
//!
//! ```javascript
//! import init, { Client, WebhookHandler } from '@marzpay/sdk';
//!
//! // Initialize WASM
//! await init();
//!
//! const client = new Client(apiKey, apiSecret);
//!
//! const result = await client.collectMoney(
//!     5000,
//!     '0759983853',
//!     client.generateReference(),
//!     'Payment for services'
//! );
//! console.log(result.data.collection_id);
//!
//! // In the webhook endpoint
//! const handler = new WebhookHandler(webhookSecret);
//! const event = handler.verify(new Uint8Array(body), req.headers['x-marz-signature']);
//! console.log(event.transactionId, event.status);
//! ```

// This crate only compiles for WASM targets
#![cfg(target_arch = "wasm32")]

mod client;
mod error;
mod js_types;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use client::*;
pub use error::*;
pub use js_types::*;

/// Initialize the WASM module.
///
/// This sets up logging and panic hooks for better debugging.
#[wasm_bindgen(start)]
pub fn initialize() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(log::Level::Debug).ok();
    log::info!("MarzPay SDK initialized");
}

/// Serialize a value to JsValue as a plain object (not a Map).
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Normalise a Ugandan mobile number to the `256XXXXXXXXX` form.
#[wasm_bindgen(js_name = "formatPhoneNumber")]
pub fn format_phone_number(phone_number: &str) -> Result<String, JsValue> {
    map_err_to_js!(marzpay_core::phone::format_phone_number(phone_number))
}

#[wasm_bindgen(js_name = "isValidPhoneNumber")]
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    marzpay_core::phone::is_valid_phone_number(phone_number)
}

/// Name of the header carrying the webhook signature.
#[wasm_bindgen(js_name = "webhookSignatureHeader")]
pub fn webhook_signature_header() -> String {
    marzpay_core::webhook::SIGNATURE_HEADER.to_string()
}
