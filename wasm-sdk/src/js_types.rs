//! WASM-friendly type wrappers.
//!
//! These types wrap the core SDK types with wasm_bindgen annotations
//! for seamless JavaScript interop.

use wasm_bindgen::prelude::*;

/// A verified webhook event.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Transaction UUID.
    #[wasm_bindgen(getter_with_clone, js_name = "transactionId")]
    pub transaction_id: String,
    /// Transaction status, e.g. "completed".
    #[wasm_bindgen(getter_with_clone)]
    pub status: String,
    /// Merchant reference, if present.
    #[wasm_bindgen(getter_with_clone)]
    pub reference: Option<String>,
    /// Event type, e.g. "collection.completed".
    #[wasm_bindgen(getter_with_clone, js_name = "eventType")]
    pub event_type: Option<String>,
    raw: serde_json::Value,
}

#[wasm_bindgen]
impl WebhookEvent {
    /// The complete payload as a plain object.
    #[wasm_bindgen(getter)]
    pub fn payload(&self) -> Result<JsValue, JsValue> {
        crate::to_js_value(&self.raw)
    }

    /// Whether no further status change is expected.
    #[wasm_bindgen(js_name = "isFinal")]
    pub fn is_final(&self) -> bool {
        self.status
            .parse::<marzpay_core::TransactionStatus>()
            .map(|s| s.is_final())
            .unwrap_or(false)
    }
}

impl From<marzpay_core::WebhookEvent> for WebhookEvent {
    fn from(event: marzpay_core::WebhookEvent) -> Self {
        Self {
            transaction_id: event.transaction.uuid,
            status: event.transaction.status.to_string(),
            reference: event.transaction.reference,
            event_type: event.event_type,
            raw: event.raw,
        }
    }
}
