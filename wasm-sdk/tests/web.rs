//! Tests for the JavaScript bindings.
//!
//! Run with: wasm-pack test --node wasm-sdk

#![cfg(target_arch = "wasm32")]

use marzpay_wasm_sdk::{Client, WebhookHandler, format_phone_number, is_valid_phone_number};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn error_kind(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("kind"))
        .unwrap()
        .as_string()
        .unwrap()
}

fn test_client() -> Client {
    Client::new(
        "key".to_string(),
        "secret".to_string(),
        Some("http://127.0.0.1:9".to_string()),
        Some(500),
    )
    .unwrap()
}

#[wasm_bindgen_test]
fn phone_numbers() {
    assert_eq!(format_phone_number("0759983853").unwrap(), "256759983853");
    assert!(is_valid_phone_number("+256 772 123 456"));
    assert!(!is_valid_phone_number("12345"));
    assert!(format_phone_number("abc").is_err());
}

#[wasm_bindgen_test]
fn webhook_signature() {
    let handler = WebhookHandler::new("whsec".to_string());
    let payload = br#"{"event_type": "collection.completed", "transaction": {"uuid": "T1", "reference": "R1", "status": "completed"}}"#;
    let signature = handler.sign(payload);

    let event = handler.verify(payload, &signature).unwrap();
    assert_eq!(event.transaction_id, "T1");
    assert_eq!(event.status, "completed");
    assert_eq!(event.reference.as_deref(), Some("R1"));
    assert!(event.is_final());

    assert!(!handler.is_valid(b"{}", &signature));
    assert!(handler.verify(b"{}", &signature).is_err());
}

#[wasm_bindgen_test]
async fn empty_account_update_is_rejected_locally() {
    let err = test_client()
        .update_account(None, None, None, None)
        .await
        .unwrap_err();
    assert_eq!(error_kind(&err), "validation");
}

#[wasm_bindgen_test]
async fn webhook_management_validates_input() {
    let client = test_client();

    let err = client
        .create_webhook(Some("ftp://x".to_string()), None, None, None)
        .await
        .unwrap_err();
    assert_eq!(error_kind(&err), "validation");

    let err = client.delete_webhook(String::new()).await.unwrap_err();
    assert_eq!(error_kind(&err), "validation");

    let err = client.get_service("a/b".to_string()).await.unwrap_err();
    assert_eq!(error_kind(&err), "validation");
}
