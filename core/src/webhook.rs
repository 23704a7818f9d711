//! Validation of inbound webhook calls.
//!
//! MarzPay POSTs a JSON body to the merchant's callback URL and signs it with
//! the shared webhook secret. [`WebhookHandler::verify`] checks the signature
//! over the raw body bytes and only then parses the payload. Nothing here
//! touches the network.
//!
//! The signature scheme sits behind [`SignatureVerifier`], with
//! [`HmacSha256Verifier`] as the default.
//!
//! # Example
//!
//! ```rust,ignore
//! use marzpay_core::webhook::{WebhookHandler, SIGNATURE_HEADER};
//!
//! let handler = WebhookHandler::new(webhook_secret);
//! let signature = headers.get(SIGNATURE_HEADER).unwrap_or_default();
//! let event = handler.verify(&body, signature)?;
//! println!("{} is now {}", event.transaction_id(), event.status());
//! ```

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::types::TransactionStatus;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signature of the webhook body.
pub const SIGNATURE_HEADER: &str = "X-Marz-Signature";

/// Strategy deciding whether a signature matches a payload.
pub trait SignatureVerifier: Send + Sync {
    /// Returns `true` when `signature` is valid for the raw `payload`.
    fn verify(&self, payload: &[u8], signature: &str) -> bool;
}

/// Hex-encoded HMAC-SHA256 of the raw body, keyed with the webhook secret.
///
/// A leading `sha256=` on the signature is accepted.
#[derive(Clone)]
pub struct HmacSha256Verifier {
    secret: Vec<u8>,
}

impl HmacSha256Verifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self, payload: &[u8]) -> HmacSha256 {
        // HMAC accepts keys of any length.
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret)
            .unwrap_or_else(|_| unreachable!("HMAC can take key of any size"));
        mac.update(payload);
        mac
    }

    /// Compute the signature MarzPay would send for `payload`.
    pub fn sign(&self, payload: &[u8]) -> String {
        hex::encode(self.mac(payload).finalize().into_bytes())
    }
}

impl std::fmt::Debug for HmacSha256Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSha256Verifier").finish_non_exhaustive()
    }
}

impl SignatureVerifier for HmacSha256Verifier {
    fn verify(&self, payload: &[u8], signature: &str) -> bool {
        let signature = signature.trim();
        let signature = signature.strip_prefix("sha256=").unwrap_or(signature);
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        // Constant-time comparison.
        self.mac(payload).verify_slice(&expected).is_ok()
    }
}

/// Transaction data carried by a webhook.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookTransaction {
    /// Taken from `uuid`, else `transaction_id`, else `id`.
    pub uuid: String,
    pub status: TransactionStatus,
    pub reference: Option<String>,
    pub amount: Option<Value>,
    pub provider: Option<String>,
    pub phone_number: Option<String>,
    /// Every other key, including id fields not used for `uuid`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookTransaction {
    fn from_fields(mut fields: Map<String, Value>) -> Result<Self> {
        let id_key = ["uuid", "transaction_id", "id"]
            .into_iter()
            .find(|key| id_text(fields.get(*key)).is_some())
            .ok_or_else(|| Error::Parse("Webhook payload has no transaction id".to_string()))?;
        let uuid = fields
            .remove(id_key)
            .and_then(|v| id_text(Some(&v)))
            .unwrap_or_default();

        let status = match fields.remove("status") {
            Some(value) => TransactionStatus::deserialize(value)
                .map_err(|e| Error::Parse(format!("Invalid webhook status: {}", e)))?,
            None => return Err(Error::Parse("Webhook payload has no status".to_string())),
        };

        let mut text = |key: &str| match fields.remove(key) {
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                fields.insert(key.to_string(), other);
                None
            }
            None => None,
        };
        let reference = text("reference");
        let provider = text("provider");
        let phone_number = text("phone_number");
        let amount = fields.remove("amount");

        Ok(Self {
            uuid,
            status,
            reference,
            amount,
            provider,
            phone_number,
            extra: fields,
        })
    }
}

fn id_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A verified webhook payload.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookEvent {
    /// e.g. `collection.completed`.
    pub event_type: Option<String>,
    pub transaction: WebhookTransaction,
    /// The complete payload as received.
    pub raw: Value,
}

impl WebhookEvent {
    /// Parse a payload. Accepts both the nested form
    /// (`{"event_type": .., "transaction": {..}}`) and a flat body carrying
    /// `transaction_id` and `status` at the top level.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let raw: Value = serde_json::from_slice(payload)
            .map_err(|e| Error::Parse(format!("Webhook payload is not JSON: {}", e)))?;

        let event_type = raw
            .get("event_type")
            .or_else(|| raw.get("event"))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let fields = match raw.get("transaction") {
            Some(Value::Object(nested)) => nested.clone(),
            _ => match &raw {
                Value::Object(flat) => flat.clone(),
                _ => return Err(Error::Parse("Webhook payload is not an object".to_string())),
            },
        };
        let transaction = WebhookTransaction::from_fields(fields)?;

        Ok(Self {
            event_type,
            transaction,
            raw,
        })
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction.uuid
    }

    pub fn status(&self) -> &TransactionStatus {
        &self.transaction.status
    }

    pub fn reference(&self) -> Option<&str> {
        self.transaction.reference.as_deref()
    }

    pub fn event_type(&self) -> Option<&str> {
        self.event_type.as_deref()
    }
}

/// Verifies and parses inbound webhook calls.
#[derive(Debug, Clone)]
pub struct WebhookHandler<V = HmacSha256Verifier> {
    verifier: V,
}

impl WebhookHandler<HmacSha256Verifier> {
    /// Handler using HMAC-SHA256 with the shared webhook secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            verifier: HmacSha256Verifier::new(secret),
        }
    }
}

impl<V: SignatureVerifier> WebhookHandler<V> {
    /// Handler using a custom signature scheme.
    pub fn with_verifier(verifier: V) -> Self {
        Self { verifier }
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Whether `signature` matches `payload`.
    pub fn is_valid(&self, payload: &[u8], signature: &str) -> bool {
        self.verifier.verify(payload, signature)
    }

    /// Check the signature and parse the payload.
    ///
    /// Fails with [`Error::InvalidSignature`] when the signature does not
    /// match, and with [`Error::Parse`] when a correctly signed body does not
    /// carry a transaction id and status.
    pub fn verify(&self, payload: &[u8], signature: &str) -> Result<WebhookEvent> {
        if !self.is_valid(payload, signature) {
            log::warn!("Rejected webhook with invalid signature");
            return Err(Error::InvalidSignature);
        }
        let event = WebhookEvent::parse(payload)?;
        log::debug!(
            "Webhook {} for transaction {}: {}",
            event.event_type().unwrap_or("<none>"),
            event.transaction_id(),
            event.status()
        );
        Ok(event)
    }
}
