//! API types for the MarzPay REST API.
//!
//! Request types serialize to the exact JSON bodies the API expects. Response
//! types type the fields the SDK relies on and keep everything else in an
//! `extra` map, so values are passed through verbatim.

use crate::error::{Error, Result};
use crate::types::{Country, TransactionStatus};
use serde::{Deserialize, Deserializer, Serialize};
use time::Date;
use time::macros::format_description;

type Extra = serde_json::Map<String, serde_json::Value>;

/// Serde module for amounts that arrive as numbers or numeric strings.
mod lenient_amount {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Raw>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(Raw::Int(n)) => Ok(Some(n)),
            Some(Raw::Float(f)) if f >= 0.0 && f.fract() == 0.0 => Ok(Some(f as u64)),
            Some(Raw::Float(f)) => Err(serde::de::Error::custom(format!(
                "expected a whole non-negative amount, got {}",
                f
            ))),
            Some(Raw::Text(s)) => {
                let cleaned: String = s.chars().filter(|c| *c != ',').collect();
                let cleaned = cleaned.trim();
                let cleaned = cleaned.strip_suffix(".00").unwrap_or(cleaned);
                cleaned
                    .parse()
                    .map(Some)
                    .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", s)))
            }
        }
    }
}

/// Standard response envelope: `{"status": ..., "message": ..., "data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Body for collecting or sending money.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Whole UGX.
    pub amount: u64,
    pub phone_number: String,
    /// Caller-supplied idempotency key.
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Overrides the account's webhook URL for this transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    pub country: Country,
}

impl TransferRequest {
    pub fn new(amount: u64, phone_number: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            amount,
            phone_number: phone_number.into(),
            reference: reference.into(),
            description: None,
            callback_url: None,
            country: Country::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    pub fn with_country(mut self, country: Country) -> Self {
        self.country = country;
        self
    }
}

/// Request to pull money from a customer.
pub type CollectMoneyRequest = TransferRequest;

/// Request to push money to a recipient.
pub type SendMoneyRequest = TransferRequest;

/// Result of a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub collection_id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount::deserialize")]
    pub amount: Option<u64>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Result of a disbursement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disbursement {
    pub disbursement_id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount::deserialize")]
    pub amount: Option<u64>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Any transaction on the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub uuid: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub reference: Option<String>,
    /// `collection` or `disbursement`.
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount::deserialize")]
    pub amount: Option<u64>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Pagination block of list responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub last_page: Option<u64>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(
        alias = "collections",
        alias = "disbursements",
        alias = "transactions",
        alias = "services",
        alias = "history",
        alias = "webhooks"
    )]
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A payment service (network/provider) offered by MarzPay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    /// `collection` or `disbursement`.
    #[serde(default, rename = "type")]
    pub service_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount::deserialize")]
    pub min_amount: Option<u64>,
    #[serde(default, deserialize_with = "lenient_amount::deserialize")]
    pub max_amount: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Merchant account details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Fields that can be changed on the merchant account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.business_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.callback_url.is_none()
    }
}

/// Current account balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    #[serde(default, deserialize_with = "lenient_amount::deserialize")]
    pub balance: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One movement in the balance history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceEntry {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount::deserialize")]
    pub amount: Option<u64>,
    #[serde(default, deserialize_with = "lenient_amount::deserialize")]
    pub balance_after: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A registered webhook endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEndpoint {
    pub uuid: String,
    pub url: String,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body for creating or updating a webhook endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// e.g. `collection.completed`, `disbursement.failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// `test` or `production`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body for a phone number lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPhoneRequest {
    pub phone_number: String,
}

/// Registered owner of a mobile-money number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneVerificationResult {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Phone verification service description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneVerificationServiceInfo {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Whether the account may use phone verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    #[serde(default)]
    pub is_subscribed: Option<bool>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn format_date(date: Date) -> Result<String> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| Error::Parse(format!("Failed to format date {}: {}", date, e)))
}

fn push<T: ToString>(query: &mut Vec<(String, String)>, key: &str, value: &Option<T>) {
    if let Some(value) = value {
        query.push((key.to_string(), value.to_string()));
    }
}

/// Filters for collection, disbursement and balance history listings.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<TransactionStatus>,
    pub from_date: Option<Date>,
    pub to_date: Option<Date>,
}

impl ListFilter {
    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        let mut query = Vec::new();
        push(&mut query, "page", &self.page);
        push(&mut query, "limit", &self.limit);
        push(&mut query, "status", &self.status);
        if let Some(date) = self.from_date {
            query.push(("from_date".to_string(), format_date(date)?));
        }
        if let Some(date) = self.to_date {
            query.push(("to_date".to_string(), format_date(date)?));
        }
        Ok(query)
    }
}

/// Filters for the transaction listing.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub list: ListFilter,
    /// `collection` or `disbursement`.
    pub transaction_type: Option<String>,
    pub provider: Option<String>,
}

impl TransactionFilter {
    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        let mut query = self.list.to_query()?;
        push(&mut query, "type", &self.transaction_type);
        push(&mut query, "provider", &self.provider);
        Ok(query)
    }
}

/// Filters for the service listing.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub service_type: Option<String>,
    pub provider: Option<String>,
    pub status: Option<String>,
}

impl ServiceFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push(&mut query, "type", &self.service_type);
        push(&mut query, "provider", &self.provider);
        push(&mut query, "status", &self.status);
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn transfer_request_skips_unset_optionals() {
        let request = TransferRequest::new(5000, "256759983853", "R1");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["amount"], 5000);
        assert_eq!(json["country"], "UG");
        assert!(json.get("description").is_none());
        assert!(json.get("callback_url").is_none());
    }

    #[test]
    fn collection_keeps_unknown_fields() {
        let json = r#"{
            "collection_id": "C1",
            "status": "pending",
            "amount": "5,000",
            "provider_reference": "MTN-123"
        }"#;
        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.collection_id, "C1");
        assert_eq!(collection.status, TransactionStatus::Pending);
        assert_eq!(collection.amount, Some(5000));
        assert_eq!(collection.extra["provider_reference"], "MTN-123");
    }

    #[test]
    fn page_accepts_resource_named_items() {
        let json = r#"{"transactions": [{"uuid": "T1", "status": "completed"}], "pagination": {"total": 1}}"#;
        let page: Page<Transaction> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].uuid, "T1");
        assert_eq!(page.pagination.unwrap().total, Some(1));
    }

    #[test]
    fn list_filter_query() {
        let filter = ListFilter {
            page: Some(2),
            limit: Some(50),
            status: Some(TransactionStatus::Completed),
            from_date: Some(date!(2024 - 01 - 05)),
            to_date: None,
        };
        let query = filter.to_query().unwrap();
        assert_eq!(
            query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("status".to_string(), "completed".to_string()),
                ("from_date".to_string(), "2024-01-05".to_string()),
            ]
        );
    }

    #[test]
    fn transaction_filter_appends_type_and_provider() {
        let filter = TransactionFilter {
            transaction_type: Some("collection".to_string()),
            provider: Some("mtn".to_string()),
            ..Default::default()
        };
        let query = filter.to_query().unwrap();
        assert!(query.contains(&("type".to_string(), "collection".to_string())));
        assert!(query.contains(&("provider".to_string(), "mtn".to_string())));
    }
}
