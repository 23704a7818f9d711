//! Shared types for the MarzPay Client SDK.

use serde::{Deserialize, Serialize};

/// Country the mobile-money account is registered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    /// Uganda.
    #[default]
    #[serde(rename = "UG")]
    Uganda,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Uganda => "UG",
        }
    }
}

impl std::str::FromStr for Country {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UG" | "UGA" | "UGANDA" => Ok(Country::Uganda),
            _ => Err(crate::error::Error::Parse(format!(
                "Unsupported country: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a collection, disbursement or transaction as reported by the API.
///
/// Parsing is case-insensitive. Statuses the SDK does not know about are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Pending,
    Processing,
    Successful,
    Completed,
    Failed,
    Cancelled,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Processing => "processing",
            TransactionStatus::Successful => "successful",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Other(s) => s,
        }
    }

    /// No further status change is expected.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Successful
                | TransactionStatus::Completed
                | TransactionStatus::Failed
                | TransactionStatus::Cancelled
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Successful | TransactionStatus::Completed
        )
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "pending" => TransactionStatus::Pending,
            "processing" => TransactionStatus::Processing,
            "successful" | "success" => TransactionStatus::Successful,
            "completed" => TransactionStatus::Completed,
            "failed" => TransactionStatus::Failed,
            "cancelled" | "canceled" => TransactionStatus::Cancelled,
            _ => TransactionStatus::Other(s.to_string()),
        })
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: std::convert::Infallible| match e {})
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generate a fresh transaction reference (UUIDv4).
///
/// References are idempotency keys: reuse the same one when retrying a
/// request whose outcome is unknown.
pub fn generate_reference() -> String {
    uuid::Uuid::new_v4().to_string()
}
