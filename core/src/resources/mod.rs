//! Typed wrappers around the MarzPay endpoints, one per API resource.
//!
//! Each resource borrows the [`crate::ApiClient`] and is obtained from
//! [`crate::Client`], e.g. `client.collections()`.

mod accounts;
mod balance;
mod collections;
mod disbursements;
mod phone_verification;
mod services;
mod transactions;
mod webhooks;

pub use accounts::Accounts;
pub use balance::Balance;
pub use collections::Collections;
pub use disbursements::Disbursements;
pub use phone_verification::PhoneVerification;
pub use services::Services;
pub use transactions::Transactions;
pub use webhooks::Webhooks;

use crate::api::TransferRequest;
use crate::error::{Error, Result};
use crate::phone;

/// Allowed amount range for a transfer, in whole UGX.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AmountLimits {
    pub min: u64,
    pub max: u64,
}

/// Check a transfer request and return a copy with the phone number in
/// canonical form. Without `limits` any non-zero amount is accepted.
///
/// Every problem is reported at once in a single [`Error::Validation`].
pub(crate) fn prepare_transfer(
    request: &TransferRequest,
    limits: Option<AmountLimits>,
) -> Result<TransferRequest> {
    let mut errors = Vec::new();

    match limits {
        _ if request.amount == 0 => errors.push("Amount is required".to_string()),
        Some(AmountLimits { min, .. }) if request.amount < min => {
            errors.push(format!("Amount must be at least {} UGX", min))
        }
        Some(AmountLimits { max, .. }) if request.amount > max => {
            errors.push(format!("Amount must not exceed {} UGX", max))
        }
        _ => {}
    }

    let phone_number = match phone::format_phone_number(&request.phone_number) {
        Ok(formatted) => Some(formatted),
        Err(Error::Validation { errors: problems, .. }) => {
            errors.extend(problems);
            None
        }
        Err(other) => return Err(other),
    };

    if request.reference.trim().is_empty() {
        errors.push("Reference is required".to_string());
    }

    match phone_number {
        Some(phone_number) if errors.is_empty() => Ok(TransferRequest {
            phone_number,
            ..request.clone()
        }),
        _ => Err(Error::Validation {
            message: "Validation failed".to_string(),
            errors,
        }),
    }
}

/// Reject identifiers that are empty or would escape their path segment.
pub(crate) fn check_id<'a>(what: &str, id: &'a str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::validation(format!("{} is required", what)));
    }
    if id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
        return Err(Error::validation(format!("{} is malformed: {}", what, id)));
    }
    Ok(id)
}
