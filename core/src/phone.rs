//! Ugandan mobile number handling.
//!
//! The API expects numbers in the international form without a plus sign,
//! e.g. `256759983853`. Callers usually have the local form (`0759983853`),
//! so every phone number is normalised here before it is sent.

use crate::error::{Error, Result};

/// Uganda's country calling code.
pub const COUNTRY_CODE: &str = "256";

/// Digits in a national mobile number, without the trunk prefix `0`.
const NATIONAL_LEN: usize = 9;

/// Normalise a phone number to the canonical `2567XXXXXXXX` form.
///
/// Accepts `0759983853`, `759983853`, `256759983853`, `+256 759 983 853`
/// and the like. Spaces, dashes, dots and parentheses are ignored; a `+` is
/// only allowed as the first character.
pub fn format_phone_number(phone_number: &str) -> Result<String> {
    let trimmed = phone_number.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Phone number is required"));
    }

    let mut digits = String::with_capacity(trimmed.len());
    for (i, c) in trimmed.chars().enumerate() {
        match c {
            '0'..='9' => digits.push(c),
            '+' if i == 0 => {}
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => {
                return Err(Error::validation(format!(
                    "Invalid phone number: unexpected character '{}'",
                    c
                )));
            }
        }
    }

    let national = if let Some(rest) = digits.strip_prefix(COUNTRY_CODE) {
        rest
    } else if let Some(rest) = digits.strip_prefix('0') {
        rest
    } else {
        digits.as_str()
    };

    if national.len() != NATIONAL_LEN {
        return Err(Error::validation(format!(
            "Invalid phone number: expected {} digits after the country code, got {}",
            NATIONAL_LEN,
            national.len()
        )));
    }
    if !national.starts_with('7') {
        return Err(Error::validation(
            "Invalid phone number: not a Ugandan mobile number",
        ));
    }

    Ok(format!("{}{}", COUNTRY_CODE, national))
}

/// Whether `phone_number` can be normalised by [`format_phone_number`].
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    format_phone_number(phone_number).is_ok()
}
