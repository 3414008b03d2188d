//! serde adapters shared by the provider payloads and the quote JSON surfaces.

pub mod amount_as_string;
pub mod checksum_address;
pub mod option_amount_as_string;

use alloy_primitives::U256;
use serde::Deserialize;

/// Providers send amounts either as decimal strings or plain JSON numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(u64),
}

fn parse_amount(raw: RawAmount) -> Result<U256, String> {
    match raw {
        RawAmount::Number(value) => Ok(U256::from(value)),
        RawAmount::Text(text) => parse_decimal_amount(&text),
    }
}

/// Parses a base-10 amount, rejecting signs, hex and anything above 2^256-1.
pub fn parse_decimal_amount(text: &str) -> Result<U256, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid amount `{text}`"));
    }
    U256::from_str_radix(trimmed, 10).map_err(|err| format!("invalid amount `{text}`: {err}"))
}
