//! Field rules for inbound quote bodies.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::api::serde_helpers::parse_decimal_amount;

use super::chain;
use super::types::{Protocol, RoutingType, TradeType};

pub const MAX_SLIPPAGE_TOLERANCE: i64 = 200;
pub const MAX_DEADLINE_SECS: i64 = 10_800;
pub const MAX_MIN_SPLITS: i64 = 7;
pub const MAX_GAS_PRICE_DIGITS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed request body: {0}")]
    Malformed(String),
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("chain {chain_id} is not supported for {routing}")]
    UnsupportedChain { chain_id: u64, routing: RoutingType },
    #[error("at least one routing config is required")]
    NoConfigs,
    #[error("routing type {0} requested more than once")]
    DuplicateRouting(RoutingType),
}

impl ValidationError {
    fn field(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Accepts lowercase, uppercase or correctly checksummed hex addresses.
pub fn address(field: &'static str, raw: &str) -> ValidationResult<Address> {
    let trimmed = raw.trim();
    let parsed = Address::from_str(trimmed)
        .map_err(|err| ValidationError::field(field, format!("`{raw}`: {err}")))?;
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let mixed_case = digits.bytes().any(|b| b.is_ascii_lowercase())
        && digits.bytes().any(|b| b.is_ascii_uppercase());
    if mixed_case && parsed.to_checksum(None)[2..] != *digits {
        return Err(ValidationError::field(field, format!("`{raw}` has a bad checksum")));
    }
    Ok(parsed)
}

pub fn amount(field: &'static str, raw: &str) -> ValidationResult<U256> {
    if raw.trim_start().starts_with('-') {
        return Err(ValidationError::field(field, "negative number"));
    }
    parse_decimal_amount(raw).map_err(|reason| ValidationError::field(field, reason))
}

pub fn chain_id(routing: RoutingType, chain_id: u64) -> ValidationResult<u64> {
    if chain::is_supported(routing, chain_id) {
        Ok(chain_id)
    } else {
        Err(ValidationError::UnsupportedChain { chain_id, routing })
    }
}

pub fn trade_type(raw: &str) -> ValidationResult<TradeType> {
    match raw {
        "EXACT_INPUT" => Ok(TradeType::ExactInput),
        "EXACT_OUTPUT" => Ok(TradeType::ExactOutput),
        other => Err(ValidationError::field("type", format!("`{other}`"))),
    }
}

pub fn protocols(raw: &[String]) -> ValidationResult<Vec<Protocol>> {
    raw.iter()
        .map(|value| match value.to_ascii_uppercase().as_str() {
            "V2" => Ok(Protocol::V2),
            "V3" => Ok(Protocol::V3),
            "MIXED" => Ok(Protocol::Mixed),
            _ => Err(ValidationError::field("protocols", format!("`{value}`"))),
        })
        .collect()
}

pub fn gas_price_wei(raw: &str) -> ValidationResult<String> {
    if raw.is_empty()
        || raw.len() > MAX_GAS_PRICE_DIGITS
        || !raw.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ValidationError::field("gasPriceWei", format!("`{raw}`")));
    }
    Ok(raw.to_string())
}

pub fn slippage_tolerance(value: i64) -> ValidationResult<u64> {
    bounded("slippageTolerance", value, 0, MAX_SLIPPAGE_TOLERANCE)
}

pub fn deadline(value: i64) -> ValidationResult<u64> {
    bounded("deadline", value, 1, MAX_DEADLINE_SECS)
}

pub fn min_splits(value: i64) -> ValidationResult<u8> {
    bounded("minSplits", value, 0, MAX_MIN_SPLITS).map(|v| v as u8)
}

pub fn positive(field: &'static str, value: i64) -> ValidationResult<u64> {
    bounded(field, value, 1, i64::MAX)
}

fn bounded(field: &'static str, value: i64, min: i64, max: i64) -> ValidationResult<u64> {
    if value < min || value > max {
        return Err(ValidationError::field(
            field,
            format!("{value} outside [{min}, {max}]"),
        ));
    }
    Ok(value as u64)
}
