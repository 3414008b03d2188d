use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::serde_helpers::{amount_as_string, checksum_address};

/// `POST /quote` 请求体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RfqQuoteRequest {
    pub token_in_chain_id: u64,
    pub token_out_chain_id: u64,
    pub request_id: String,
    #[serde(with = "checksum_address")]
    pub token_in: Address,
    #[serde(with = "checksum_address")]
    pub token_out: Address,
    #[serde(with = "amount_as_string")]
    pub amount: U256,
    #[serde(with = "checksum_address")]
    pub offerer: Address,
    /// `EXACT_INPUT` / `EXACT_OUTPUT`
    #[serde(rename = "type")]
    pub trade_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfqQuoteResponse {
    pub chain_id: u64,
    pub request_id: String,
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(with = "checksum_address")]
    pub token_in: Address,
    #[serde(with = "amount_as_string")]
    pub amount_in: U256,
    #[serde(with = "checksum_address")]
    pub token_out: Address,
    #[serde(with = "amount_as_string")]
    pub amount_out: U256,
    #[serde(with = "checksum_address")]
    pub offerer: Address,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "checksum_address::option"
    )]
    pub filler: Option<Address>,
}

impl RfqQuoteResponse {
    pub fn try_from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
