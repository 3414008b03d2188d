//! 荷兰拍订单负载：衰减窗口、起止数量、nonce 与独占成交方。

use alloy_primitives::{Address, U256};
use rand::RngCore;
use serde::Serialize;

use crate::api::serde_helpers::{amount_as_string, checksum_address};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    #[serde(with = "checksum_address")]
    pub token: Address,
    #[serde(with = "amount_as_string")]
    pub start_amount: U256,
    #[serde(with = "amount_as_string")]
    pub end_amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOutput {
    #[serde(with = "checksum_address")]
    pub token: Address,
    #[serde(with = "amount_as_string")]
    pub start_amount: U256,
    #[serde(with = "amount_as_string")]
    pub end_amount: U256,
    #[serde(with = "checksum_address")]
    pub recipient: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DutchOrder {
    pub chain_id: u64,
    #[serde(with = "checksum_address")]
    pub offerer: Address,
    #[serde(with = "amount_as_string")]
    pub nonce: U256,
    pub decay_start_time: u64,
    pub decay_end_time: u64,
    pub deadline: u64,
    pub input: OrderInput,
    pub outputs: Vec<OrderOutput>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "checksum_address::option"
    )]
    pub exclusive_filler: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusivity_override_bps: Option<u64>,
}

/// 31 字节随机数左移 8 位，最低字节留给序号位。
pub fn generate_nonce() -> U256 {
    let mut bytes = [0u8; 31];
    rand::rng().fill_bytes(&mut bytes);
    U256::from_be_slice(&bytes) << 8usize
}

pub fn unix_now() -> u64 {
    u64::try_from(time::OffsetDateTime::now_utc().unix_timestamp()).unwrap_or_default()
}
