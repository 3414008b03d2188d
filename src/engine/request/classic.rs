use alloy_primitives::{Address, U256};
use serde::Serialize;
use serde_json::Value;

use crate::api::serde_helpers::{checksum_address, option_amount_as_string};
use crate::engine::types::{Protocol, RoutingType};

use super::{QuoteRequestInfo, request_key};

/// Routing-API specific knobs; optional fields are forwarded only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicConfig {
    pub protocols: Vec<Protocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price_wei: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "checksum_address::option"
    )]
    pub simulate_from_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_expiration: Option<u64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "option_amount_as_string::serialize"
    )]
    pub permit_amount: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_sig_deadline: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_universal_router: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_splits: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_cross_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_mixed_routes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slippage_tolerance: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicRequest {
    pub info: QuoteRequestInfo,
    pub config: ClassicConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassicConfigJson<'a> {
    routing_type: RoutingType,
    #[serde(flatten)]
    config: &'a ClassicConfig,
}

impl ClassicRequest {
    pub fn new(info: QuoteRequestInfo, config: ClassicConfig) -> Self {
        Self { info, config }
    }

    pub fn key(&self) -> String {
        request_key(RoutingType::Classic, &self.info)
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(ClassicConfigJson {
            routing_type: RoutingType::Classic,
            config: &self.config,
        })
    }
}
