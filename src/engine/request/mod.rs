//! Per-routing-type quote requests.
//!
//! A request is built once from a validated body and never mutated; the
//! transformer pipeline may append derived requests to a call's working set.

pub mod body;
pub mod classic;
pub mod dutch;

use alloy_primitives::{Address, U256};
use serde::Serialize;
use serde_json::Value;

use crate::api::serde_helpers::{amount_as_string, checksum_address};

use super::types::{RoutingType, TradeType};

pub use body::QuoteRequestBody;
pub use classic::{ClassicConfig, ClassicRequest};
pub use dutch::{DutchConfig, DutchRequest};

/// Defaults applied when a body omits optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDefaults {
    pub slippage_bps: u64,
    pub exclusivity_override_bps: u64,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            slippage_bps: 50,
            exclusivity_override_bps: 100,
        }
    }
}

/// Swap parameters shared by every routing type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequestInfo {
    pub request_id: String,
    pub token_in_chain_id: u64,
    pub token_out_chain_id: u64,
    #[serde(with = "checksum_address")]
    pub token_in: Address,
    #[serde(with = "checksum_address")]
    pub token_out: Address,
    #[serde(with = "amount_as_string")]
    pub amount: U256,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Basis points out of 10000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slippage_tolerance: Option<u64>,
}

impl QuoteRequestInfo {
    /// Identifies the trade regardless of routing type.
    pub fn swap_key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}",
            self.token_in_chain_id,
            self.token_out_chain_id,
            self.token_in.to_checksum(None),
            self.token_out.to_checksum(None),
            self.amount,
            self.trade_type,
        )
    }

    pub fn same_swap(&self, other: &QuoteRequestInfo) -> bool {
        self.token_in_chain_id == other.token_in_chain_id
            && self.token_out_chain_id == other.token_out_chain_id
            && self.token_in == other.token_in
            && self.token_out == other.token_out
            && self.amount == other.amount
            && self.trade_type == other.trade_type
    }
}

pub(crate) fn request_key(routing: RoutingType, info: &QuoteRequestInfo) -> String {
    format!("{routing}:{}", info.swap_key())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteRequest {
    Classic(ClassicRequest),
    DutchLimit(DutchRequest),
}

impl QuoteRequest {
    pub fn routing_type(&self) -> RoutingType {
        match self {
            QuoteRequest::Classic(_) => RoutingType::Classic,
            QuoteRequest::DutchLimit(_) => RoutingType::DutchLimit,
        }
    }

    pub fn info(&self) -> &QuoteRequestInfo {
        match self {
            QuoteRequest::Classic(request) => &request.info,
            QuoteRequest::DutchLimit(request) => &request.info,
        }
    }

    /// Stable dedup and correlation key.
    pub fn key(&self) -> String {
        match self {
            QuoteRequest::Classic(request) => request.key(),
            QuoteRequest::DutchLimit(request) => request.key(),
        }
    }

    /// Canonical serialized form of the routing config.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            QuoteRequest::Classic(request) => request.to_json(),
            QuoteRequest::DutchLimit(request) => request.to_json(),
        }
    }

    pub fn as_dutch(&self) -> Option<&DutchRequest> {
        match self {
            QuoteRequest::DutchLimit(request) => Some(request),
            QuoteRequest::Classic(_) => None,
        }
    }

    pub fn as_classic(&self) -> Option<&ClassicRequest> {
        match self {
            QuoteRequest::Classic(request) => Some(request),
            QuoteRequest::DutchLimit(_) => None,
        }
    }
}

impl From<ClassicRequest> for QuoteRequest {
    fn from(request: ClassicRequest) -> Self {
        QuoteRequest::Classic(request)
    }
}

impl From<DutchRequest> for QuoteRequest {
    fn from(request: DutchRequest) -> Self {
        QuoteRequest::DutchLimit(request)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_stable_and_routing_specific() {
        let classic = QuoteRequest::from(fixtures::classic(TradeType::ExactInput, 1_000));
        let dutch = QuoteRequest::from(fixtures::dutch(TradeType::ExactInput, 1_000, 50));
        assert_eq!(classic.key(), classic.clone().key());
        assert_ne!(classic.key(), dutch.key());
        assert!(classic.key().starts_with("CLASSIC:"));
        assert!(dutch.key().starts_with("DUTCH_LIMIT:"));
        assert_eq!(classic.info().swap_key(), dutch.info().swap_key());
    }

    #[test]
    fn key_ignores_request_id_and_config() {
        let mut first = fixtures::classic(TradeType::ExactInput, 1_000);
        let second = fixtures::classic(TradeType::ExactInput, 1_000);
        first.info.request_id = "other".to_string();
        first.config.gas_price_wei = None;
        assert_eq!(first.key(), second.key());
        assert!(first.info.same_swap(&second.info));
    }

    #[test]
    fn canonical_json_carries_routing_type() {
        let dutch = QuoteRequest::from(fixtures::dutch(TradeType::ExactOutput, 5, 50));
        let json = dutch.to_json().unwrap();
        assert_eq!(json["routingType"], "DUTCH_LIMIT");
        assert_eq!(json["auctionPeriodSecs"], 60);
        assert_eq!(json["offerer"], fixtures::OFFERER.to_checksum(None));
    }
}
