use alloy_primitives::Address;
use serde::Serialize;
use serde_json::Value;

use crate::api::serde_helpers::checksum_address;
use crate::engine::chain;
use crate::engine::types::RoutingType;

use super::{QuoteRequestInfo, RequestDefaults, request_key};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DutchConfig {
    #[serde(with = "checksum_address")]
    pub offerer: Address,
    pub exclusivity_override_bps: u64,
    pub auction_period_secs: u64,
    pub deadline_buffer_secs: u64,
}

impl DutchConfig {
    /// Fills absent fields from the per-chain lookup and the configured defaults.
    pub fn with_defaults(
        chain_id: u64,
        offerer: Option<Address>,
        exclusivity_override_bps: Option<u64>,
        auction_period_secs: Option<u64>,
        deadline_buffer_secs: Option<u64>,
        defaults: &RequestDefaults,
    ) -> Self {
        Self {
            offerer: offerer.unwrap_or(chain::NATIVE_ADDRESS),
            exclusivity_override_bps: exclusivity_override_bps
                .unwrap_or(defaults.exclusivity_override_bps),
            auction_period_secs: auction_period_secs
                .unwrap_or_else(|| chain::default_auction_period_secs(chain_id)),
            deadline_buffer_secs: deadline_buffer_secs
                .unwrap_or_else(|| chain::default_deadline_buffer_secs(chain_id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutchRequest {
    pub info: QuoteRequestInfo,
    pub config: DutchConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DutchConfigJson<'a> {
    routing_type: RoutingType,
    #[serde(flatten)]
    config: &'a DutchConfig,
}

impl DutchRequest {
    pub fn new(info: QuoteRequestInfo, config: DutchConfig) -> Self {
        Self { info, config }
    }

    pub fn key(&self) -> String {
        request_key(RoutingType::DutchLimit, &self.info)
    }

    /// Slippage is always resolved for Dutch requests; zero when the caller
    /// constructed one without it.
    pub fn slippage_bps(&self) -> u64 {
        self.info.slippage_tolerance.unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(DutchConfigJson {
            routing_type: RoutingType::DutchLimit,
            config: &self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_chain_lookup() {
        let config =
            DutchConfig::with_defaults(1, None, None, None, None, &RequestDefaults::default());
        assert_eq!(config.offerer, chain::NATIVE_ADDRESS);
        assert_eq!(config.exclusivity_override_bps, 100);
        assert_eq!(config.auction_period_secs, 60);
        assert_eq!(config.deadline_buffer_secs, 12);
    }

    #[test]
    fn unknown_chain_falls_back_to_global_defaults() {
        let config =
            DutchConfig::with_defaults(31337, None, None, None, None, &RequestDefaults::default());
        assert_eq!(config.auction_period_secs, 60);
        assert_eq!(config.deadline_buffer_secs, 5);
    }

    #[test]
    fn explicit_values_win_over_defaults() {
        let config = DutchConfig::with_defaults(
            1,
            Some(Address::repeat_byte(0x11)),
            Some(7),
            Some(120),
            Some(30),
            &RequestDefaults::default(),
        );
        assert_eq!(config.offerer, Address::repeat_byte(0x11));
        assert_eq!(config.exclusivity_override_bps, 7);
        assert_eq!(config.auction_period_secs, 120);
        assert_eq!(config.deadline_buffer_secs, 30);
    }
}
