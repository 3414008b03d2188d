use std::collections::HashSet;

use serde::Deserialize;

use crate::engine::types::RoutingType;
use crate::engine::validation::{self, ValidationError, ValidationResult};

use super::{
    ClassicConfig, ClassicRequest, DutchConfig, DutchRequest, QuoteRequest, QuoteRequestInfo,
    RequestDefaults,
};

/// Inbound JSON body: shared swap fields plus one config per routing type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequestBody {
    pub token_in_chain_id: u64,
    pub token_out_chain_id: u64,
    pub token_in: String,
    pub token_out: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub trade_type: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub slippage_tolerance: Option<i64>,
    pub configs: Vec<ConfigBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "routingType")]
pub enum ConfigBody {
    #[serde(rename = "CLASSIC")]
    Classic(ClassicConfigBody),
    #[serde(rename = "DUTCH_LIMIT", alias = "DUTCH_AUCTION")]
    DutchLimit(DutchConfigBody),
}

impl ConfigBody {
    fn routing_type(&self) -> RoutingType {
        match self {
            ConfigBody::Classic(_) => RoutingType::Classic,
            ConfigBody::DutchLimit(_) => RoutingType::DutchLimit,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicConfigBody {
    pub protocols: Vec<String>,
    pub gas_price_wei: Option<String>,
    pub simulate_from_address: Option<String>,
    pub permit_signature: Option<String>,
    pub permit_nonce: Option<String>,
    pub permit_expiration: Option<i64>,
    pub permit_amount: Option<String>,
    pub permit_sig_deadline: Option<i64>,
    pub enable_universal_router: Option<bool>,
    pub deadline: Option<i64>,
    pub min_splits: Option<i64>,
    pub force_cross_protocol: Option<bool>,
    pub force_mixed_routes: Option<bool>,
    pub slippage_tolerance: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutchConfigBody {
    pub offerer: Option<String>,
    pub exclusivity_override_bps: Option<i64>,
    pub auction_period_secs: Option<i64>,
    pub deadline_buffer_secs: Option<i64>,
    pub slippage_tolerance: Option<i64>,
}

impl QuoteRequestBody {
    pub fn from_json(raw: &str) -> ValidationResult<Self> {
        serde_json::from_str(raw).map_err(|err| ValidationError::Malformed(err.to_string()))
    }

    /// Validates every field and builds one request per config, in body order.
    pub fn into_requests(self, defaults: &RequestDefaults) -> ValidationResult<Vec<QuoteRequest>> {
        if self.configs.is_empty() {
            return Err(ValidationError::NoConfigs);
        }

        let mut seen = HashSet::new();
        for config in &self.configs {
            if !seen.insert(config.routing_type()) {
                return Err(ValidationError::DuplicateRouting(config.routing_type()));
            }
        }

        let slippage = self
            .slippage_tolerance
            .map(validation::slippage_tolerance)
            .transpose()?;
        let info = QuoteRequestInfo {
            request_id: self
                .request_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            token_in_chain_id: self.token_in_chain_id,
            token_out_chain_id: self.token_out_chain_id,
            token_in: validation::address("tokenIn", &self.token_in)?,
            token_out: validation::address("tokenOut", &self.token_out)?,
            amount: validation::amount("amount", &self.amount)?,
            trade_type: validation::trade_type(&self.trade_type)?,
            slippage_tolerance: slippage,
        };

        self.configs
            .into_iter()
            .map(|config| {
                let routing = config.routing_type();
                validation::chain_id(routing, info.token_in_chain_id)?;
                validation::chain_id(routing, info.token_out_chain_id)?;
                match config {
                    ConfigBody::Classic(body) => {
                        classic_request(info.clone(), body).map(QuoteRequest::Classic)
                    }
                    ConfigBody::DutchLimit(body) => {
                        dutch_request(info.clone(), body, defaults).map(QuoteRequest::DutchLimit)
                    }
                }
            })
            .collect()
    }
}

fn classic_request(
    info: QuoteRequestInfo,
    body: ClassicConfigBody,
) -> ValidationResult<ClassicRequest> {
    let slippage = match body.slippage_tolerance {
        Some(value) => Some(validation::slippage_tolerance(value)?),
        None => info.slippage_tolerance,
    };
    let config = ClassicConfig {
        protocols: validation::protocols(&body.protocols)?,
        gas_price_wei: body
            .gas_price_wei
            .as_deref()
            .map(validation::gas_price_wei)
            .transpose()?,
        simulate_from_address: body
            .simulate_from_address
            .as_deref()
            .map(|raw| validation::address("simulateFromAddress", raw))
            .transpose()?,
        permit_signature: body.permit_signature,
        permit_nonce: body.permit_nonce,
        permit_expiration: body
            .permit_expiration
            .map(|v| validation::positive("permitExpiration", v))
            .transpose()?,
        permit_amount: body
            .permit_amount
            .as_deref()
            .map(|raw| validation::amount("permitAmount", raw))
            .transpose()?,
        permit_sig_deadline: body
            .permit_sig_deadline
            .map(|v| validation::positive("permitSigDeadline", v))
            .transpose()?,
        enable_universal_router: body.enable_universal_router,
        deadline: body.deadline.map(validation::deadline).transpose()?,
        min_splits: body.min_splits.map(validation::min_splits).transpose()?,
        force_cross_protocol: body.force_cross_protocol,
        force_mixed_routes: body.force_mixed_routes,
        slippage_tolerance: slippage,
    };
    Ok(ClassicRequest::new(info, config))
}

fn dutch_request(
    mut info: QuoteRequestInfo,
    body: DutchConfigBody,
    defaults: &RequestDefaults,
) -> ValidationResult<DutchRequest> {
    let slippage = match body.slippage_tolerance {
        Some(value) => validation::slippage_tolerance(value)?,
        None => info.slippage_tolerance.unwrap_or(defaults.slippage_bps),
    };
    info.slippage_tolerance = Some(slippage);

    let offerer = body
        .offerer
        .as_deref()
        .map(|raw| validation::address("offerer", raw))
        .transpose()?;
    let exclusivity = body
        .exclusivity_override_bps
        .map(|v| validation::positive("exclusivityOverrideBps", v))
        .transpose()?;
    let auction_period = body
        .auction_period_secs
        .map(|v| validation::positive("auctionPeriodSecs", v))
        .transpose()?;
    let deadline_buffer = body
        .deadline_buffer_secs
        .map(|v| validation::positive("deadlineBufferSecs", v))
        .transpose()?;

    let config = DutchConfig::with_defaults(
        info.token_out_chain_id,
        offerer,
        exclusivity,
        auction_period,
        deadline_buffer,
        defaults,
    );
    Ok(DutchRequest::new(info, config))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use serde_json::json;

    use super::*;
    use crate::engine::types::{Protocol, TradeType};

    fn base_body() -> serde_json::Value {
        json!({
            "tokenInChainId": 1,
            "tokenOutChainId": 1,
            "tokenIn": "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984",
            "tokenOut": "0x6b175474e89094c44da98b954eedeac495271d0f",
            "amount": "1000000000000000000",
            "type": "EXACT_INPUT",
            "requestId": "req-1",
            "configs": [
                {
                    "routingType": "DUTCH_LIMIT",
                    "offerer": "0x0000000000000000000000000000000000000001",
                    "auctionPeriodSecs": 90
                },
                {
                    "routingType": "CLASSIC",
                    "protocols": ["V2", "V3", "MIXED"],
                    "gasPriceWei": "12"
                }
            ]
        })
    }

    fn parse(value: serde_json::Value) -> ValidationResult<Vec<QuoteRequest>> {
        QuoteRequestBody::from_json(&value.to_string())?.into_requests(&RequestDefaults::default())
    }

    #[test]
    fn complete_body_yields_requests_in_order() {
        let requests = parse(base_body()).expect("valid body");
        assert_eq!(requests.len(), 2);

        let dutch = requests[0].as_dutch().expect("dutch first");
        assert_eq!(dutch.config.auction_period_secs, 90);
        assert_eq!(dutch.config.deadline_buffer_secs, 12);
        assert_eq!(dutch.config.exclusivity_override_bps, 100);
        assert_eq!(dutch.slippage_bps(), 50);
        assert_eq!(dutch.info.amount, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(dutch.info.trade_type, TradeType::ExactInput);

        let classic = requests[1].as_classic().expect("classic second");
        assert_eq!(
            classic.config.protocols,
            vec![Protocol::V2, Protocol::V3, Protocol::Mixed]
        );
        assert_eq!(classic.config.gas_price_wei.as_deref(), Some("12"));
        assert_eq!(classic.info.request_id, "req-1");
        assert_eq!(classic.info.slippage_tolerance, None);
    }

    #[test]
    fn missing_request_id_is_generated() {
        let mut body = base_body();
        body.as_object_mut().unwrap().remove("requestId");
        let requests = parse(body).unwrap();
        assert!(!requests[0].info().request_id.is_empty());
        assert_eq!(requests[0].info().request_id, requests[1].info().request_id);
    }

    #[test]
    fn body_level_slippage_reaches_dutch_request() {
        let mut body = base_body();
        body["slippageTolerance"] = json!(120);
        let requests = parse(body).unwrap();
        assert_eq!(requests[0].as_dutch().unwrap().slippage_bps(), 120);
        assert_eq!(
            requests[1].as_classic().unwrap().config.slippage_tolerance,
            Some(120)
        );
    }

    #[test]
    fn rejects_invalid_fields() {
        let cases = [
            ("tokenInChainId", json!(0)),
            ("tokenIn", json!("0x")),
            ("tokenOut", json!("0x")),
            ("amount", json!("-1")),
            ("type", json!("INVALID")),
            ("slippageTolerance", json!(-1)),
        ];
        for (field, value) in cases {
            let mut body = base_body();
            body[field] = value;
            assert!(parse(body).is_err(), "{field} should be rejected");
        }
    }

    #[test]
    fn rejects_invalid_classic_config() {
        let cases = [
            ("protocols", json!(["INVALID"])),
            ("gasPriceWei", json!("-1")),
            ("simulateFromAddress", json!("0x")),
            ("permitExpiration", json!(-1)),
            ("permitAmount", json!("-1")),
            ("permitSigDeadline", json!(-1)),
            ("deadline", json!(20000)),
            ("minSplits", json!(8)),
        ];
        for (field, value) in cases {
            let mut body = base_body();
            body["configs"][1][field] = value;
            assert!(parse(body).is_err(), "{field} should be rejected");
        }
    }

    #[test]
    fn rejects_invalid_routing_and_duplicates() {
        let mut body = base_body();
        body["configs"][0]["routingType"] = json!("INVALID");
        assert!(matches!(parse(body), Err(ValidationError::Malformed(_))));

        let mut body = base_body();
        body["configs"][1] = body["configs"][0].clone();
        assert_eq!(
            parse(body).unwrap_err(),
            ValidationError::DuplicateRouting(RoutingType::DutchLimit)
        );

        let mut body = base_body();
        body["configs"] = json!([]);
        assert_eq!(parse(body).unwrap_err(), ValidationError::NoConfigs);
    }

    #[test]
    fn dutch_rejects_unsupported_chain() {
        let mut body = base_body();
        body["tokenInChainId"] = json!(42161);
        body["tokenOutChainId"] = json!(42161);
        assert_eq!(
            parse(body).unwrap_err(),
            ValidationError::UnsupportedChain {
                chain_id: 42161,
                routing: RoutingType::DutchLimit,
            }
        );
    }
}
