use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::serde_helpers::amount_as_string;

/// `GET /quote` 请求，全部以查询字符串传参。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingQuoteRequest {
    pub token_in: Address,
    pub token_in_chain_id: u64,
    pub token_out: Address,
    pub token_out_chain_id: u64,
    pub amount: U256,
    /// `exactIn` / `exactOut`
    pub trade_type: &'static str,
    pub gas_price_wei: Option<String>,
    pub protocols: Vec<&'static str>,
    pub slippage_tolerance: Option<u64>,
    pub min_splits: Option<u8>,
    pub force_cross_protocol: Option<bool>,
    pub force_mixed_routes: Option<bool>,
    pub deadline: Option<u64>,
    pub simulate_from_address: Option<Address>,
    pub permit_signature: Option<String>,
    pub permit_nonce: Option<String>,
    pub permit_expiration: Option<u64>,
    pub permit_amount: Option<U256>,
    pub permit_sig_deadline: Option<u64>,
    pub enable_universal_router: Option<bool>,
}

impl RoutingQuoteRequest {
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(20);
        params.push(("tokenInAddress".to_string(), self.token_in.to_checksum(None)));
        params.push(("tokenInChainId".to_string(), self.token_in_chain_id.to_string()));
        params.push(("tokenOutAddress".to_string(), self.token_out.to_checksum(None)));
        params.push((
            "tokenOutChainId".to_string(),
            self.token_out_chain_id.to_string(),
        ));
        params.push(("amount".to_string(), self.amount.to_string()));
        params.push(("type".to_string(), self.trade_type.to_string()));
        if let Some(value) = self.gas_price_wei.as_ref() {
            params.push(("gasPriceWei".to_string(), value.clone()));
        }
        if !self.protocols.is_empty() {
            let joined = self
                .protocols
                .iter()
                .map(|protocol| protocol.to_ascii_lowercase())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("protocols".to_string(), joined));
        }
        if let Some(value) = self.slippage_tolerance {
            params.push(("slippageTolerance".to_string(), value.to_string()));
        }
        if let Some(value) = self.min_splits {
            params.push(("minSplits".to_string(), value.to_string()));
        }
        if let Some(value) = self.force_cross_protocol {
            params.push(("forceCrossProtocol".to_string(), value.to_string()));
        }
        if let Some(value) = self.force_mixed_routes {
            params.push(("forceMixedRoutes".to_string(), value.to_string()));
        }
        if let Some(value) = self.deadline {
            params.push(("deadline".to_string(), value.to_string()));
        }
        if let Some(value) = self.simulate_from_address {
            params.push(("simulateFromAddress".to_string(), value.to_checksum(None)));
        }
        if let Some(value) = self.permit_signature.as_ref() {
            params.push(("permitSignature".to_string(), value.clone()));
        }
        if let Some(value) = self.permit_nonce.as_ref() {
            params.push(("permitNonce".to_string(), value.clone()));
        }
        if let Some(value) = self.permit_expiration {
            params.push(("permitExpiration".to_string(), value.to_string()));
        }
        if let Some(value) = self.permit_amount {
            params.push(("permitAmount".to_string(), value.to_string()));
        }
        if let Some(value) = self.permit_sig_deadline {
            params.push(("permitSigDeadline".to_string(), value.to_string()));
        }
        if let Some(value) = self.enable_universal_router {
            params.push(("enableUniversalRouter".to_string(), value.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParameters {
    pub calldata: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// `/quote` 响应体，只保留报价引擎用到的字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingQuoteResponse {
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(with = "amount_as_string")]
    pub amount: U256,
    #[serde(with = "amount_as_string")]
    pub quote: U256,
    #[serde(with = "amount_as_string")]
    pub quote_gas_adjusted: U256,
    #[serde(with = "amount_as_string")]
    pub gas_use_estimate: U256,
    #[serde(with = "amount_as_string")]
    pub gas_use_estimate_quote: U256,
    #[serde(default, rename = "gasUseEstimateUSD")]
    pub gas_use_estimate_usd: Option<String>,
    #[serde(default)]
    pub gas_price_wei: Option<String>,
    #[serde(default)]
    pub route_string: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub method_parameters: Option<MethodParameters>,
}

impl RoutingQuoteResponse {
    pub fn try_from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use alloy_primitives::address;
    use serde_json::json;

    use super::*;

    fn params_map(params: &[(String, String)]) -> HashMap<&str, &str> {
        params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    fn request() -> RoutingQuoteRequest {
        RoutingQuoteRequest {
            token_in: address!("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
            token_in_chain_id: 1,
            token_out: address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
            token_out_chain_id: 1,
            amount: U256::from(1_000u64),
            trade_type: "exactIn",
            gas_price_wei: Some("12".to_string()),
            protocols: vec!["MIXED", "V2", "V3"],
            slippage_tolerance: None,
            min_splits: None,
            force_cross_protocol: None,
            force_mixed_routes: None,
            deadline: None,
            simulate_from_address: None,
            permit_signature: None,
            permit_nonce: None,
            permit_expiration: None,
            permit_amount: None,
            permit_sig_deadline: None,
            enable_universal_router: None,
        }
    }

    #[test]
    fn query_includes_only_present_fields() {
        let params = request().to_query_params();
        let map = params_map(&params);
        assert_eq!(
            map.get("tokenInAddress"),
            Some(&"0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984")
        );
        assert_eq!(map.get("type"), Some(&"exactIn"));
        assert_eq!(map.get("protocols"), Some(&"mixed,v2,v3"));
        assert_eq!(map.get("gasPriceWei"), Some(&"12"));
        assert!(!map.contains_key("deadline"));
        assert!(!map.contains_key("permitAmount"));
    }

    #[test]
    fn query_forwards_optional_fields() {
        let mut request = request();
        request.deadline = Some(600);
        request.min_splits = Some(3);
        request.permit_amount = Some(U256::from(5u64));
        request.enable_universal_router = Some(true);
        let params = request.to_query_params();
        let map = params_map(&params);
        assert_eq!(map.get("deadline"), Some(&"600"));
        assert_eq!(map.get("minSplits"), Some(&"3"));
        assert_eq!(map.get("permitAmount"), Some(&"5"));
        assert_eq!(map.get("enableUniversalRouter"), Some(&"true"));
    }

    #[test]
    fn response_parses_string_amounts() {
        let payload = json!({
            "quoteId": "q-1",
            "amount": "1000",
            "quote": "2000000",
            "quoteGasAdjusted": "1990000",
            "gasUseEstimate": "100000",
            "gasUseEstimateQuote": "50000",
            "gasUseEstimateUSD": "1.23",
            "gasPriceWei": "12",
            "routeString": "UNI -> DAI",
            "blockNumber": "17000000",
            "methodParameters": { "calldata": "0x", "value": "0x00" }
        });
        let response = RoutingQuoteResponse::try_from_value(payload).expect("parse");
        assert_eq!(response.quote, U256::from(2_000_000u64));
        assert_eq!(response.gas_use_estimate_usd.as_deref(), Some("1.23"));
        assert_eq!(
            response.method_parameters.map(|params| params.value),
            Some("0x00".to_string())
        );
    }

    #[test]
    fn response_rejects_missing_amounts() {
        let payload = json!({ "quoteId": "q-1", "amount": "1000" });
        assert!(RoutingQuoteResponse::try_from_value(payload).is_err());
    }
}
