use alloy_primitives::U256;
use serde::Serialize;

use crate::api::routing::{MethodParameters, RoutingQuoteResponse};
use crate::api::serde_helpers::amount_as_string;
use crate::engine::request::ClassicRequest;
use crate::engine::types::TradeType;

/// Routing API 返回的链上路由报价。
///
/// `amount` 始终是调用方指定的一侧，`quote` 是求解出的另一侧。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicQuote {
    pub request: ClassicRequest,
    pub quote_id: Option<String>,
    pub amount: U256,
    pub quote: U256,
    pub quote_gas_adjusted: U256,
    pub gas_use_estimate: U256,
    pub gas_use_estimate_quote: U256,
    pub gas_use_estimate_usd: Option<String>,
    pub gas_price_wei: Option<String>,
    pub route_string: Option<String>,
    pub block_number: Option<String>,
    pub method_parameters: Option<MethodParameters>,
    pub created_at: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassicQuoteJson<'a> {
    request_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote_id: Option<&'a str>,
    #[serde(with = "amount_as_string")]
    amount: U256,
    #[serde(with = "amount_as_string")]
    quote: U256,
    #[serde(with = "amount_as_string")]
    quote_gas_adjusted: U256,
    #[serde(with = "amount_as_string")]
    gas_use_estimate: U256,
    #[serde(with = "amount_as_string")]
    gas_use_estimate_quote: U256,
    #[serde(rename = "gasUseEstimateUSD", skip_serializing_if = "Option::is_none")]
    gas_use_estimate_usd: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas_price_wei: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_string: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method_parameters: Option<&'a MethodParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_number: Option<&'a str>,
    created_at: u64,
}

impl ClassicQuote {
    pub fn from_response(
        request: ClassicRequest,
        response: RoutingQuoteResponse,
        created_at: u64,
    ) -> Self {
        Self {
            request,
            quote_id: response.quote_id,
            amount: response.amount,
            quote: response.quote,
            quote_gas_adjusted: response.quote_gas_adjusted,
            gas_use_estimate: response.gas_use_estimate,
            gas_use_estimate_quote: response.gas_use_estimate_quote,
            gas_use_estimate_usd: response.gas_use_estimate_usd,
            gas_price_wei: response.gas_price_wei,
            route_string: response.route_string,
            block_number: response.block_number,
            method_parameters: response.method_parameters,
            created_at,
        }
    }

    pub fn trade_type(&self) -> TradeType {
        self.request.info.trade_type
    }

    pub fn amount_in(&self) -> U256 {
        match self.trade_type() {
            TradeType::ExactInput => self.amount,
            TradeType::ExactOutput => self.quote,
        }
    }

    pub fn amount_out(&self) -> U256 {
        match self.trade_type() {
            TradeType::ExactInput => self.quote,
            TradeType::ExactOutput => self.amount,
        }
    }

    pub fn amount_in_gas_adjusted(&self) -> U256 {
        match self.trade_type() {
            TradeType::ExactInput => self.amount,
            TradeType::ExactOutput => self.quote_gas_adjusted,
        }
    }

    pub fn amount_out_gas_adjusted(&self) -> U256 {
        match self.trade_type() {
            TradeType::ExactInput => self.quote_gas_adjusted,
            TradeType::ExactOutput => self.amount,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(ClassicQuoteJson {
            request_id: &self.request.info.request_id,
            quote_id: self.quote_id.as_deref(),
            amount: self.amount,
            quote: self.quote,
            quote_gas_adjusted: self.quote_gas_adjusted,
            gas_use_estimate: self.gas_use_estimate,
            gas_use_estimate_quote: self.gas_use_estimate_quote,
            gas_use_estimate_usd: self.gas_use_estimate_usd.as_deref(),
            gas_price_wei: self.gas_price_wei.as_deref(),
            route_string: self.route_string.as_deref(),
            method_parameters: self.method_parameters.as_ref(),
            block_number: self.block_number.as_deref(),
            created_at: self.created_at,
        })
    }
}
