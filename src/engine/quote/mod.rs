//! 报价模型：按路由类型区分的封闭枚举，统一提供响应 JSON、订单负载与日志记录三种视图。

pub mod classic;
pub mod dutch;

use alloy_primitives::{Address, U256};
use serde::Serialize;
use serde_json::Value;

use crate::api::routing::MethodParameters;
use crate::api::serde_helpers::{amount_as_string, checksum_address};

use super::order::DutchOrder;
use super::request::QuoteRequestInfo;
use super::types::{QuoteSource, RoutingType};

pub use classic::ClassicQuote;
pub use dutch::DutchQuote;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quote {
    Classic(ClassicQuote),
    DutchLimit(DutchQuote),
}

/// 交给下游签名/提交的负载。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OrderPayload {
    Dutch(DutchOrder),
    Classic(MethodParameters),
}

/// One structured record per settled or synthesized quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLog {
    pub token_in_chain_id: u64,
    pub token_out_chain_id: u64,
    pub request_id: String,
    pub quote_id: Option<String>,
    #[serde(with = "checksum_address")]
    pub token_in: Address,
    #[serde(with = "checksum_address")]
    pub token_out: Address,
    #[serde(with = "amount_as_string")]
    pub amount_in: U256,
    #[serde(with = "amount_as_string")]
    pub amount_out: U256,
    #[serde(with = "amount_as_string")]
    pub end_amount_in: U256,
    #[serde(with = "amount_as_string")]
    pub end_amount_out: U256,
    #[serde(with = "amount_as_string")]
    pub amount_in_gas_adjusted: U256,
    #[serde(with = "amount_as_string")]
    pub amount_out_gas_adjusted: U256,
    #[serde(with = "checksum_address::option")]
    pub offerer: Option<Address>,
    #[serde(with = "checksum_address::option")]
    pub filler: Option<Address>,
    pub routing: RoutingType,
    pub source: QuoteSource,
    /// bps；请求未携带滑点时为 -1。
    pub slippage: i64,
    pub created_at: u64,
}

impl Quote {
    pub fn routing_type(&self) -> RoutingType {
        match self {
            Quote::Classic(_) => RoutingType::Classic,
            Quote::DutchLimit(_) => RoutingType::DutchLimit,
        }
    }

    pub fn info(&self) -> &QuoteRequestInfo {
        match self {
            Quote::Classic(quote) => &quote.request.info,
            Quote::DutchLimit(quote) => &quote.request.info,
        }
    }

    pub fn source(&self) -> QuoteSource {
        match self {
            Quote::Classic(_) => QuoteSource::Provider,
            Quote::DutchLimit(quote) => quote.source,
        }
    }

    pub fn quote_id(&self) -> Option<&str> {
        match self {
            Quote::Classic(quote) => quote.quote_id.as_deref(),
            Quote::DutchLimit(quote) => Some(&quote.quote_id),
        }
    }

    pub fn amount_in(&self) -> U256 {
        match self {
            Quote::Classic(quote) => quote.amount_in(),
            Quote::DutchLimit(quote) => quote.amount_in,
        }
    }

    pub fn amount_out(&self) -> U256 {
        match self {
            Quote::Classic(quote) => quote.amount_out(),
            Quote::DutchLimit(quote) => quote.amount_out,
        }
    }

    /// Input amount net of execution cost; Dutch fills carry no gas for the swapper.
    pub fn amount_in_gas_adjusted(&self) -> U256 {
        match self {
            Quote::Classic(quote) => quote.amount_in_gas_adjusted(),
            Quote::DutchLimit(quote) => quote.amount_in,
        }
    }

    pub fn amount_out_gas_adjusted(&self) -> U256 {
        match self {
            Quote::Classic(quote) => quote.amount_out_gas_adjusted(),
            Quote::DutchLimit(quote) => quote.amount_out,
        }
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            Quote::Classic(quote) => quote.to_json(),
            Quote::DutchLimit(quote) => quote.to_json(),
        }
    }

    /// Dutch quotes always yield an order; classic quotes only when the route carries calldata.
    pub fn to_order(&self) -> Option<OrderPayload> {
        match self {
            Quote::Classic(quote) => quote.method_parameters.clone().map(OrderPayload::Classic),
            Quote::DutchLimit(quote) => Some(OrderPayload::Dutch(quote.to_order())),
        }
    }

    pub fn to_log(&self) -> QuoteLog {
        let info = self.info();
        let slippage = info
            .slippage_tolerance
            .and_then(|bps| i64::try_from(bps).ok())
            .unwrap_or(-1);
        match self {
            Quote::Classic(quote) => QuoteLog {
                token_in_chain_id: info.token_in_chain_id,
                token_out_chain_id: info.token_out_chain_id,
                request_id: info.request_id.clone(),
                quote_id: quote.quote_id.clone(),
                token_in: info.token_in,
                token_out: info.token_out,
                amount_in: quote.amount_in(),
                amount_out: quote.amount_out(),
                end_amount_in: quote.amount_in(),
                end_amount_out: quote.amount_out(),
                amount_in_gas_adjusted: quote.amount_in_gas_adjusted(),
                amount_out_gas_adjusted: quote.amount_out_gas_adjusted(),
                offerer: None,
                filler: None,
                routing: RoutingType::Classic,
                source: QuoteSource::Provider,
                slippage,
                created_at: quote.created_at,
            },
            Quote::DutchLimit(quote) => QuoteLog {
                token_in_chain_id: quote.chain_id,
                token_out_chain_id: quote.chain_id,
                request_id: quote.request_id.clone(),
                quote_id: Some(quote.quote_id.clone()),
                token_in: quote.token_in,
                token_out: quote.token_out,
                amount_in: quote.amount_in,
                amount_out: quote.amount_out,
                end_amount_in: quote.end_amount_in,
                end_amount_out: quote.end_amount_out,
                amount_in_gas_adjusted: quote.amount_in,
                amount_out_gas_adjusted: quote.amount_out,
                offerer: Some(quote.offerer),
                filler: quote.filler,
                routing: RoutingType::DutchLimit,
                source: quote.source,
                slippage,
                created_at: quote.created_at,
            },
        }
    }
}

impl From<ClassicQuote> for Quote {
    fn from(quote: ClassicQuote) -> Self {
        Quote::Classic(quote)
    }
}

impl From<DutchQuote> for Quote {
    fn from(quote: DutchQuote) -> Self {
        Quote::DutchLimit(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::classic::fixtures::classic_quote;
    use super::dutch::fixtures::dutch_quote;
    use super::*;
    use crate::engine::request::fixtures::FILLER;
    use crate::engine::types::TradeType;

    #[test]
    fn classic_log_has_no_slippage_or_offerer() {
        let quote = Quote::from(classic_quote(TradeType::ExactInput, 1_000, 2_000, 10, 5));
        let log = quote.to_log();
        assert_eq!(log.slippage, -1);
        assert_eq!(log.offerer, None);
        assert_eq!(log.end_amount_out, U256::from(2_000u64));
        assert_eq!(log.routing, RoutingType::Classic);

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["routing"], "CLASSIC");
        assert_eq!(json["amountOut"], "2000");
        assert!(json["offerer"].is_null());
    }

    #[test]
    fn dutch_log_carries_end_amounts_and_filler() {
        let quote = Quote::from(dutch_quote(
            TradeType::ExactInput,
            1_000_000,
            2_000_000,
            50,
            Some(FILLER),
        ));
        let log = quote.to_log();
        assert_eq!(log.slippage, 50);
        assert_eq!(log.end_amount_out, U256::from(1_990_000u64));
        assert_eq!(log.filler, Some(FILLER));
        assert_eq!(log.quote_id.as_deref(), Some("dutch-1"));
        assert_eq!(log.source, QuoteSource::Provider);
    }

    #[test]
    fn classic_order_requires_method_parameters() {
        let mut classic = classic_quote(TradeType::ExactInput, 1, 2, 1, 1);
        assert_eq!(Quote::from(classic.clone()).to_order(), None);

        classic.method_parameters = Some(MethodParameters {
            calldata: "0xdeadbeef".to_string(),
            value: "0x00".to_string(),
            to: None,
        });
        assert!(matches!(
            Quote::from(classic).to_order(),
            Some(OrderPayload::Classic(_))
        ));
    }

    #[test]
    fn dutch_order_is_always_built() {
        let quote = Quote::from(dutch_quote(TradeType::ExactInput, 1, 2, 0, None));
        assert!(matches!(quote.to_order(), Some(OrderPayload::Dutch(_))));
        assert_eq!(quote.routing_type(), RoutingType::DutchLimit);
        assert_eq!(quote.info().trade_type, TradeType::ExactInput);
    }
}
