use alloy_primitives::{Address, U256};
use serde::Serialize;

use crate::api::rfq::RfqQuoteResponse;
use crate::engine::amount::{self, ArithmeticResult};
use crate::engine::gas::{self, GasAdjustmentConfig};
use crate::engine::order::{self, DutchOrder, OrderInput, OrderOutput};
use crate::engine::request::DutchRequest;
use crate::engine::types::{QuoteSource, TradeType};

use super::ClassicQuote;

/// 荷兰拍报价；衰减终点数量在构造时由滑点一次性算出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutchQuote {
    pub request: DutchRequest,
    pub chain_id: u64,
    pub request_id: String,
    pub quote_id: String,
    pub token_in: Address,
    pub amount_in: U256,
    pub token_out: Address,
    pub amount_out: U256,
    pub end_amount_in: U256,
    pub end_amount_out: U256,
    pub offerer: Address,
    pub filler: Option<Address>,
    pub nonce: Option<U256>,
    pub created_at: u64,
    pub source: QuoteSource,
}

/// Settled fields a Dutch quote is built from.
#[derive(Debug, Clone)]
pub struct DutchQuoteParts {
    pub chain_id: u64,
    pub request_id: String,
    pub quote_id: Option<String>,
    pub token_in: Address,
    pub amount_in: U256,
    pub token_out: Address,
    pub amount_out: U256,
    pub offerer: Address,
    pub filler: Option<Address>,
    pub nonce: Option<U256>,
    pub created_at: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DutchQuoteJson<'a> {
    #[serde(flatten)]
    order: &'a DutchOrder,
    quote_id: &'a str,
}

impl DutchQuote {
    pub fn new(
        request: DutchRequest,
        parts: DutchQuoteParts,
        source: QuoteSource,
    ) -> ArithmeticResult<Self> {
        let slippage_bps = request.slippage_bps();
        let (end_amount_in, end_amount_out) = match request.info.trade_type {
            TradeType::ExactInput => (
                parts.amount_in,
                amount::decrease_by_bps(parts.amount_out, slippage_bps)?,
            ),
            TradeType::ExactOutput => (
                amount::increase_by_bps(parts.amount_in, slippage_bps)?,
                parts.amount_out,
            ),
        };
        Ok(Self {
            request,
            chain_id: parts.chain_id,
            request_id: parts.request_id,
            quote_id: parts
                .quote_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            token_in: parts.token_in,
            amount_in: parts.amount_in,
            token_out: parts.token_out,
            amount_out: parts.amount_out,
            end_amount_in,
            end_amount_out,
            offerer: parts.offerer,
            filler: parts.filler,
            nonce: parts.nonce,
            created_at: parts.created_at,
            source,
        })
    }

    pub fn from_response(
        request: DutchRequest,
        response: RfqQuoteResponse,
        nonce: Option<U256>,
        created_at: u64,
    ) -> ArithmeticResult<Self> {
        let parts = DutchQuoteParts {
            chain_id: response.chain_id,
            request_id: response.request_id,
            quote_id: response.quote_id,
            token_in: response.token_in,
            amount_in: response.amount_in,
            token_out: response.token_out,
            amount_out: response.amount_out,
            offerer: response.offerer,
            filler: response.filler,
            nonce,
            created_at,
        };
        Self::new(request, parts, QuoteSource::Provider)
    }

    /// Synthetic quote priced off a classic route after gas adjustment.
    pub fn from_classic_quote(
        request: &DutchRequest,
        classic: &ClassicQuote,
        config: &GasAdjustmentConfig,
    ) -> ArithmeticResult<Self> {
        let adjusted = gas::apply_gas_adjustment(classic, config)?;
        let parts = DutchQuoteParts {
            chain_id: request.info.token_in_chain_id,
            request_id: request.info.request_id.clone(),
            quote_id: None,
            token_in: request.info.token_in,
            amount_in: adjusted.amount_in,
            token_out: classic.request.info.token_out,
            amount_out: adjusted.amount_out,
            offerer: request.config.offerer,
            filler: None,
            nonce: None,
            created_at: classic.created_at,
        };
        Self::new(request.clone(), parts, QuoteSource::Synthetic)
    }

    /// Builds the order with its decay window opening at `now`.
    pub fn to_order_at(&self, now: u64) -> DutchOrder {
        let config = &self.request.config;
        let decay_end_time = now.saturating_add(config.auction_period_secs);
        DutchOrder {
            chain_id: self.chain_id,
            offerer: config.offerer,
            nonce: self.nonce.unwrap_or_else(order::generate_nonce),
            decay_start_time: now,
            decay_end_time,
            deadline: decay_end_time,
            input: OrderInput {
                token: self.token_in,
                start_amount: self.amount_in,
                end_amount: self.end_amount_in,
            },
            outputs: vec![OrderOutput {
                token: self.token_out,
                start_amount: self.amount_out,
                end_amount: self.end_amount_out,
                recipient: config.offerer,
            }],
            exclusive_filler: self.filler,
            exclusivity_override_bps: self.filler.map(|_| config.exclusivity_override_bps),
        }
    }

    pub fn to_order(&self) -> DutchOrder {
        self.to_order_at(order::unix_now())
    }

    /// Response JSON for an already built order, so the nonce shown matches the one signed.
    pub fn json_for_order(&self, order: &DutchOrder) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(DutchQuoteJson {
            order,
            quote_id: &self.quote_id,
        })
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.json_for_order(&self.to_order())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::dutch_quote;
    use super::*;
    use crate::engine::amount::{ArithmeticError, HUNDRED_PERCENT_BPS};
    use crate::engine::quote::classic::fixtures::classic_quote;
    use crate::engine::request::fixtures::{self as requests, FILLER, OFFERER, TOKEN_IN, TOKEN_OUT};

    #[test]
    fn exact_input_decays_output_by_slippage() {
        let quote = dutch_quote(TradeType::ExactInput, 1_000_000, 2_000_000, 50, None);
        assert_eq!(quote.end_amount_in, U256::from(1_000_000u64));
        assert_eq!(quote.end_amount_out, U256::from(1_990_000u64));
    }

    #[test]
    fn exact_output_grows_input_by_slippage() {
        let quote = dutch_quote(TradeType::ExactOutput, 1_000_000, 2_000_000, 50, None);
        assert_eq!(quote.end_amount_in, U256::from(1_005_000u64));
        assert_eq!(quote.end_amount_out, U256::from(2_000_000u64));
    }

    #[test]
    fn end_amounts_respect_worst_case_direction() {
        for bps in [0, 1, 50, 200, 5_000, HUNDRED_PERCENT_BPS] {
            let exact_in = dutch_quote(TradeType::ExactInput, 7_777, 123_457, bps, None);
            assert!(exact_in.end_amount_out <= exact_in.amount_out);
            assert_eq!(exact_in.end_amount_out == exact_in.amount_out, bps == 0);

            let exact_out = dutch_quote(TradeType::ExactOutput, 123_457, 7_777, bps, None);
            assert!(exact_out.end_amount_in >= exact_out.amount_in);
            assert_eq!(exact_out.end_amount_in == exact_out.amount_in, bps == 0);
        }
    }

    #[test]
    fn oversized_amount_is_rejected_not_wrapped() {
        let request = requests::dutch(TradeType::ExactOutput, 1, 50);
        let parts = DutchQuoteParts {
            chain_id: 1,
            request_id: "r".to_string(),
            quote_id: None,
            token_in: TOKEN_IN,
            amount_in: U256::MAX,
            token_out: TOKEN_OUT,
            amount_out: U256::from(1u64),
            offerer: OFFERER,
            filler: None,
            nonce: None,
            created_at: 0,
        };
        assert!(matches!(
            DutchQuote::new(request, parts, QuoteSource::Provider),
            Err(ArithmeticError::Overflow { .. })
        ));
    }

    #[test]
    fn missing_quote_id_is_generated() {
        let request = requests::dutch(TradeType::ExactInput, 1, 0);
        let parts = DutchQuoteParts {
            chain_id: 1,
            request_id: "r".to_string(),
            quote_id: None,
            token_in: TOKEN_IN,
            amount_in: U256::from(1u64),
            token_out: TOKEN_OUT,
            amount_out: U256::from(1u64),
            offerer: OFFERER,
            filler: None,
            nonce: None,
            created_at: 0,
        };
        let quote = DutchQuote::new(request, parts, QuoteSource::Provider).unwrap();
        assert!(uuid::Uuid::parse_str(&quote.quote_id).is_ok());
    }

    #[test]
    fn order_window_and_exclusivity() {
        let quote = dutch_quote(TradeType::ExactInput, 1_000, 2_000, 50, Some(FILLER));
        let order = quote.to_order_at(1_000);
        assert_eq!(order.decay_start_time, 1_000);
        assert_eq!(order.decay_end_time, 1_060);
        assert_eq!(order.deadline, 1_060);
        assert_eq!(order.exclusive_filler, Some(FILLER));
        assert_eq!(order.exclusivity_override_bps, Some(12));
        assert_eq!(order.input.end_amount, U256::from(1_000u64));
        let output = &order.outputs[0];
        assert_eq!(output.end_amount, U256::from(1_990u64));
        assert_eq!(output.recipient, OFFERER);
        assert_eq!(order.nonce % U256::from(256u64), U256::ZERO);
    }

    #[test]
    fn supplied_nonce_is_reused() {
        let mut quote = dutch_quote(TradeType::ExactInput, 1_000, 2_000, 50, None);
        quote.nonce = Some(U256::from(42u64));
        let order = quote.to_order_at(5);
        assert_eq!(order.nonce, U256::from(42u64));
        assert_eq!(order.exclusive_filler, None);
        assert_eq!(order.exclusivity_override_bps, None);
    }

    #[test]
    fn json_is_order_plus_quote_id() {
        let quote = dutch_quote(TradeType::ExactInput, 1_000, 2_000, 50, None);
        let order = quote.to_order_at(100);
        let json = quote.json_for_order(&order).unwrap();
        assert_eq!(json["quoteId"], "dutch-1");
        assert_eq!(json["decayStartTime"], 100);
        assert_eq!(json["nonce"], order.nonce.to_string());
    }

    #[test]
    fn synthetic_quote_from_classic() {
        let classic = classic_quote(TradeType::ExactInput, 1_000_000, 2_000_000, 100_000, 50_000);
        let request = requests::dutch(TradeType::ExactInput, 1_000_000, 50);
        let config = GasAdjustmentConfig {
            base_execution_gas: 20_000,
            ..GasAdjustmentConfig::default()
        };
        let quote = DutchQuote::from_classic_quote(&request, &classic, &config).unwrap();
        assert_eq!(quote.source, QuoteSource::Synthetic);
        assert_eq!(quote.amount_out, U256::from(1_941_940u64));
        assert_eq!(quote.end_amount_out, U256::from(1_932_230u64));
        assert_eq!(quote.filler, None);
        assert_eq!(quote.nonce, None);
        assert_eq!(quote.created_at, classic.created_at);
        assert_eq!(quote.offerer, OFFERER);
        assert_ne!(quote.quote_id, classic.quote_id.clone().unwrap());
    }
}
