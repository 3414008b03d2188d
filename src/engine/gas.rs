//! 把链上路由报价换算成荷兰拍等价报价。
//!
//! 荷兰拍结算合约比路由合约多消耗 gas，原生资产进出还需要额外的
//! wrap/unwrap，这里把这部分成本折算进成交数量后再乘上改进系数。

use alloy_primitives::U256;

use super::amount::{self, ArithmeticResult, HUNDRED_PERCENT_BPS};
use super::chain::NATIVE_ADDRESS;
use super::quote::ClassicQuote;
use super::request::QuoteRequestInfo;
use super::types::TradeType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasAdjustmentConfig {
    pub base_execution_gas: u64,
    pub wrap_gas: u64,
    pub unwrap_gas: u64,
    pub improvement_exact_in_bps: u64,
    pub improvement_exact_out_bps: u64,
}

impl Default for GasAdjustmentConfig {
    fn default() -> Self {
        Self {
            base_execution_gas: 275_000,
            wrap_gas: 27_938,
            unwrap_gas: 36_000,
            improvement_exact_in_bps: 10_010,
            improvement_exact_out_bps: 9_990,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustedAmounts {
    pub amount_in: U256,
    pub amount_out: U256,
}

/// Gas units spent wrapping native input or unwrapping native output.
pub fn wrap_gas_adjustment(info: &QuoteRequestInfo, config: &GasAdjustmentConfig) -> U256 {
    let mut units = U256::ZERO;
    if info.token_in == NATIVE_ADDRESS {
        units += U256::from(config.wrap_gas);
    }
    if info.token_out == NATIVE_ADDRESS {
        units += U256::from(config.unwrap_gas);
    }
    units
}

pub fn gas_adjustment(info: &QuoteRequestInfo, config: &GasAdjustmentConfig) -> U256 {
    U256::from(config.base_execution_gas) + wrap_gas_adjustment(info, config)
}

pub fn apply_gas_adjustment(
    quote: &ClassicQuote,
    config: &GasAdjustmentConfig,
) -> ArithmeticResult<AdjustedAmounts> {
    let info = &quote.request.info;
    let hundred = U256::from(100u64);

    let gas_with_adjustment = amount::checked_add(
        quote.gas_use_estimate,
        gas_adjustment(info, config),
        "gas use estimate",
    )?;
    let gas_use_ratio = amount::mul_div(
        gas_with_adjustment,
        hundred,
        quote.gas_use_estimate,
        "gas use ratio",
    )?;
    let adjusted_gas_cost = amount::mul_div(
        quote.gas_use_estimate_quote,
        gas_use_ratio,
        hundred,
        "gas cost in quote token",
    )?;

    match info.trade_type {
        TradeType::ExactInput => {
            let classic_out = quote.amount_out();
            let amount_out = if adjusted_gas_cost >= classic_out {
                U256::ZERO
            } else {
                amount::apply_bps(
                    classic_out - adjusted_gas_cost,
                    config.improvement_exact_in_bps,
                    "exact input improvement",
                )?
            };
            Ok(AdjustedAmounts {
                amount_in: info.amount,
                amount_out,
            })
        }
        TradeType::ExactOutput => {
            let with_gas = amount::checked_add(
                quote.amount_in(),
                adjusted_gas_cost,
                "exact output gas cost",
            )?;
            let amount_in = amount::mul_div(
                with_gas,
                U256::from(config.improvement_exact_out_bps),
                U256::from(HUNDRED_PERCENT_BPS),
                "exact output improvement",
            )?;
            Ok(AdjustedAmounts {
                amount_in,
                amount_out: info.amount,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::amount::ArithmeticError;
    use crate::engine::quote::classic::fixtures::classic_quote;

    fn config_with_base(base: u64) -> GasAdjustmentConfig {
        GasAdjustmentConfig {
            base_execution_gas: base,
            ..GasAdjustmentConfig::default()
        }
    }

    #[test]
    fn output_floors_at_zero_when_gas_cost_exceeds_quote() {
        let quote = classic_quote(TradeType::ExactInput, 1_000_000, 40_000, 100_000, 50_000);
        let config = config_with_base(20_000);

        let info = &quote.request.info;
        assert_eq!(gas_adjustment(info, &config), U256::from(20_000u64));

        let adjusted = apply_gas_adjustment(&quote, &config).unwrap();
        assert_eq!(adjusted.amount_out, U256::ZERO);
        assert_eq!(adjusted.amount_in, U256::from(1_000_000u64));
    }

    #[test]
    fn exact_input_subtracts_scaled_gas_then_improves() {
        // ratio 120, gas cost 60_000, (2_000_000 - 60_000) * 10010 / 10000
        let quote = classic_quote(TradeType::ExactInput, 1_000_000, 2_000_000, 100_000, 50_000);
        let adjusted = apply_gas_adjustment(&quote, &config_with_base(20_000)).unwrap();
        assert_eq!(adjusted.amount_out, U256::from(1_941_940u64));
    }

    #[test]
    fn exact_output_adds_scaled_gas_then_improves() {
        // (1_000_000 + 60_000) * 9990 / 10000
        let quote = classic_quote(TradeType::ExactOutput, 500, 1_000_000, 100_000, 50_000);
        let adjusted = apply_gas_adjustment(&quote, &config_with_base(20_000)).unwrap();
        assert_eq!(adjusted.amount_in, U256::from(1_058_940u64));
        assert_eq!(adjusted.amount_out, U256::from(500u64));
    }

    #[test]
    fn native_tokens_add_wrap_and_unwrap_gas() {
        let mut quote = classic_quote(TradeType::ExactInput, 1, 1, 1, 1);
        let config = GasAdjustmentConfig::default();
        quote.request.info.token_in = NATIVE_ADDRESS;
        assert_eq!(
            gas_adjustment(&quote.request.info, &config),
            U256::from(275_000u64 + 27_938)
        );
        quote.request.info.token_out = NATIVE_ADDRESS;
        assert_eq!(
            wrap_gas_adjustment(&quote.request.info, &config),
            U256::from(27_938u64 + 36_000)
        );
    }

    #[test]
    fn adjustment_is_deterministic() {
        let quote = classic_quote(TradeType::ExactInput, 10, 9_000_000, 150_000, 7_777);
        let config = GasAdjustmentConfig::default();
        let first = apply_gas_adjustment(&quote, &config).unwrap();
        for _ in 0..16 {
            assert_eq!(apply_gas_adjustment(&quote, &config).unwrap(), first);
        }
    }

    #[test]
    fn zero_gas_estimate_is_rejected() {
        let quote = classic_quote(TradeType::ExactInput, 10, 100, 0, 5);
        assert!(matches!(
            apply_gas_adjustment(&quote, &GasAdjustmentConfig::default()),
            Err(ArithmeticError::DivisionByZero { .. })
        ));
    }
}
