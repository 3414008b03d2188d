//! 候选报价排序。
//!
//! EXACT_INPUT 比较输出数量（越高越好），EXACT_OUTPUT 比较输入数量（越低越好），
//! CLASSIC 报价使用扣除 gas 后的数量。数量相同时 provider 直接报价优先于合成报价，
//! 仍然相同则保留派发顺序中靠前的候选。

use std::cmp::Ordering;

use super::quote::Quote;
use super::types::{QuoteSource, TradeType};

fn source_rank(source: QuoteSource) -> u8 {
    match source {
        QuoteSource::Provider => 1,
        QuoteSource::Synthetic => 0,
    }
}

/// `Greater` when `candidate` beats `incumbent`.
pub fn compare(candidate: &Quote, incumbent: &Quote) -> Ordering {
    let economic = match candidate.info().trade_type {
        TradeType::ExactInput => candidate
            .amount_out_gas_adjusted()
            .cmp(&incumbent.amount_out_gas_adjusted()),
        TradeType::ExactOutput => incumbent
            .amount_in_gas_adjusted()
            .cmp(&candidate.amount_in_gas_adjusted()),
    };
    economic.then_with(|| source_rank(candidate.source()).cmp(&source_rank(incumbent.source())))
}

/// Best quote in `candidates`, which must already be in dispatch order.
pub fn select_best<'a, I>(candidates: I) -> Option<&'a Quote>
where
    I: IntoIterator<Item = &'a Quote>,
{
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(incumbent) if compare(candidate, incumbent) != Ordering::Greater => Some(incumbent),
        _ => Some(candidate),
    })
}
