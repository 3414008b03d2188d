//! 报价器抽象：每个 provider 一个实现，错误在报价器边界内收敛为“无报价”。

pub mod rfq;
pub mod routing_api;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::api::{RfqApiError, RoutingApiError, describe_error_chain};

use super::amount::ArithmeticError;
use super::quote::Quote;
use super::request::QuoteRequest;
use super::types::RoutingType;

pub use rfq::RfqQuoter;
pub use routing_api::RoutingApiQuoter;

#[derive(Debug, Error)]
pub enum QuoterError {
    #[error("Routing API 错误: {0}")]
    RoutingApi(#[from] RoutingApiError),
    #[error("RFQ API 错误: {0}")]
    Rfq(#[from] RfqApiError),
    #[error("报价器 {quoter} 不处理 {routing} 请求")]
    RoutingMismatch {
        quoter: &'static str,
        routing: RoutingType,
    },
    #[error("报价数量计算失败: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl QuoterError {
    pub fn describe(&self) -> String {
        describe_error_chain(self)
    }
}

#[async_trait]
pub trait Quoter: Send + Sync {
    fn name(&self) -> &'static str;

    fn routing_type(&self) -> RoutingType;

    async fn try_quote(&self, request: &QuoteRequest) -> Result<Quote, QuoterError>;

    /// Never fails: any error is logged and reported as no quote.
    async fn quote(&self, request: &QuoteRequest) -> Option<Quote> {
        match self.try_quote(request).await {
            Ok(quote) => Some(quote),
            Err(err) => {
                warn!(
                    target: "engine::dispatcher",
                    quoter = self.name(),
                    request_key = %request.key(),
                    error = %err.describe(),
                    "报价器返回错误，按无报价处理"
                );
                None
            }
        }
    }
}
