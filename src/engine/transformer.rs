//! 派发前的请求变换流水线。
//!
//! 每个变换器只能追加请求，不能删除或修改已有请求；后面的变换器能看到前面追加的结果。

use tracing::debug;

use crate::monitoring::events;

use super::chain;
use super::request::{ClassicConfig, ClassicRequest, QuoteRequest, QuoteRequestInfo};
use super::types::{Protocol, TradeType};

pub trait RequestTransformer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Requests to append given the current working set.
    fn derive_requests(
        &self,
        requests: &[QuoteRequest],
        gas_price_wei: Option<&str>,
    ) -> Vec<QuoteRequest>;
}

/// 荷兰拍请求存在时，追加一笔 “输出代币 → 1 个 wrapped native” 的 CLASSIC 探测请求，
/// 用来确认输出代币能路由回原生资产。
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteBackToNativeTransformer;

impl RouteBackToNativeTransformer {
    pub const NAME: &'static str = "route_back_to_native";

    /// The probe derived from `info`, or `None` when the chain has no known wrapped native asset.
    pub fn probe_request(
        info: &QuoteRequestInfo,
        gas_price_wei: Option<&str>,
    ) -> Option<ClassicRequest> {
        let wrapped = chain::wrapped_native(info.token_out_chain_id)?;
        let probe_info = QuoteRequestInfo {
            request_id: info.request_id.clone(),
            token_in_chain_id: info.token_out_chain_id,
            token_out_chain_id: info.token_out_chain_id,
            token_in: info.token_out,
            token_out: wrapped,
            amount: chain::one_native_unit(),
            trade_type: TradeType::ExactOutput,
            slippage_tolerance: None,
        };
        let config = ClassicConfig {
            protocols: vec![Protocol::Mixed, Protocol::V2, Protocol::V3],
            gas_price_wei: gas_price_wei.map(str::to_string),
            ..ClassicConfig::default()
        };
        Some(ClassicRequest::new(probe_info, config))
    }
}

impl RequestTransformer for RouteBackToNativeTransformer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn derive_requests(
        &self,
        requests: &[QuoteRequest],
        gas_price_wei: Option<&str>,
    ) -> Vec<QuoteRequest> {
        let Some(dutch) = requests.iter().find_map(QuoteRequest::as_dutch) else {
            events::transformer_skipped(Self::NAME, "no_dutch_request");
            return Vec::new();
        };

        let Some(probe) = Self::probe_request(&dutch.info, gas_price_wei) else {
            events::transformer_skipped(Self::NAME, "unknown_wrapped_native");
            return Vec::new();
        };

        let probe_key = probe.key();
        if requests.iter().any(|request| request.key() == probe_key) {
            debug!(
                target: "engine::transformer",
                transformer = Self::NAME,
                key = %probe_key,
                "探测请求已存在，跳过追加"
            );
            return Vec::new();
        }

        debug!(
            target: "engine::transformer",
            transformer = Self::NAME,
            key = %probe_key,
            token_in = %probe.info.token_in,
            token_out = %probe.info.token_out,
            "追加回流原生资产探测请求"
        );
        vec![QuoteRequest::Classic(probe)]
    }
}

pub struct TransformerPipeline {
    transformers: Vec<Box<dyn RequestTransformer>>,
}

impl TransformerPipeline {
    pub fn new(transformers: Vec<Box<dyn RequestTransformer>>) -> Self {
        Self { transformers }
    }

    pub fn transform(
        &self,
        mut requests: Vec<QuoteRequest>,
        gas_price_wei: Option<&str>,
    ) -> Vec<QuoteRequest> {
        for transformer in &self.transformers {
            let derived = transformer.derive_requests(&requests, gas_price_wei);
            if !derived.is_empty() {
                debug!(
                    target: "engine::transformer",
                    transformer = transformer.name(),
                    added = derived.len(),
                    "变换器追加请求"
                );
            }
            requests.extend(derived);
        }
        requests
    }
}

impl Default for TransformerPipeline {
    fn default() -> Self {
        Self::new(vec![Box::new(RouteBackToNativeTransformer)])
    }
}
