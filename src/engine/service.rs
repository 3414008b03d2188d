//! 一次报价调用的完整流程：变换 → 派发 → 记录 → 合成 → 选优。

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::{Level, debug, info, trace, warn};

use crate::api::{RfqApiClient, RoutingApiClient};
use crate::config::QuoterConfig;
use crate::monitoring::{LatencyMetadata, events, guard_with_level, profile_level};

use super::dispatcher::{DispatchedQuote, QuoteDispatcher};
use super::gas::GasAdjustmentConfig;
use super::quote::{DutchQuote, OrderPayload, Quote};
use super::quoter::{Quoter, RfqQuoter, RoutingApiQuoter};
use super::request::QuoteRequest;
use super::selection;
use super::transformer::{RouteBackToNativeTransformer, TransformerPipeline};
use super::validation::ValidationError;
use super::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub struct QuoteOutcome {
    pub best: Quote,
    /// Every quote answering one of the caller's requests, in dispatch order.
    pub candidates: Vec<Quote>,
    pub order: Option<OrderPayload>,
}

impl QuoteOutcome {
    /// `{ "routing": ..., "quote": ... }`; a Dutch winner is rendered from the stored order.
    pub fn to_response_json(&self) -> Result<Value, serde_json::Error> {
        let quote = match (&self.best, &self.order) {
            (Quote::DutchLimit(dutch), Some(OrderPayload::Dutch(order))) => {
                dutch.json_for_order(order)?
            }
            (best, _) => best.to_json()?,
        };
        Ok(json!({
            "routing": self.best.routing_type().as_str(),
            "quote": quote,
        }))
    }
}

pub struct QuoteService {
    pipeline: TransformerPipeline,
    dispatcher: QuoteDispatcher,
    gas: GasAdjustmentConfig,
    latency_level: Level,
    slow_after: Option<Duration>,
}

impl QuoteService {
    pub fn new(
        pipeline: TransformerPipeline,
        dispatcher: QuoteDispatcher,
        gas: GasAdjustmentConfig,
    ) -> Self {
        Self {
            pipeline,
            dispatcher,
            gas,
            latency_level: Level::DEBUG,
            slow_after: None,
        }
    }

    /// Registers one quoter per active provider, routing API first.
    pub fn from_config(config: &QuoterConfig, client: reqwest::Client) -> EngineResult<Self> {
        let logging = &config.global.logging;
        let mut quoters: Vec<Arc<dyn Quoter>> = Vec::new();

        let routing_api = &config.providers.routing_api;
        if routing_api.is_active() {
            let transport = RoutingApiClient::new(client.clone(), routing_api, logging);
            quoters.push(Arc::new(RoutingApiQuoter::new(Arc::new(transport))));
        } else {
            info!(target: "engine::dispatcher", quoter = RoutingApiQuoter::NAME, "provider 未启用");
        }

        let rfq = &config.providers.rfq;
        if rfq.is_active() {
            let transport = RfqApiClient::new(client, rfq, logging);
            quoters.push(Arc::new(RfqQuoter::new(Arc::new(transport))));
        } else {
            info!(target: "engine::dispatcher", quoter = RfqQuoter::NAME, "provider 未启用");
        }

        if quoters.is_empty() {
            return Err(EngineError::InvalidConfig(
                "providers.routing_api 与 providers.rfq 均未启用".to_string(),
            ));
        }

        let mut service = Self::new(
            TransformerPipeline::default(),
            QuoteDispatcher::new(quoters),
            GasAdjustmentConfig::from(&config.gas),
        );
        service.latency_level = profile_level(logging.profile);
        service.slow_after = Some(Duration::from_millis(logging.slow_quote_warn_ms));
        Ok(service)
    }

    pub fn dispatcher(&self) -> &QuoteDispatcher {
        &self.dispatcher
    }

    pub async fn quote(
        &self,
        requests: Vec<QuoteRequest>,
        gas_price_wei: Option<&str>,
        cancel: &CancellationToken,
    ) -> EngineResult<QuoteOutcome> {
        let Some(first) = requests.first() else {
            return Err(ValidationError::NoConfigs.into());
        };
        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        let request_id = first.info().request_id.clone();
        let mut guard = guard_with_level(
            "quote_service.quote",
            self.latency_level,
            LatencyMetadata::from_pairs([("request_id", request_id.as_str())]),
        );
        if let Some(threshold) = self.slow_after {
            guard = guard.with_slow_threshold(threshold);
        }

        let caller_count = requests.len();
        let working = self.pipeline.transform(requests, gas_price_wei);
        for request in &working {
            if let Ok(json) = request.to_json() {
                trace!(
                    target: "engine::dispatcher",
                    routing = %request.routing_type(),
                    request = %json,
                    "待派发请求"
                );
            }
        }
        let dispatched = self.dispatcher.dispatch(&working, cancel).await?;
        for entry in &dispatched {
            events::quote_log(&entry.quote);
        }

        let caller = &working[..caller_count];
        let probe_answered = self.probe_answered(caller, &working, &dispatched, gas_price_wei);
        let synthetic = if probe_answered {
            self.synthesize(caller, &dispatched)
        } else {
            debug!(
                target: "engine::dispatcher",
                request_id = %request_id,
                "回流探测无报价，跳过合成荷兰拍报价"
            );
            Vec::new()
        };

        let mut candidates: Vec<Quote> = dispatched
            .into_iter()
            .filter(|entry| entry.request_index < caller_count)
            .map(|entry| entry.quote)
            .collect();
        candidates.extend(synthetic);

        let Some(best) = selection::select_best(&candidates).cloned() else {
            guard.finish();
            warn!(
                target: "engine::dispatcher",
                request_id = %request_id,
                requests = caller_count,
                "没有可用报价"
            );
            return Err(EngineError::NoQuoteAvailable { request_id });
        };

        events::selection_winner(&best, candidates.len());
        let order = best.to_order();
        guard.finish();
        Ok(QuoteOutcome {
            best,
            candidates,
            order,
        })
    }

    /// True unless a route-back probe was dispatched for the caller's Dutch request and came back empty.
    fn probe_answered(
        &self,
        caller: &[QuoteRequest],
        working: &[QuoteRequest],
        dispatched: &[DispatchedQuote],
        gas_price_wei: Option<&str>,
    ) -> bool {
        let Some(dutch) = caller.iter().find_map(QuoteRequest::as_dutch) else {
            return true;
        };
        let Some(probe) = RouteBackToNativeTransformer::probe_request(&dutch.info, gas_price_wei)
        else {
            return true;
        };
        let probe_key = probe.key();
        let Some(probe_index) = working.iter().position(|request| request.key() == probe_key)
        else {
            return true;
        };
        dispatched
            .iter()
            .any(|entry| entry.request_index == probe_index)
    }

    /// One synthetic Dutch quote per (Dutch request, classic quote on the same swap).
    fn synthesize(&self, caller: &[QuoteRequest], dispatched: &[DispatchedQuote]) -> Vec<Quote> {
        let mut synthetic = Vec::new();
        for dutch in caller.iter().filter_map(QuoteRequest::as_dutch) {
            let dutch_key = dutch.key();
            for entry in dispatched {
                let Some(classic_request) = caller
                    .get(entry.request_index)
                    .and_then(QuoteRequest::as_classic)
                else {
                    continue;
                };
                let Quote::Classic(classic) = &entry.quote else {
                    continue;
                };
                if !classic_request.info.same_swap(&dutch.info) {
                    continue;
                }
                match DutchQuote::from_classic_quote(dutch, classic, &self.gas) {
                    Ok(quote) => {
                        events::synthetic_quote(&dutch_key, true);
                        let quote = Quote::from(quote);
                        events::quote_log(&quote);
                        synthetic.push(quote);
                    }
                    Err(err) => {
                        events::synthetic_quote(&dutch_key, false);
                        warn!(
                            target: "engine::dispatcher",
                            request_key = %dutch_key,
                            quoter = entry.quoter,
                            error = %err,
                            "合成荷兰拍报价失败，丢弃该候选"
                        );
                    }
                }
            }
        }
        synthetic
    }
}
