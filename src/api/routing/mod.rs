//! 链上路由 Routing API 封装（CLASSIC 报价）。

pub mod quote;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::api::{HttpQuoteError, join_endpoint, send_quote_request};
use crate::config::{LoggingConfig, LoggingProfile, ProviderEndpointConfig};
use crate::monitoring::metrics::prometheus_enabled;
use crate::monitoring::{LatencyMetadata, guard_with_level, profile_level};

pub use quote::{MethodParameters, RoutingQuoteRequest, RoutingQuoteResponse};

#[derive(Debug, Error)]
pub enum RoutingApiError {
    #[error("Routing API 请求失败: {0}")]
    Http(#[source] reqwest::Error),
    #[error("请求 {endpoint} 超时（{timeout_ms}ms）")]
    Timeout {
        endpoint: String,
        timeout_ms: u64,
        #[source]
        source: reqwest::Error,
    },
    #[error("响应解析失败: {0}")]
    Json(#[source] serde_json::Error),
    #[error("请求 {endpoint} 返回状态 {status}: {body}")]
    ApiStatus {
        endpoint: String,
        status: StatusCode,
        body: String,
    },
    #[error("请求 {endpoint} 被限流，状态 {status}: {body}")]
    RateLimited {
        endpoint: String,
        status: StatusCode,
        body: String,
    },
    #[error("Routing API 响应结构不符合预期: {0}")]
    Schema(String),
}

impl From<HttpQuoteError> for RoutingApiError {
    fn from(err: HttpQuoteError) -> Self {
        match err {
            HttpQuoteError::Http(source) => Self::Http(source),
            HttpQuoteError::Timeout {
                endpoint,
                timeout_ms,
                source,
            } => Self::Timeout {
                endpoint,
                timeout_ms,
                source,
            },
            HttpQuoteError::Json(source) => Self::Json(source),
            HttpQuoteError::ApiStatus {
                endpoint,
                status,
                body,
            } => Self::ApiStatus {
                endpoint,
                status,
                body,
            },
            HttpQuoteError::RateLimited {
                endpoint,
                status,
                body,
            } => Self::RateLimited {
                endpoint,
                status,
                body,
            },
        }
    }
}

/// 报价器与 HTTP 客户端之间的缝，测试中替换为内存实现。
#[async_trait]
pub trait RoutingTransport: Send + Sync {
    async fn quote(
        &self,
        request: &RoutingQuoteRequest,
    ) -> Result<RoutingQuoteResponse, RoutingApiError>;
}

#[derive(Clone)]
pub struct RoutingApiClient {
    base_url: String,
    client: reqwest::Client,
    quote_timeout: Duration,
    log_profile: LoggingProfile,
    slow_quote_warn_ms: u64,
}

impl fmt::Debug for RoutingApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingApiClient")
            .field("base_url", &self.base_url)
            .field("quote_timeout", &self.quote_timeout)
            .field("log_profile", &self.log_profile)
            .field("slow_quote_warn_ms", &self.slow_quote_warn_ms)
            .finish()
    }
}

impl RoutingApiClient {
    pub fn new(
        client: reqwest::Client,
        provider: &ProviderEndpointConfig,
        logging: &LoggingConfig,
    ) -> Self {
        Self {
            base_url: provider.url.clone(),
            client,
            quote_timeout: Duration::from_millis(provider.timeout_ms),
            log_profile: logging.profile,
            slow_quote_warn_ms: logging.slow_quote_warn_ms,
        }
    }

    pub async fn quote(
        &self,
        request: &RoutingQuoteRequest,
    ) -> Result<RoutingQuoteResponse, RoutingApiError> {
        let url = join_endpoint(&self.base_url, "quote");
        let metadata = LatencyMetadata::from_pairs([("stage", "quote"), ("url", url.as_str())]);
        let guard = guard_with_level("routing_api.quote", profile_level(self.log_profile), metadata)
            .with_slow_threshold(Duration::from_millis(self.slow_quote_warn_ms));

        let params = request.to_query_params();
        trace!(
            target: "routing_api::quote",
            token_in = %request.token_in,
            token_out = %request.token_out,
            amount = %request.amount,
            trade_type = request.trade_type,
            params = ?params,
            "开始请求 Routing API 报价"
        );

        let (status, json) = send_quote_request(
            self.client.get(&url).query(&params),
            &url,
            self.quote_timeout,
            |status, http_status| self.record_quote_metrics(status, None, http_status),
        )
        .await
        .inspect_err(|err| {
            warn!(
                target: "routing_api::quote",
                endpoint = %url,
                error = %err,
                "Routing API 报价请求失败"
            );
        })?;

        let quote = RoutingQuoteResponse::try_from_value(json).map_err(|err| {
            self.record_quote_metrics("schema_error", None, Some(status));
            warn!(
                target: "routing_api::quote",
                endpoint = %url,
                error = %err,
                "Routing API 报价 schema 校验失败"
            );
            RoutingApiError::Schema(err.to_string())
        })?;

        let elapsed_ms = guard.finish().as_secs_f64() * 1_000.0;
        debug!(
            target: "routing_api::quote",
            elapsed_ms = format_args!("{elapsed_ms:.3}"),
            quote = %quote.quote,
            gas_use_estimate = %quote.gas_use_estimate,
            "Routing API 报价完成"
        );
        self.record_quote_metrics("success", Some(elapsed_ms), Some(status));
        Ok(quote)
    }

    fn record_quote_metrics(
        &self,
        status: &'static str,
        elapsed_ms: Option<f64>,
        http_status: Option<StatusCode>,
    ) {
        if !prometheus_enabled() {
            return;
        }
        counter!(
            "quoter_routing_api_quote_total",
            "status" => status,
            "http_status" => http_status
                .map(|code| code.as_u16().to_string())
                .unwrap_or_else(|| "none".to_string())
        )
        .increment(1);
        if let Some(value) = elapsed_ms {
            histogram!("quoter_routing_api_quote_latency_ms", "status" => status).record(value);
        }
    }
}

#[async_trait]
impl RoutingTransport for RoutingApiClient {
    async fn quote(
        &self,
        request: &RoutingQuoteRequest,
    ) -> Result<RoutingQuoteResponse, RoutingApiError> {
        RoutingApiClient::quote(self, request).await
    }
}
