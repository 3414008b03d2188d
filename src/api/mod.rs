pub mod rfq;
pub mod routing;
pub mod serde_helpers;

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub use rfq::{RfqApiClient, RfqApiError, RfqQuoteRequest, RfqTransport};
pub use routing::{RoutingApiClient, RoutingApiError, RoutingQuoteRequest, RoutingTransport};

/// 报价接口共用的传输层失败，调用方再映射为各自的错误类型。
#[derive(Debug, Error)]
pub enum HttpQuoteError {
    #[error("请求发送失败: {0}")]
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
}

/// 发送报价请求并按状态码分类；`record` 收到每次失败或成功的指标标签与 HTTP 状态。
pub(crate) async fn send_quote_request<F>(
    request: reqwest::RequestBuilder,
    endpoint: &str,
    timeout: Duration,
    record: F,
) -> Result<(StatusCode, Value), HttpQuoteError>
where
    F: Fn(&'static str, Option<StatusCode>),
{
    let timeout_ms = timeout.as_millis() as u64;
    let timed_out = |source: reqwest::Error| HttpQuoteError::Timeout {
        endpoint: endpoint.to_string(),
        timeout_ms,
        source,
    };

    let response = request.timeout(timeout).send().await.map_err(|err| {
        if err.is_timeout() {
            record("timeout", None);
            timed_out(err)
        } else {
            record("transport_error", None);
            HttpQuoteError::Http(err)
        }
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        if err.is_timeout() {
            record("timeout", Some(status));
            timed_out(err)
        } else {
            record("read_error", Some(status));
            HttpQuoteError::Http(err)
        }
    })?;

    if status == StatusCode::TOO_MANY_REQUESTS {
        record("rate_limited", Some(status));
        return Err(HttpQuoteError::RateLimited {
            endpoint: endpoint.to_string(),
            status,
            body: summarize_error_body(body),
        });
    }

    if !status.is_success() {
        record("http_error", Some(status));
        return Err(HttpQuoteError::ApiStatus {
            endpoint: endpoint.to_string(),
            status,
            body: summarize_error_body(body),
        });
    }

    let json = serde_json::from_str(&body).map_err(|err| {
        record("decode_error", Some(status));
        HttpQuoteError::Json(err)
    })?;
    Ok((status, json))
}

pub(crate) fn join_endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// 把错误及其 source 链压成一行，连续重复的描述只保留一次。
pub(crate) fn describe_error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut current = error.source();
    while let Some(err) = current {
        let text = err.to_string();
        if parts.last().map(|last| last != &text).unwrap_or(true) {
            parts.push(text);
        }
        current = err.source();
    }
    parts.join(" | caused by: ")
}

pub(crate) fn summarize_error_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty response body)".to_string();
    }
    let mut single_line = trimmed.replace(['\n', '\r'], " ");
    const MAX_LEN: usize = 512;
    if single_line.len() > MAX_LEN {
        let mut cut = MAX_LEN;
        while !single_line.is_char_boundary(cut) {
            cut -= 1;
        }
        single_line.truncate(cut);
        single_line.push('…');
    }
    single_line
}
