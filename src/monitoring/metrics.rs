use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use metrics::{Unit, describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::OnceCell;

use crate::config::PrometheusConfig;

static EXPORTER: OnceCell<()> = OnceCell::new();
static PROMETHEUS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Installs the exporter when `[global.prometheus]` enables it; returns whether metrics are live.
pub fn init_prometheus(config: &PrometheusConfig) -> Result<bool> {
    if !config.enable {
        return Ok(false);
    }
    try_init_prometheus(&config.listen)?;
    Ok(true)
}

fn parse_listen(listen: &str) -> Result<SocketAddr> {
    listen
        .parse()
        .with_context(|| format!("invalid prometheus listen address: {listen}"))
}

pub fn try_init_prometheus(listen: &str) -> Result<()> {
    EXPORTER
        .get_or_try_init(|| {
            let addr = parse_listen(listen)?;
            PrometheusBuilder::new()
                .with_http_listener(addr)
                .install()
                .context("failed to install prometheus exporter")?;
            describe_metrics();
            PROMETHEUS_ENABLED.store(true, Ordering::Relaxed);
            Ok(())
        })
        .map(|_| ())
}

pub fn prometheus_enabled() -> bool {
    PROMETHEUS_ENABLED.load(Ordering::Relaxed)
}

fn describe_metrics() {
    describe_counter!(
        "quoter_routing_api_quote_total",
        "Routing API quote requests by result and HTTP status"
    );
    describe_histogram!(
        "quoter_routing_api_quote_latency_ms",
        Unit::Milliseconds,
        "Routing API quote round trip"
    );
    describe_counter!(
        "quoter_rfq_quote_total",
        "RFQ quote requests by result and HTTP status"
    );
    describe_histogram!(
        "quoter_rfq_quote_latency_ms",
        Unit::Milliseconds,
        "RFQ quote round trip"
    );
    describe_counter!(
        "quoter_dispatch_total",
        "Quoter invocations by quoter, routing type and outcome"
    );
    describe_counter!(
        "quoter_transformer_skipped_total",
        "Request transformers that appended nothing"
    );
    describe_counter!(
        "quoter_synthetic_quote_total",
        "Synthetic Dutch quotes built or dropped"
    );
    describe_counter!(
        "quoter_selection_winner_total",
        "Winning quotes by routing type"
    );
}
