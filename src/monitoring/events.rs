use metrics::counter;
use tracing::{debug, info, warn};

use crate::engine::quote::Quote;
use crate::engine::types::RoutingType;

use super::metrics::prometheus_enabled;

/// Log sink for every settled or synthesized quote.
pub fn quote_log(quote: &Quote) {
    let record = quote.to_log();
    match serde_json::to_string(&record) {
        Ok(record_json) => info!(
            target: "monitoring::quote",
            event = "quote",
            routing = %record.routing,
            request_id = %record.request_id,
            quote_id = record.quote_id.as_deref().unwrap_or(""),
            record = %record_json,
            "quote settled"
        ),
        Err(err) => warn!(
            target: "monitoring::quote",
            event = "quote",
            routing = %record.routing,
            error = %err,
            "quote log record failed to serialize"
        ),
    }
}

pub fn transformer_skipped(transformer: &'static str, reason: &'static str) {
    info!(
        target: "engine::transformer",
        event = "skipped",
        transformer,
        reason,
        "request transformer skipped"
    );

    if prometheus_enabled() {
        counter!(
            "quoter_transformer_skipped_total",
            "transformer" => transformer,
            "reason" => reason
        )
        .increment(1);
    }
}

pub fn dispatch_outcome(quoter: &'static str, routing: RoutingType, produced: bool) {
    debug!(
        target: "engine::dispatcher",
        event = "outcome",
        quoter,
        routing = %routing,
        produced,
        "quoter finished"
    );

    if prometheus_enabled() {
        counter!(
            "quoter_dispatch_total",
            "quoter" => quoter,
            "routing" => routing.as_str(),
            "result" => if produced { "quote" } else { "none" }
        )
        .increment(1);
    }
}

pub fn synthetic_quote(request_key: &str, produced: bool) {
    debug!(
        target: "monitoring::quote",
        event = "synthesized",
        request_key,
        produced,
        "synthetic dutch quote evaluated"
    );

    if prometheus_enabled() {
        counter!(
            "quoter_synthetic_quote_total",
            "result" => if produced { "quote" } else { "dropped" }
        )
        .increment(1);
    }
}

pub fn selection_winner(quote: &Quote, candidates: usize) {
    info!(
        target: "monitoring::quote",
        event = "winner",
        routing = %quote.routing_type(),
        request_id = %quote.info().request_id,
        quote_id = quote.quote_id().unwrap_or(""),
        amount_in = %quote.amount_in(),
        amount_out = %quote.amount_out(),
        candidates,
        "best quote selected"
    );

    if prometheus_enabled() {
        counter!(
            "quoter_selection_winner_total",
            "routing" => quote.routing_type().as_str()
        )
        .increment(1);
    }
}
