use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{RoutingQuoteRequest, RoutingTransport};
use crate::engine::order::unix_now;
use crate::engine::quote::{ClassicQuote, Quote};
use crate::engine::request::{ClassicRequest, QuoteRequest};
use crate::engine::types::RoutingType;

use super::{Quoter, QuoterError};

pub struct RoutingApiQuoter {
    transport: Arc<dyn RoutingTransport>,
}

impl RoutingApiQuoter {
    pub const NAME: &'static str = "routing_api";

    pub fn new(transport: Arc<dyn RoutingTransport>) -> Self {
        Self { transport }
    }

    pub fn build_request(request: &ClassicRequest) -> RoutingQuoteRequest {
        let info = &request.info;
        let config = &request.config;
        RoutingQuoteRequest {
            token_in: info.token_in,
            token_in_chain_id: info.token_in_chain_id,
            token_out: info.token_out,
            token_out_chain_id: info.token_out_chain_id,
            amount: info.amount,
            trade_type: info.trade_type.as_routing_param(),
            gas_price_wei: config.gas_price_wei.clone(),
            protocols: config.protocols.iter().map(|p| p.as_str()).collect(),
            slippage_tolerance: config.slippage_tolerance,
            min_splits: config.min_splits,
            force_cross_protocol: config.force_cross_protocol,
            force_mixed_routes: config.force_mixed_routes,
            deadline: config.deadline,
            simulate_from_address: config.simulate_from_address,
            permit_signature: config.permit_signature.clone(),
            permit_nonce: config.permit_nonce.clone(),
            permit_expiration: config.permit_expiration,
            permit_amount: config.permit_amount,
            permit_sig_deadline: config.permit_sig_deadline,
            enable_universal_router: config.enable_universal_router,
        }
    }
}

#[async_trait]
impl Quoter for RoutingApiQuoter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn routing_type(&self) -> RoutingType {
        RoutingType::Classic
    }

    async fn try_quote(&self, request: &QuoteRequest) -> Result<Quote, QuoterError> {
        let QuoteRequest::Classic(classic) = request else {
            return Err(QuoterError::RoutingMismatch {
                quoter: Self::NAME,
                routing: request.routing_type(),
            });
        };
        let response = self.transport.quote(&Self::build_request(classic)).await?;
        Ok(ClassicQuote::from_response(classic.clone(), response, unix_now()).into())
    }
}
