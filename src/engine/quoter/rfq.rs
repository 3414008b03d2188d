use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{RfqQuoteRequest, RfqTransport};
use crate::engine::order::unix_now;
use crate::engine::quote::{DutchQuote, Quote};
use crate::engine::request::{DutchRequest, QuoteRequest};
use crate::engine::types::RoutingType;

use super::{Quoter, QuoterError};

pub struct RfqQuoter {
    transport: Arc<dyn RfqTransport>,
}

impl RfqQuoter {
    pub const NAME: &'static str = "rfq";

    pub fn new(transport: Arc<dyn RfqTransport>) -> Self {
        Self { transport }
    }

    pub fn build_request(request: &DutchRequest) -> RfqQuoteRequest {
        let info = &request.info;
        RfqQuoteRequest {
            token_in_chain_id: info.token_in_chain_id,
            token_out_chain_id: info.token_out_chain_id,
            request_id: info.request_id.clone(),
            token_in: info.token_in,
            token_out: info.token_out,
            amount: info.amount,
            offerer: request.config.offerer,
            trade_type: info.trade_type.as_str(),
        }
    }
}

#[async_trait]
impl Quoter for RfqQuoter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn routing_type(&self) -> RoutingType {
        RoutingType::DutchLimit
    }

    async fn try_quote(&self, request: &QuoteRequest) -> Result<Quote, QuoterError> {
        let QuoteRequest::DutchLimit(dutch) = request else {
            return Err(QuoterError::RoutingMismatch {
                quoter: Self::NAME,
                routing: request.routing_type(),
            });
        };
        let response = self.transport.quote(&Self::build_request(dutch)).await?;
        let quote = DutchQuote::from_response(dutch.clone(), response, None, unix_now())?;
        Ok(quote.into())
    }
}
