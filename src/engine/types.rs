use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoutingType {
    #[serde(rename = "CLASSIC")]
    Classic,
    #[serde(rename = "DUTCH_LIMIT", alias = "DUTCH_AUCTION")]
    DutchLimit,
}

impl RoutingType {
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingType::Classic => "CLASSIC",
            RoutingType::DutchLimit => "DUTCH_LIMIT",
        }
    }
}

impl fmt::Display for RoutingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    #[serde(rename = "EXACT_INPUT")]
    ExactInput,
    #[serde(rename = "EXACT_OUTPUT")]
    ExactOutput,
}

impl TradeType {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeType::ExactInput => "EXACT_INPUT",
            TradeType::ExactOutput => "EXACT_OUTPUT",
        }
    }

    /// Query value understood by the routing API.
    pub fn as_routing_param(self) -> &'static str {
        match self {
            TradeType::ExactInput => "exactIn",
            TradeType::ExactOutput => "exactOut",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a candidate quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Provider,
    Synthetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    #[serde(rename = "V2")]
    V2,
    #[serde(rename = "V3")]
    V3,
    #[serde(rename = "MIXED")]
    Mixed,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::V2 => "V2",
            Protocol::V3 => "V3",
            Protocol::Mixed => "MIXED",
        }
    }
}
