use alloy_primitives::{Address, U256, address};

use super::types::RoutingType;

/// Sentinel used by callers to denote the chain's native asset.
pub const NATIVE_ADDRESS: Address = address!("0x0000000000000000000000000000000000000000");

pub const MAINNET: u64 = 1;
pub const GOERLI: u64 = 5;
pub const OPTIMISM: u64 = 10;
pub const POLYGON: u64 = 137;
pub const ARBITRUM: u64 = 42161;

pub const CLASSIC_CHAINS: &[u64] = &[MAINNET, GOERLI, OPTIMISM, POLYGON, ARBITRUM];
pub const DUTCH_LIMIT_CHAINS: &[u64] = &[MAINNET, GOERLI, POLYGON];

pub const DEFAULT_AUCTION_PERIOD_SECS: u64 = 60;
pub const DEFAULT_DEADLINE_BUFFER_SECS: u64 = 5;

pub fn supported_chains(routing: RoutingType) -> &'static [u64] {
    match routing {
        RoutingType::Classic => CLASSIC_CHAINS,
        RoutingType::DutchLimit => DUTCH_LIMIT_CHAINS,
    }
}

pub fn is_supported(routing: RoutingType, chain_id: u64) -> bool {
    supported_chains(routing).contains(&chain_id)
}

pub fn wrapped_native(chain_id: u64) -> Option<Address> {
    match chain_id {
        MAINNET => Some(address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")),
        GOERLI => Some(address!("0xB4FBF271143F4FBf7B91A5ded31805e42b2208d6")),
        OPTIMISM => Some(address!("0x4200000000000000000000000000000000000006")),
        POLYGON => Some(address!("0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270")),
        ARBITRUM => Some(address!("0x82aF49447D8a07e3bd95BD0d56f35241523fBab1")),
        _ => None,
    }
}

/// One whole unit (1e18) of the wrapped native asset.
pub fn one_native_unit() -> U256 {
    U256::from(1_000_000_000_000_000_000u64)
}

pub fn default_auction_period_secs(chain_id: u64) -> u64 {
    match chain_id {
        MAINNET => 60,
        POLYGON => 60,
        _ => DEFAULT_AUCTION_PERIOD_SECS,
    }
}

pub fn default_deadline_buffer_secs(chain_id: u64) -> u64 {
    match chain_id {
        MAINNET => 12,
        POLYGON => 5,
        _ => DEFAULT_DEADLINE_BUFFER_SECS,
    }
}
