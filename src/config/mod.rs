pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;

use self::types as cfg;

use crate::engine::gas::GasAdjustmentConfig;
use crate::engine::request::RequestDefaults;

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_logging_level() -> String {
    "info".to_string()
}

pub(crate) fn default_logging_profile() -> cfg::LoggingProfile {
    cfg::LoggingProfile::Lean
}

pub(crate) fn default_slow_quote_warn_ms() -> u64 {
    500
}

pub(crate) fn default_prometheus_listen() -> String {
    "0.0.0.0:9898".to_string()
}

pub(crate) fn default_provider_timeout_ms() -> u64 {
    5_000
}

pub(crate) fn default_routing_api_provider() -> cfg::ProviderEndpointConfig {
    cfg::ProviderEndpointConfig {
        enable: true,
        url: "https://api.uniswap.org/v1/".to_string(),
        timeout_ms: default_provider_timeout_ms(),
    }
}

pub(crate) fn default_rfq_provider() -> cfg::ProviderEndpointConfig {
    cfg::ProviderEndpointConfig {
        enable: true,
        url: String::new(),
        timeout_ms: default_provider_timeout_ms(),
    }
}

pub(crate) fn default_base_execution_gas() -> u64 {
    275_000
}

pub(crate) fn default_wrap_gas() -> u64 {
    27_938
}

pub(crate) fn default_unwrap_gas() -> u64 {
    36_000
}

pub(crate) fn default_improvement_exact_in_bps() -> u64 {
    10_010
}

pub(crate) fn default_improvement_exact_out_bps() -> u64 {
    9_990
}

pub(crate) fn default_slippage_bps() -> u64 {
    50
}

pub(crate) fn default_exclusivity_override_bps() -> u64 {
    100
}

impl Default for cfg::QuoterConfig {
    fn default() -> Self {
        Self {
            global: cfg::GlobalConfig::default(),
            providers: cfg::ProvidersConfig::default(),
            gas: cfg::GasConfig::default(),
            request: cfg::RequestConfig::default(),
        }
    }
}

impl Default for cfg::GlobalConfig {
    fn default() -> Self {
        Self {
            logging: cfg::LoggingConfig::default(),
            prometheus: cfg::PrometheusConfig::default(),
        }
    }
}

impl Default for cfg::LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_logging_level(),
            json: false,
            profile: default_logging_profile(),
            slow_quote_warn_ms: default_slow_quote_warn_ms(),
        }
    }
}

impl Default for cfg::PrometheusConfig {
    fn default() -> Self {
        Self {
            enable: false,
            listen: default_prometheus_listen(),
        }
    }
}

impl Default for cfg::ProvidersConfig {
    fn default() -> Self {
        Self {
            routing_api: default_routing_api_provider(),
            rfq: default_rfq_provider(),
        }
    }
}

impl Default for cfg::GasConfig {
    fn default() -> Self {
        Self {
            base_execution_gas: default_base_execution_gas(),
            wrap_gas: default_wrap_gas(),
            unwrap_gas: default_unwrap_gas(),
            improvement_exact_in_bps: default_improvement_exact_in_bps(),
            improvement_exact_out_bps: default_improvement_exact_out_bps(),
        }
    }
}

impl Default for cfg::RequestConfig {
    fn default() -> Self {
        Self {
            default_slippage_bps: default_slippage_bps(),
            default_exclusivity_override_bps: default_exclusivity_override_bps(),
        }
    }
}

impl From<&cfg::GasConfig> for GasAdjustmentConfig {
    fn from(config: &cfg::GasConfig) -> Self {
        GasAdjustmentConfig {
            base_execution_gas: config.base_execution_gas,
            wrap_gas: config.wrap_gas,
            unwrap_gas: config.unwrap_gas,
            improvement_exact_in_bps: config.improvement_exact_in_bps,
            improvement_exact_out_bps: config.improvement_exact_out_bps,
        }
    }
}

impl From<&cfg::RequestConfig> for RequestDefaults {
    fn from(config: &cfg::RequestConfig) -> Self {
        RequestDefaults {
            slippage_bps: config.default_slippage_bps,
            exclusivity_override_bps: config.default_exclusivity_override_bps,
        }
    }
}
