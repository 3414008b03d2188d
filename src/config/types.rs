use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct QuoterConfig {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub gas: GasConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub prometheus: PrometheusConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingProfile {
    Lean,
    Verbose,
}

impl Default for LoggingProfile {
    fn default() -> Self {
        Self::Lean
    }
}

impl LoggingProfile {
    pub fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "super::default_logging_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default = "super::default_logging_profile")]
    pub profile: LoggingProfile,
    /// 单次报价超过该耗时（毫秒）时输出告警。
    #[serde(default = "super::default_slow_quote_warn_ms")]
    pub slow_quote_warn_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrometheusConfig {
    #[serde(default)]
    pub enable: bool,
    #[serde(default = "super::default_prometheus_listen")]
    pub listen: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// `[providers.routing_api]`：链上路由报价（CLASSIC）。
    #[serde(default = "super::default_routing_api_provider")]
    pub routing_api: ProviderEndpointConfig,
    /// `[providers.rfq]`：做市商荷兰拍报价（DUTCH_LIMIT）。
    #[serde(default = "super::default_rfq_provider")]
    pub rfq: ProviderEndpointConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEndpointConfig {
    #[serde(default = "super::default_true")]
    pub enable: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default = "super::default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

impl ProviderEndpointConfig {
    pub fn is_active(&self) -> bool {
        self.enable && !self.url.trim().is_empty()
    }
}

/// `[gas]`：荷兰拍与链上路由之间的 gas 换算常量。
#[derive(Debug, Clone, Deserialize)]
pub struct GasConfig {
    #[serde(default = "super::default_base_execution_gas")]
    pub base_execution_gas: u64,
    #[serde(default = "super::default_wrap_gas")]
    pub wrap_gas: u64,
    #[serde(default = "super::default_unwrap_gas")]
    pub unwrap_gas: u64,
    #[serde(default = "super::default_improvement_exact_in_bps")]
    pub improvement_exact_in_bps: u64,
    #[serde(default = "super::default_improvement_exact_out_bps")]
    pub improvement_exact_out_bps: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "super::default_slippage_bps")]
    pub default_slippage_bps: u64,
    #[serde(default = "super::default_exclusivity_override_bps")]
    pub default_exclusivity_override_bps: u64,
}
