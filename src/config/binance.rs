//! Binance-specific configuration constants and types.

/// Configuration for Binance REST API client
/// (This is the runtime struct handed to the REST client builder)
pub struct BinanceApiConfig {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Default for BinanceApiConfig {
    fn default() -> Self {
        Self {
            timeout_ms: BINANCE.client.timeout_ms,
            retries: BINANCE.client.retries,
            backoff_ms: BINANCE.client.backoff_ms,
        }
    }
}

/// Configuration for REST API Limits
pub struct RestLimits {
    /// Number of daily klines requested per call (~3 months, same lookback as Yahoo)
    pub daily_klines_limit: i32,
}

/// Default values for the Rest Client
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

/// The Master Configuration Struct
pub struct BinanceConfig {
    pub limits: RestLimits,
    pub client: ClientDefaults,
}

pub const BINANCE: BinanceConfig = BinanceConfig {
    limits: RestLimits {
        daily_klines_limit: 90,
    },
    // One request per prediction, so keep retries short
    client: ClientDefaults {
        timeout_ms: 5000,
        retries: 2,
        backoff_ms: 1000,
    },
};
