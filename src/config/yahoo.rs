//! Yahoo Finance chart API configuration.

pub struct YahooConfig {
    pub base_url: &'static str,
    /// Lookback requested per call. 3 months of daily bars leaves headroom over
    /// the 60-close window once missing values are dropped.
    pub range: &'static str,
    pub interval: &'static str,
    pub timeout_ms: u64,
    /// Yahoo rejects requests without a browser-ish user agent
    pub user_agent: &'static str,
}

pub const YAHOO: YahooConfig = YahooConfig {
    base_url: "https://query1.finance.yahoo.com",
    range: "3mo",
    interval: "1d",
    timeout_ms: 10_000,
    user_agent: "Mozilla/5.0 (compatible; next-close/0.1)",
};
