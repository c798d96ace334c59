use serde::{Deserialize, Serialize};

use crate::config::PREDICTION;

/// Symbol of a traded security, kept exactly as the caller wrote it.
///
/// The raw text is what gets echoed back in responses. Providers that need a
/// normalised form (Binance wants `BTCUSDT`, not ` btcusdt`) ask for
/// [`Ticker::query_symbol`] instead.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // The name we pass into market data APIs (not necessarily display name)
    pub fn query_symbol(&self) -> String {
        self.0.trim().to_uppercase()
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(PREDICTION.default_ticker)
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
