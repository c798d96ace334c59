use thiserror::Error;

use crate::domain::Ticker;

/// Failures while acquiring a price window.
///
/// `TickerNotFound` and `InsufficientHistory` are the caller's problem (bad or
/// too-young symbol). `Provider` covers everything on our side of the wire or
/// theirs: network, HTTP 5xx, payloads we cannot read.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("No data found for ticker symbol: {ticker}")]
    TickerNotFound { ticker: Ticker },

    #[error(
        "Not enough data to make predictions for {ticker}. Need at least {required} data points."
    )]
    InsufficientHistory {
        ticker: Ticker,
        available: usize,
        required: usize,
    },

    #[error("{provider} request failed: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },
}

impl MarketDataError {
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        MarketDataError::Provider {
            provider,
            message: message.into(),
        }
    }

    /// True for errors caused by the requested symbol rather than by infrastructure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MarketDataError::TickerNotFound { .. } | MarketDataError::InsufficientHistory { .. }
        )
    }
}
