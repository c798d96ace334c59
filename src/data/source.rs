use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::data::binance::BinanceDailySource;
use crate::data::yahoo::YahooChartSource;
use crate::data::{MarketDataError, PriceWindow};
use crate::domain::{DailyBar, Ticker};

/// Where daily closes come from. Injected into the prediction context so the
/// request pipeline can run against a stub in tests.
#[async_trait]
pub trait DailyCloseSource: Send + Sync {
    /// A unique identifier for this implementation (used in logs).
    fn signature(&self) -> &'static str;

    /// Daily bars over the provider's lookback, oldest first. Gaps are kept as
    /// `None` closes; an unknown symbol is either `TickerNotFound` or no bars.
    async fn daily_bars(&self, ticker: &Ticker) -> Result<Vec<DailyBar>, MarketDataError>;

    /// Fetch bars and cut them down to the trailing `window_size` valid closes.
    async fn recent_window(
        &self,
        ticker: &Ticker,
        window_size: usize,
    ) -> Result<PriceWindow, MarketDataError> {
        let bars = self.daily_bars(ticker).await?;
        PriceWindow::from_daily_bars(ticker, &bars, window_size)
    }
}

/// Provider selectable from the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, strum_macros::Display,
)]
pub enum MarketSource {
    /// Yahoo Finance chart API (equities, ETFs, indices)
    #[default]
    #[strum(to_string = "Yahoo Finance")]
    Yahoo,
    /// Binance spot klines (crypto pairs such as BTCUSDT)
    #[strum(to_string = "Binance")]
    Binance,
}

impl MarketSource {
    pub fn connect(self) -> Result<Arc<dyn DailyCloseSource>> {
        let source: Arc<dyn DailyCloseSource> = match self {
            MarketSource::Yahoo => Arc::new(YahooChartSource::new()?),
            MarketSource::Binance => Arc::new(BinanceDailySource::new()?),
        };
        log::info!("Market data source: {}", source.signature());
        Ok(source)
    }
}
