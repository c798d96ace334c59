#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::MarketDataError;
use crate::domain::{DailyBar, Ticker};
use crate::utils::time_utils;

/// The most recent `window_size` valid closes for one ticker, oldest first.
///
/// Built fresh for every request and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceWindow {
    closes: Vec<f64>,
    first_timestamp_ms: i64,
    last_timestamp_ms: i64,
}

impl PriceWindow {
    /// Drop missing closes, then keep the trailing `window_size` of what is left.
    ///
    /// No bars at all means the provider does not know the symbol; bars that
    /// exist but leave fewer than `window_size` valid closes mean the history
    /// is too short.
    pub fn from_daily_bars(
        ticker: &Ticker,
        bars: &[DailyBar],
        window_size: usize,
    ) -> Result<Self, MarketDataError> {
        if bars.is_empty() {
            return Err(MarketDataError::TickerNotFound {
                ticker: ticker.clone(),
            });
        }

        let valid: Vec<(i64, f64)> = bars
            .iter()
            .filter_map(|bar| bar.valid_close().map(|c| (bar.open_timestamp_ms, c)))
            .collect();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_window_stats {
            log::info!(
                "{}: {} bars, {} missing closes dropped",
                ticker,
                bars.len(),
                bars.len() - valid.len()
            );
        }

        if valid.len() < window_size || window_size == 0 {
            return Err(MarketDataError::InsufficientHistory {
                ticker: ticker.clone(),
                available: valid.len(),
                required: window_size,
            });
        }

        let recent = &valid[valid.len() - window_size..];
        Ok(PriceWindow {
            closes: recent.iter().map(|&(_, close)| close).collect(),
            first_timestamp_ms: recent[0].0,
            last_timestamp_ms: recent[recent.len() - 1].0,
        })
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// "YYYY-MM-DD..YYYY-MM-DD" span covered by the window, for logs.
    pub fn date_span(&self) -> String {
        format!(
            "{}..{}",
            time_utils::epoch_ms_to_utc(self.first_timestamp_ms),
            time_utils::epoch_ms_to_utc(self.last_timestamp_ms)
        )
    }
}
