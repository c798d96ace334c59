//! Shared, read-only service context

use std::sync::Arc;

use crate::config::PREDICTION;
use crate::data::DailyCloseSource;
use crate::domain::Ticker;
use crate::model::PricePredictor;

#[derive(Debug, Clone)]
pub struct PredictionSettings {
    pub window_size: usize,
    pub default_ticker: Ticker,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            window_size: PREDICTION.window_size,
            default_ticker: Ticker::new(PREDICTION.default_ticker),
        }
    }
}

/// Everything a request needs, built once at startup and never mutated.
pub struct PredictionContext {
    pub predictor: Arc<dyn PricePredictor>,
    pub source: Arc<dyn DailyCloseSource>,
    pub settings: PredictionSettings,
}

impl PredictionContext {
    pub fn new(
        predictor: Arc<dyn PricePredictor>,
        source: Arc<dyn DailyCloseSource>,
        settings: PredictionSettings,
    ) -> Self {
        Self {
            predictor,
            source,
            settings,
        }
    }
}
