//! Fetch -> scale -> infer -> unscale for one ticker.

use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::MarketDataError;
use crate::domain::{Prediction, Ticker};
use crate::model::ModelError;
use crate::preprocessing::MinMaxScaler;
use crate::server::{PredictError, PredictionContext};

pub async fn predict_next_close(
    ctx: &PredictionContext,
    ticker: Ticker,
) -> Result<Prediction, PredictError> {
    if ticker.query_symbol().is_empty() {
        return Err(MarketDataError::TickerNotFound { ticker }.into());
    }

    let model_window = ctx.predictor.window_size();
    if model_window != ctx.settings.window_size {
        return Err(ModelError::WindowLength {
            expected: model_window,
            actual: ctx.settings.window_size,
        }
        .into());
    }

    let window = ctx
        .source
        .recent_window(&ticker, ctx.settings.window_size)
        .await?;
    tracing::debug!(
        ticker = %ticker,
        source = ctx.source.signature(),
        closes = window.len(),
        span = %window.date_span(),
        "Fetched price window"
    );

    // Fitted on this window alone, so the model always sees [0, 1]
    let scaler = MinMaxScaler::fit(window.closes())?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_scaler_fit {
        log::info!(
            "{} scaler fit: min {:.4} max {:.4} (flat: {})",
            ticker,
            scaler.min(),
            scaler.max(),
            scaler.is_degenerate()
        );
    }

    let scaled = scaler.transform(window.closes());
    let predictor = Arc::clone(&ctx.predictor);
    let scaled_next = tokio::task::spawn_blocking(move || predictor.predict_next(&scaled))
        .await
        .map_err(|e| PredictError::Worker(e.to_string()))??;

    let predicted_price = scaler.inverse_transform_value(scaled_next);
    tracing::info!(ticker = %ticker, predicted_price, "Prediction complete");

    Ok(Prediction {
        ticker,
        predicted_price,
    })
}
