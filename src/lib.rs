#![allow(clippy::collapsible_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod model;
pub mod preprocessing;
pub mod server;
pub mod utils;

// Re-export commonly used types
pub use data::{DailyCloseSource, MarketDataError, MarketSource, PriceWindow};
pub use domain::{DailyBar, Prediction, Ticker};
pub use model::{InferenceBackend, LstmPredictor, PricePredictor};
pub use preprocessing::MinMaxScaler;
pub use server::{PredictionContext, PredictionSettings, ServerConfig, run_server};

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
// CLI argument parsing
use clap::Parser;

use crate::config::{PREDICTION, SERVER};
use crate::model::PriceLstmConfig;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Next-day closing price prediction service", long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, default_value = SERVER.host)]
    pub host: String,

    #[arg(long, default_value_t = SERVER.port)]
    pub port: u16,

    /// Pretrained model record (named MessagePack)
    #[arg(long, default_value = SERVER.model_path)]
    pub model_path: PathBuf,

    /// Directory served under /static
    #[arg(long, default_value = SERVER.static_dir)]
    pub static_dir: String,

    /// Market data provider for daily closes
    #[arg(long, value_enum, default_value_t = MarketSource::Yahoo)]
    pub source: MarketSource,
}

/// Load the model and connect the market data source. Called once before
/// the server binds; an error here means the service must not start.
pub fn build_context(cli: &Cli) -> anyhow::Result<Arc<PredictionContext>> {
    let settings = PredictionSettings::default();
    let predictor = LstmPredictor::<InferenceBackend>::load(
        &cli.model_path,
        &PriceLstmConfig::default(),
        PREDICTION.window_size,
        Default::default(),
    )
    .context("Failed to load prediction model")?;
    let source = cli
        .source
        .connect()
        .with_context(|| format!("Failed to set up {} client", cli.source))?;

    Ok(Arc::new(PredictionContext::new(
        Arc::new(predictor),
        source,
        settings,
    )))
}
