//! Prediction pipeline constants.

pub struct PredictionConfig {
    /// Number of daily closes fed to the model (the model's timestep count)
    pub window_size: usize,
    /// Ticker used when a request body carries none
    pub default_ticker: &'static str,
}

pub const PREDICTION: PredictionConfig = PredictionConfig {
    window_size: 60,
    default_ticker: "AAPL",
};
