//! Pretrained price model and the inference seam used by the request pipeline.

pub mod lstm;
pub mod predictor;

pub use lstm::{PriceLstm, PriceLstmConfig};
pub use predictor::{LstmPredictor, ModelError, PricePredictor};

/// CPU backend the service runs inference on.
pub type InferenceBackend = burn::backend::NdArray<f32>;
