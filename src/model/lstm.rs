//! Stacked LSTM regressor over a window of scaled closing prices.
//!
//! Input `[batch, timesteps, 1]`, output `[batch, 1]`: the next scaled close.

use burn::module::Module;
use burn::nn::{Linear, LinearConfig, Lstm, LstmConfig};
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder};
use burn::tensor::Tensor;
use burn::tensor::backend::Backend;

use crate::config::MODEL;

/// Configuration for the LSTM model
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLstmConfig {
    /// Features per timestep
    pub input_dim: usize,
    /// LSTM hidden size (shared by every layer)
    pub hidden_size: usize,
    /// Number of stacked LSTM layers (at least one is always built)
    pub num_layers: usize,
}

impl Default for PriceLstmConfig {
    fn default() -> Self {
        PriceLstmConfig {
            input_dim: MODEL.input_dim,
            hidden_size: MODEL.hidden_size,
            num_layers: MODEL.num_layers,
        }
    }
}

#[derive(Module, Debug)]
pub struct PriceLstm<B: Backend> {
    /// LSTM stack; layer n+1 consumes the full output sequence of layer n
    layers: Vec<Lstm<B>>,
    /// Final hidden state -> scaled price
    head: Linear<B>,
}

impl<B: Backend> PriceLstm<B> {
    /// Freshly initialised (untrained) model. Weights are normally replaced by
    /// [`PriceLstm::load`].
    pub fn new(device: &B::Device, config: &PriceLstmConfig) -> Self {
        let layers = (0..config.num_layers.max(1))
            .map(|i| {
                let d_input = if i == 0 {
                    config.input_dim
                } else {
                    config.hidden_size
                };
                LstmConfig::new(d_input, config.hidden_size, true).init(device)
            })
            .collect();
        let head = LinearConfig::new(config.hidden_size, 1).init(device);

        PriceLstm { layers, head }
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `window` - Scaled prices [batch, timesteps, input_dim]
    ///
    /// # Returns
    /// Scaled next-step prediction [batch, 1]
    pub fn forward(&self, window: Tensor<B, 3>) -> Tensor<B, 2> {
        let mut sequence = window;
        for lstm in &self.layers {
            let (output, _state) = lstm.forward(sequence, None);
            sequence = output;
        }

        // Last timestep of the top layer: [batch, hidden]
        let [batch, timesteps, hidden] = sequence.dims();
        let last = sequence
            .slice([0..batch, timesteps - 1..timesteps, 0..hidden])
            .reshape([batch, hidden]);

        self.head.forward(last)
    }

    /// Save model to file
    pub fn save(&self, path: &str) -> anyhow::Result<()>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        self.clone()
            .save_file(path, &recorder)
            .map_err(|e| anyhow::anyhow!("Failed to save model to {}: {}", path, e))
    }

    /// Load model from file. The record's tensor shapes must match `config`.
    pub fn load(device: &B::Device, path: &str, config: &PriceLstmConfig) -> anyhow::Result<Self>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        Self::new(device, config)
            .load_file(path, &recorder, device)
            .map_err(|e| anyhow::anyhow!("Failed to load model from {}: {}", path, e))
    }
}
