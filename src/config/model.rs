//! Hyper-parameters of the pretrained price model.
//!
//! These must match the record on disk; burn refuses to load a record whose
//! tensor shapes differ from the freshly initialised module.

pub struct ModelShape {
    /// Features per timestep (closing price only)
    pub input_dim: usize,
    pub hidden_size: usize,
    /// Number of stacked LSTM layers
    pub num_layers: usize,
}

pub const MODEL: ModelShape = ModelShape {
    input_dim: 1,
    hidden_size: 50,
    num_layers: 2,
};
