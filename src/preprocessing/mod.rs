//! Input rescaling for the price model.

pub mod min_max;

pub use min_max::{MinMaxScaler, ScalingError};
