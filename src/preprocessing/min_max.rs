//! Min-max scaling fitted on a single price window.
//!
//! The scaler is fitted on the very window it transforms, so the model sees
//! the window's own min at 0.0 and its own max at 1.0. It is created, used and
//! dropped inside one request.

use thiserror::Error;

use crate::utils::maths_utils;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    #[error("cannot fit a scaler on an empty window")]
    EmptyInput,

    #[error("non-finite value {value} at position {index}")]
    NonFinite { index: usize, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
    // max - min, or 1.0 when the window is flat
    scale: f64,
}

impl MinMaxScaler {
    pub fn fit(values: &[f64]) -> Result<Self, ScalingError> {
        if values.is_empty() {
            return Err(ScalingError::EmptyInput);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ScalingError::NonFinite { index, value });
        }

        let (min, max) = maths_utils::get_min_max(values);
        let range = max - min;
        // Flat window: every value maps to 0.0 and inverse_transform becomes y + min
        let scale = if range == 0.0 { 1.0 } else { range };

        Ok(Self { min, max, scale })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    pub fn transform_value(&self, value: f64) -> f64 {
        (value - self.min) / self.scale
    }

    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform_value(v)).collect()
    }

    pub fn inverse_transform_value(&self, scaled: f64) -> f64 {
        scaled * self.scale + self.min
    }

    pub fn inverse_transform(&self, scaled: &[f64]) -> Vec<f64> {
        scaled
            .iter()
            .map(|&s| self.inverse_transform_value(s))
            .collect()
    }
}
