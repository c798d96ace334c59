//! Inference seam between the request pipeline and the model.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Result, bail};
use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Tensor};
use thiserror::Error;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::model::{PriceLstm, PriceLstmConfig};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("model expects a window of {expected} prices, got {actual}")]
    WindowLength { expected: usize, actual: usize },

    #[error("model produced a non-finite output ({0})")]
    NonFiniteOutput(f64),

    #[error("model handle is unavailable after a panic in another request")]
    Poisoned,
}

/// One forward pass over a scaled price window.
///
/// Implementations are shared read-only by every in-flight request.
pub trait PricePredictor: Send + Sync {
    /// Number of timesteps the model consumes.
    fn window_size(&self) -> usize;

    /// Scaled window (oldest first) in, scaled next close out.
    fn predict_next(&self, scaled_window: &[f64]) -> Result<f64, ModelError>;
}

/// [`PriceLstm`] loaded once at startup.
pub struct LstmPredictor<B: Backend> {
    // Mutex only guards the clone-out; the forward pass runs unlocked
    model: Mutex<PriceLstm<B>>,
    device: B::Device,
    window_size: usize,
}

impl<B: Backend> LstmPredictor<B> {
    pub fn new(model: PriceLstm<B>, device: B::Device, window_size: usize) -> Self {
        LstmPredictor {
            model: Mutex::new(model),
            device,
            window_size,
        }
    }

    /// Load the pretrained record from `path`. Any failure here is fatal for
    /// the service: there is no fallback prediction path.
    pub fn load(
        path: &Path,
        config: &PriceLstmConfig,
        window_size: usize,
        device: B::Device,
    ) -> Result<Self>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        if !path.is_file() {
            bail!("Model artifact not found at {}", path.display());
        }
        // burn asserts on the record's layer count while loading and only checks
        // tensor shapes on first use, so both steps run under catch_unwind.
        let loaded = panic::catch_unwind(AssertUnwindSafe(|| {
            let model = PriceLstm::load(&device, &path.to_string_lossy(), config)?;
            let warmup = Tensor::zeros([1, window_size, config.input_dim], &device);
            let _ = model.forward(warmup);
            Ok::<_, anyhow::Error>(model)
        }));
        let model = match loaded {
            Ok(result) => result?,
            Err(_) => bail!(
                "Model record at {} does not match the configured shape",
                path.display()
            ),
        };
        log::info!(
            "Loaded price model from {} (hidden {}, {} layer(s), window {})",
            path.display(),
            config.hidden_size,
            config.num_layers,
            window_size
        );
        Ok(Self::new(model, device, window_size))
    }
}

impl<B: Backend> PricePredictor for LstmPredictor<B> {
    fn window_size(&self) -> usize {
        self.window_size
    }

    fn predict_next(&self, scaled_window: &[f64]) -> Result<f64, ModelError> {
        if scaled_window.len() != self.window_size {
            return Err(ModelError::WindowLength {
                expected: self.window_size,
                actual: scaled_window.len(),
            });
        }

        let model = self
            .model
            .lock()
            .map_err(|_| ModelError::Poisoned)?
            .clone();

        // Reshape to (batch=1, timesteps, features=1)
        let data: Vec<f32> = scaled_window.iter().map(|&v| v as f32).collect();
        let input = Tensor::<B, 1>::from_floats(data.as_slice(), &self.device).reshape([
            1,
            self.window_size,
            1,
        ]);

        let raw: f32 = model.forward(input).into_scalar().elem();
        let raw = raw as f64;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_raw_model_output {
            log::info!("Raw (scaled) model output: {}", raw);
        }

        if !raw.is_finite() {
            return Err(ModelError::NonFiniteOutput(raw));
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn small_config() -> PriceLstmConfig {
        PriceLstmConfig {
            input_dim: 1,
            hidden_size: 6,
            num_layers: 2,
        }
    }

    fn window() -> Vec<f64> {
        (0..60).map(|i| i as f64 / 59.0).collect()
    }

    #[test]
    fn test_predict_returns_finite_scalar() {
        let device = Default::default();
        let model = PriceLstm::<TestBackend>::new(&device, &small_config());
        let predictor = LstmPredictor::new(model, device, 60);

        let value = predictor.predict_next(&window()).unwrap();
        assert!(value.is_finite());
        // Deterministic for the same weights and input
        assert_eq!(value, predictor.predict_next(&window()).unwrap());
    }

    #[test]
    fn test_rejects_wrong_window_length() {
        let device = Default::default();
        let model = PriceLstm::<TestBackend>::new(&device, &small_config());
        let predictor = LstmPredictor::new(model, device, 60);

        assert_eq!(
            predictor.predict_next(&[0.5; 59]),
            Err(ModelError::WindowLength {
                expected: 60,
                actual: 59
            })
        );
    }

    #[test]
    fn test_saved_record_loads_with_same_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("price_model.mpk");
        let device = Default::default();

        let model = PriceLstm::<TestBackend>::new(&device, &small_config());
        model.save(path.to_str().unwrap()).unwrap();
        let original = LstmPredictor::new(model, device, 60);

        let loaded =
            LstmPredictor::<TestBackend>::load(&path, &small_config(), 60, Default::default())
                .unwrap();

        let a = original.predict_next(&window()).unwrap();
        let b = loaded.predict_next(&window()).unwrap();
        assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
    }

    #[test]
    fn test_missing_artifact_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let result = LstmPredictor::<TestBackend>::load(
            &dir.path().join("absent.mpk"),
            &small_config(),
            60,
            Default::default(),
        );
        let err = result.err().unwrap();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_layer_count_mismatch_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one_layer.mpk");
        let device = Default::default();

        let one_layer = PriceLstmConfig {
            num_layers: 1,
            ..small_config()
        };
        PriceLstm::<TestBackend>::new(&device, &one_layer)
            .save(path.to_str().unwrap())
            .unwrap();

        let three_layers = PriceLstmConfig {
            num_layers: 3,
            ..small_config()
        };
        let result =
            LstmPredictor::<TestBackend>::load(&path, &three_layers, 60, Default::default());
        let err = result.err().unwrap();
        assert!(err.to_string().contains("does not match the configured shape"));
    }

    #[test]
    fn test_hidden_size_mismatch_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narrow.mpk");
        let device = Default::default();

        PriceLstm::<TestBackend>::new(&device, &small_config())
            .save(path.to_str().unwrap())
            .unwrap();

        let result = LstmPredictor::<TestBackend>::load(
            &path,
            &PriceLstmConfig::default(),
            60,
            Default::default(),
        );
        assert!(result.is_err());
    }
}
