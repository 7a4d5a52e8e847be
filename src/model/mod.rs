//! Model gateway
//!
//! Wraps the loaded classification model behind a narrow inference trait so
//! that handlers and tests never touch the concrete backend. The handle is
//! loaded once at startup and shared read-only across requests.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Inference contract for a loaded classification model.
///
/// `predict` takes an encoded image and returns a continuous score in
/// `[0, 1]`. Implementations must not mutate shared state; a backend whose
/// runtime is not safe for concurrent calls has to serialize internally
/// rather than expose that constraint to callers.
pub trait InferenceModel: Send + Sync {
    fn predict(&self, image: &[u8]) -> Result<f32>;
}

/// Gateway in front of the process-wide model handle.
pub struct ModelGateway {
    model: Arc<dyn InferenceModel>,
}

impl ModelGateway {
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self { model }
    }

    /// Run inference on one encoded image.
    pub fn predict(&self, image: &[u8]) -> Result<f32> {
        let score = self.model.predict(image)?;
        if !score.is_finite() {
            return Err(Error::model(format!(
                "model produced a non-finite score: {}",
                score
            )));
        }
        Ok(score)
    }
}

/// Serialized form of the model artifact on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Side length the input image is resized to before scoring
    pub input_size: u32,

    /// Per-channel pixel weights, `input_size * input_size * 3` entries
    pub weights: Vec<f32>,

    /// Bias term
    pub bias: f32,
}

/// Logistic scoring model over resized RGB pixels.
#[derive(Debug)]
pub struct LogisticImageModel {
    input_size: u32,
    weights: Vec<f32>,
    bias: f32,
}

impl LogisticImageModel {
    /// Load the model artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading model artifact from {}", path.display());
        let bytes = std::fs::read(path).map_err(|e| {
            Error::model(format!(
                "failed to read model artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        let artifact: ModelArtifact = bincode::deserialize(&bytes)
            .map_err(|e| Error::model(format!("invalid model artifact: {}", e)))?;
        Self::from_artifact(artifact)
    }

    /// Build the model from an already-deserialized artifact.
    ///
    /// Weight dimensions are validated here, at load time, so that inference
    /// never has to worry about a shape mismatch.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        if artifact.input_size == 0 {
            return Err(Error::model("model artifact has zero input size"));
        }
        let expected = (artifact.input_size as usize).pow(2) * 3;
        if artifact.weights.len() != expected {
            return Err(Error::model(format!(
                "model artifact has {} weights, expected {}",
                artifact.weights.len(),
                expected
            )));
        }
        Ok(Self {
            input_size: artifact.input_size,
            weights: artifact.weights,
            bias: artifact.bias,
        })
    }
}

impl InferenceModel for LogisticImageModel {
    fn predict(&self, image: &[u8]) -> Result<f32> {
        let decoded = image::load_from_memory(image)
            .map_err(|e| Error::model(format!("failed to decode image: {}", e)))?;
        let resized = decoded
            .resize_exact(self.input_size, self.input_size, FilterType::Triangle)
            .to_rgb8();

        let mut z = self.bias;
        for (px, w) in resized
            .pixels()
            .flat_map(|p| p.0.iter())
            .zip(self.weights.iter())
        {
            z += (*px as f32 / 255.0) * w;
        }
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}
