//! Request pipeline
//!
//! One prediction request walks four stages: payload admission, inference,
//! record construction, persistence. The first failing stage terminates the
//! request with a classified error; component-native errors never continue
//! past this module. History retrieval is the second, read-only operation.

use log::{error, info, warn};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::classifier::classify;
use crate::error::Error as ComponentError;
use crate::model::ModelGateway;
use crate::store::{PredictionRecord, PredictionStore};

/// Maximum accepted upload size in bytes
pub const MAX_PAYLOAD_BYTES: usize = 1_000_000;

/// Classified outcome of a failed request.
///
/// The `Display` form is the only text a caller ever sees; the wrapped
/// source error is for server-side logs.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Upload exceeded the admission limit
    #[error("Payload content length exceeds maximum allowed: {0}")]
    PayloadTooLarge(usize),

    /// Inference or persistence failed during a prediction request.
    ///
    /// The two stages are deliberately merged into one caller-facing
    /// category; logs keep them distinct.
    #[error("An error occurred during prediction")]
    Prediction(#[source] ComponentError),

    /// Reading the prediction history failed
    #[error("Failed to retrieve prediction histories")]
    HistoryRetrieval(#[source] ComponentError),
}

/// One entry of the prediction history response
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub history: PredictionRecord,
}

/// The request-handling pipeline shared by all requests.
pub struct PredictionPipeline {
    gateway: ModelGateway,
    store: Arc<dyn PredictionStore>,
    max_payload_bytes: usize,
}

impl PredictionPipeline {
    pub fn new(gateway: ModelGateway, store: Arc<dyn PredictionStore>) -> Self {
        Self {
            gateway,
            store,
            max_payload_bytes: MAX_PAYLOAD_BYTES,
        }
    }

    /// Override the admission limit (used by configuration).
    pub fn with_max_payload_bytes(mut self, max_payload_bytes: usize) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    pub fn max_payload_bytes(&self) -> usize {
        self.max_payload_bytes
    }

    /// Run one image through admission, inference and persistence.
    pub async fn predict(&self, image: &[u8]) -> Result<PredictionRecord, PipelineError> {
        // Admission runs before any inference work so oversized uploads
        // cost nothing but the size check.
        if image.len() > self.max_payload_bytes {
            warn!(
                "Rejected upload of {} bytes (limit {})",
                image.len(),
                self.max_payload_bytes
            );
            return Err(PipelineError::PayloadTooLarge(self.max_payload_bytes));
        }

        let score = self.gateway.predict(image).map_err(|e| {
            error!("Model inference failed: {}", e);
            PipelineError::Prediction(e)
        })?;
        let outcome = classify(score);

        let record = PredictionRecord::new(outcome);
        self.store.save(&record).await.map_err(|e| {
            error!("Failed to persist prediction {}: {}", record.id, e);
            PipelineError::Prediction(e)
        })?;

        info!(
            "Prediction {} stored: {} (score {:.4})",
            record.id, record.result, score
        );
        Ok(record)
    }

    /// Return every stored prediction as a history entry.
    pub async fn histories(&self) -> Result<Vec<HistoryEntry>, PipelineError> {
        let records = self.store.list_all().await.map_err(|e| {
            error!("Failed to read prediction histories: {}", e);
            PipelineError::HistoryRetrieval(e)
        })?;
        Ok(records
            .into_iter()
            .map(|(id, record)| HistoryEntry { id, history: record })
            .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::classifier::Label;

    #[tokio::test]
    async fn test_oversized_payload_is_rejected_before_inference() {
        let store = Arc::new(MemoryStore::default());
        let pipeline =
            pipeline_over(FailingModel, store.clone()).with_max_payload_bytes(16);

        let err = pipeline.predict(&[0u8; 17]).await.unwrap_err();
        assert!(matches!(err, PipelineError::PayloadTooLarge(16)));
        // The failing model was never reached, nor was the store.
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_payload_at_the_limit_is_admitted() {
        let store = Arc::new(MemoryStore::default());
        let pipeline =
            pipeline_over(FixedScoreModel(0.9), store.clone()).with_max_payload_bytes(16);

        let record = pipeline.predict(&[0u8; 16]).await.unwrap();
        assert_eq!(record.result, Label::Malignant);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_successful_predictions_get_unique_ids_and_ordered_timestamps() {
        let store = Arc::new(MemoryStore::default());
        let pipeline = pipeline_over(FixedScoreModel(0.2), store);

        let first = pipeline.predict(&[1, 2, 3]).await.unwrap();
        let second = pipeline.predict(&[1, 2, 3]).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(second.created_at >= first.created_at);
        assert_eq!(first.result, Label::Benign);
    }

    #[tokio::test]
    async fn test_model_failure_persists_nothing() {
        let store = Arc::new(MemoryStore::default());
        let pipeline = pipeline_over(FailingModel, store.clone());

        let err = pipeline.predict(&[1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, PipelineError::Prediction(_)));
        assert_eq!(store.save_count(), 0);
        assert!(pipeline.histories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_write_failure_is_a_prediction_failure() {
        let pipeline = pipeline_over(FixedScoreModel(0.9), Arc::new(FailingWriteStore));

        let err = pipeline.predict(&[1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, PipelineError::Prediction(_)));
    }

    #[tokio::test]
    async fn test_histories_round_trip_saved_records() {
        let store = Arc::new(MemoryStore::default());
        let pipeline = pipeline_over(FixedScoreModel(0.9), store);

        let saved = pipeline.predict(&[1]).await.unwrap();
        pipeline.predict(&[2]).await.unwrap();

        let histories = pipeline.histories().await.unwrap();
        assert_eq!(histories.len(), 2);
        let entry = histories.iter().find(|e| e.id == saved.id).unwrap();
        assert_eq!(entry.history, saved);
        assert_eq!(entry.history.suggestion, saved.result.suggestion());
    }

    #[tokio::test]
    async fn test_history_read_failure_is_classified() {
        let pipeline = pipeline_over(FixedScoreModel(0.9), Arc::new(FailingReadStore));

        let err = pipeline.histories().await.unwrap_err();
        assert!(matches!(err, PipelineError::HistoryRetrieval(_)));
    }

    #[test]
    fn test_payload_too_large_message_names_the_default_limit() {
        assert_eq!(
            PipelineError::PayloadTooLarge(MAX_PAYLOAD_BYTES).to_string(),
            "Payload content length exceeds maximum allowed: 1000000"
        );
    }
}
