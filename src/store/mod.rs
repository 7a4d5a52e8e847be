//! Prediction store
//!
//! Persists prediction records keyed by their generated id. Records are
//! write-once: the contract has no update or delete path, and uniqueness is
//! the id generator's job, not the store's.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::classifier::{Classification, Label};
use crate::error::Result;

/// A single persisted prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    /// Server-generated identifier (uuid v4)
    pub id: String,

    /// Classification label
    pub result: Label,

    /// Advisory string derived from the label
    pub suggestion: String,

    /// Time the record was constructed, ISO-8601 on the wire
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    /// Build a fresh record from a classification outcome.
    ///
    /// The id and timestamp are assigned here, at construction, and never
    /// change afterwards.
    pub fn new(outcome: Classification) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            result: outcome.label,
            suggestion: outcome.suggestion,
            created_at: Utc::now(),
        }
    }
}

/// Storage contract for prediction records.
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Persist a record under its id. At-most-once per call; callers must
    /// not retry with the same record.
    async fn save(&self, record: &PredictionRecord) -> Result<()>;

    /// Return every stored record as `(id, record)` pairs. Order is
    /// implementation-defined and need not match insertion order.
    async fn list_all(&self) -> Result<Vec<(String, PredictionRecord)>>;
}

/// Sled-backed prediction store.
pub struct SledPredictionStore {
    db: sled::Db,
}

impl SledPredictionStore {
    /// Open (or create) the store at the given directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Opening prediction store at {}", path.display());
        let db = sled::open(path)?;
        Ok(Self { db })
    }
}

#[async_trait]
impl PredictionStore for SledPredictionStore {
    async fn save(&self, record: &PredictionRecord) -> Result<()> {
        let bytes = bincode::serialize(record)?;
        self.db.insert(record.id.as_bytes(), bytes)?;
        self.db.flush_async().await?;
        log::debug!("Stored prediction record {}", record.id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<(String, PredictionRecord)>> {
        let mut records = Vec::new();
        for entry in self.db.iter() {
            let (key, value) = entry?;
            let id = String::from_utf8_lossy(&key).into_owned();
            let record: PredictionRecord = bincode::deserialize(&value)?;
            records.push((id, record));
        }
        Ok(records)
    }
}
