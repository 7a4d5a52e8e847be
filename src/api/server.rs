//! API server state
//!
//! Shared, read-only per-process state handed to every handler. The
//! pipeline (and through it the model handle and store) is constructed once
//! in `main` before the server accepts traffic; tests build the same state
//! over fakes.

use std::sync::Arc;

use crate::pipeline::PredictionPipeline;

/// State shared by all API handlers
#[derive(Clone)]
pub struct ApiServerState {
    pipeline: Arc<PredictionPipeline>,
}

impl ApiServerState {
    pub fn new(pipeline: Arc<PredictionPipeline>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &PredictionPipeline {
        &self.pipeline
    }
}
