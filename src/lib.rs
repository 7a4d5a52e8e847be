//! DermaScan - synchronous image-classification serving endpoint
//!
//! DermaScan accepts an uploaded skin-lesion image, runs it through a
//! pre-loaded classification model, persists the prediction, and exposes
//! the prediction history.
//!
//! # Request flow
//!
//! - `POST /predict` walks the request pipeline: payload admission, model
//!   inference, record construction, persistence
//! - `GET /predict/histories` lists every stored prediction
//! - every outcome leaves the boundary as a `{status, message, data?}`
//!   envelope
//!
//! # Quick start
//!
//! ```rust,no_run
//! use dermascan::store::SledPredictionStore;
//! use dermascan::Result;
//!
//! fn main() -> Result<()> {
//!     let store = SledPredictionStore::open("./data/predictions")?;
//!     let _ = store;
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;
pub mod config;

// Inference and persistence
pub mod classifier;
pub mod model;
pub mod store;

// Request handling
pub mod pipeline;
pub mod api;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{PipelineError, PredictionPipeline};
pub use store::PredictionRecord;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize the library
pub fn init() -> Result<()> {
    env_logger::try_init()
        .map_err(|e| Error::config(format!("Failed to initialize logger: {}", e)))?;
    log::info!("DermaScan {} initialized", VERSION);
    Ok(())
}
