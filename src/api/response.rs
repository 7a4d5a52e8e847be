//! API response envelope
//!
//! Every outcome leaving the system boundary is wrapped in the same
//! `{status, message, data?}` shape. `failure_response` is the single place
//! a classified pipeline error becomes HTTP; handlers never build failure
//! bodies themselves.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineError;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAIL: &str = "fail";

/// Uniform API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// "success" or "fail"
    pub status: String,

    /// Human-readable outcome message
    pub message: String,

    /// Response payload, absent on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Create a success envelope
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create a failure envelope
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_FAIL.to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// Transport status code for a classified pipeline error.
pub fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        PipelineError::Prediction(_) => StatusCode::BAD_REQUEST,
        PipelineError::HistoryRetrieval(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Translate a classified pipeline error into its HTTP response.
///
/// Only the error's `Display` text goes to the caller; the wrapped source
/// error was already logged where it was classified.
pub fn failure_response(err: &PipelineError) -> HttpResponse {
    HttpResponse::build(status_for(err)).json(Envelope::<()>::fail(err.to_string()))
}
