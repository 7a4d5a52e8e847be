//! API request handlers

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result as ActixResult};
use futures::TryStreamExt;
use log::{error, warn};

use crate::api::response::{failure_response, Envelope};
use crate::api::server::ApiServerState;
use crate::pipeline::PipelineError;

/// Configure all API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/predict")
            .route("", web::post().to(predict))
            .route("/histories", web::get().to(histories)),
    );
}

/// Fallback for unmatched routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(Envelope::<()>::fail("Resource not found"))
}

fn declared_content_length(req: &HttpRequest) -> Option<u64> {
    req.headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn state_of(req: &HttpRequest) -> Option<&web::Data<ApiServerState>> {
    req.app_data::<web::Data<ApiServerState>>()
}

/// `POST /predict` — classify one uploaded image
pub async fn predict(req: HttpRequest, mut payload: Multipart) -> ActixResult<HttpResponse> {
    let state = match state_of(&req) {
        Some(state) => state,
        None => {
            error!("API server state is not configured");
            return Ok(HttpResponse::InternalServerError()
                .json(Envelope::<()>::fail("Service is not ready")));
        }
    };
    let pipeline = state.pipeline();
    let limit = pipeline.max_payload_bytes();

    // Reject on the declared body length before reading anything.
    if let Some(length) = declared_content_length(&req) {
        if length > limit as u64 {
            return Ok(failure_response(&PipelineError::PayloadTooLarge(limit)));
        }
    }

    let mut image: Option<Vec<u8>> = None;
    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                // Malformed multipart bodies surface with the transport
                // error's native status code.
                warn!("Malformed multipart request: {}", e);
                return Ok(HttpResponse::build(e.status_code())
                    .json(Envelope::<()>::fail("Malformed multipart request")));
            }
        };

        if field.name() != "image" {
            // Drain unknown fields so the stream can advance.
            while let Ok(Some(_)) = field.try_next().await {}
            continue;
        }

        let mut buf = Vec::new();
        loop {
            match field.try_next().await {
                Ok(Some(chunk)) => {
                    if buf.len() + chunk.len() > limit {
                        return Ok(failure_response(&PipelineError::PayloadTooLarge(limit)));
                    }
                    buf.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read image field: {}", e);
                    return Ok(HttpResponse::build(e.status_code())
                        .json(Envelope::<()>::fail("Malformed multipart request")));
                }
            }
        }
        image = Some(buf);
        break;
    }

    let image = match image {
        Some(image) => image,
        None => {
            warn!("Prediction request without an \"image\" field");
            return Ok(HttpResponse::BadRequest()
                .json(Envelope::<()>::fail("Request is missing the \"image\" field")));
        }
    };

    match pipeline.predict(&image).await {
        Ok(record) => Ok(HttpResponse::Created()
            .json(Envelope::success("Prediction completed successfully", record))),
        Err(err) => Ok(failure_response(&err)),
    }
}

/// `GET /predict/histories` — list every stored prediction
pub async fn histories(req: HttpRequest) -> ActixResult<HttpResponse> {
    let state = match state_of(&req) {
        Some(state) => state,
        None => {
            error!("API server state is not configured");
            return Ok(HttpResponse::InternalServerError()
                .json(Envelope::<()>::fail("Service is not ready")));
        }
    };

    match state.pipeline().histories().await {
        Ok(entries) => Ok(HttpResponse::Ok()
            .json(Envelope::success("Histories retrieved successfully", entries))),
        Err(err) => Ok(failure_response(&err)),
    }
}
