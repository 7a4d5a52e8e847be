//! DermaScan HTTP server
//!
//! Process bootstrap: load configuration, build the model handle and the
//! prediction store once, then serve until shutdown.

use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use dermascan::api::handlers::{self, configure_routes};
use dermascan::api::server::ApiServerState;
use dermascan::model::{LogisticImageModel, ModelGateway};
use dermascan::pipeline::PredictionPipeline;
use dermascan::store::SledPredictionStore;
use dermascan::{Config, Result};

#[actix_web::main]
async fn main() -> Result<()> {
    dermascan::init()?;

    log::info!("Starting DermaScan inference server...");

    // Optional config file path as the first argument.
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // The model handle is loaded once, before the server accepts traffic,
    // and shared read-only by every request.
    let model = Arc::new(LogisticImageModel::load(&config.model.path)?);
    let gateway = ModelGateway::new(model);

    let store = Arc::new(SledPredictionStore::open(&config.storage.path)?);

    let pipeline = Arc::new(
        PredictionPipeline::new(gateway, store)
            .with_max_payload_bytes(config.server.max_payload_bytes),
    );
    let state = web::Data::new(ApiServerState::new(pipeline));

    log::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure_routes)
            .default_service(web::route().to(handlers::not_found))
    })
    .workers(config.server.workers)
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
