//! HTTP API module
//!
//! REST surface of the serving endpoint: one upload route, one history
//! route, and the uniform response envelope both use.

pub mod handlers;
pub mod response;
pub mod server;

pub use handlers::configure_routes;
pub use response::Envelope;
