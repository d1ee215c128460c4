//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: the application context object (stores + services)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// `static_dir`, when given, is served as the client bundle with an
/// index.html fallback so client-side routes resolve.
pub fn build_app(services: Arc<AppServices>, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .nest("/api/pricelist", routes::pricelist::router())
        .nest("/api/terms", routes::terms::router())
        .route("/health", get(routes::system::health))
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(CorsLayer::very_permissive()));

    match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            api.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => api,
    }
}
