//! Process liveness.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

use crate::app::services::AppServices;

/// Process + database liveness. 503 when the pool no longer answers.
pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let (status, database) = match services.database_alive().await {
        Some(true) => (StatusCode::OK, "connected"),
        Some(false) => (StatusCode::SERVICE_UNAVAILABLE, "disconnected"),
        None => (StatusCode::OK, "in-memory"),
    };

    let body = json!({
        "status": if status == StatusCode::OK { "OK" } else { "unavailable" },
        "database": database,
        "timestamp": Utc::now(),
    });

    (status, Json(body))
}
