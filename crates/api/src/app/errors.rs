//! Consistent error responses.
//!
//! Every handler returns `Result<_, ApiError>`; the single
//! `IntoResponse` impl below is the only place the taxonomy is mapped
//! to HTTP statuses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use pricelist_core::Error;

pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self.0 {
            Error::Validation(errors) => json_error_with_details(status, self.0.to_string(), json!(errors)),
            Error::Constraint(detail) | Error::Duplicate(detail) => {
                json_error_with_details(status, self.0.to_string(), json!(detail))
            }
            Error::NotFound { .. } => json_error(status, self.0.to_string()),
            Error::Storage(driver_message) => {
                // The driver message goes to the log, never to the client.
                tracing::error!(error = %driver_message, "storage failure");
                json_error(status, self.0.to_string())
            }
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

pub fn json_error_with_details(
    status: StatusCode,
    message: impl Into<String>,
    details: serde_json::Value,
) -> Response {
    (
        status,
        Json(json!({
            "error": message.into(),
            "details": details,
        })),
    )
        .into_response()
}
