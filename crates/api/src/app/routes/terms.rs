//! Terms-of-service routes (`/api/terms`).

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use pricelist_core::Lang;

use crate::app::dto::TermsQuery;
use crate::app::errors::{json_error, ApiError};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(sections_for_language))
        .route("/all", get(all_sections))
}

pub async fn sections_for_language(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<TermsQuery>,
) -> Result<Response, ApiError> {
    let lang: Lang = match query.lang.as_deref().map(str::parse) {
        Some(Ok(lang)) => lang,
        _ => {
            return Ok(json_error(
                StatusCode::BAD_REQUEST,
                "Invalid language. Use \"en\" or \"sv\"",
            ));
        }
    };

    let sections: Vec<_> = services
        .terms
        .sections_for(lang)
        .await?
        .into_iter()
        .map(|s| {
            json!({
                "id": s.id,
                "title": s.title,
                "body": s.body,
                "sort_order": s.sort_order,
            })
        })
        .collect();
    Ok(Json(json!({ "sections": sections })).into_response())
}

pub async fn all_sections(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let sections = services.terms.all_sections().await?;
    Ok(Json(json!({ "sections": sections })))
}
