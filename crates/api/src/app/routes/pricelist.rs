//! Product catalog routes (`/api/pricelist`).

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use pricelist_core::{ProductDraft, SearchCriteria};

use crate::app::dto::{BulkUpdateRequest, FieldUpdateRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/stats", get(product_stats))
        .route("/bulk-update", post(bulk_update_products))
        .route(
            "/:id",
            get(get_product)
                .put(update_product)
                .patch(update_product_field)
                .delete(delete_product),
        )
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let result = services.products.get_all_products().await?;
    Ok(Json(result))
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let product = services.products.get_product(id).await?;
    Ok(Json(json!({ "product": product })))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(draft): Json<ProductDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let product = services.products.create_product(&draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i32>,
    Json(draft): Json<ProductDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let product = services.products.update_product(id, &draft).await?;
    Ok(Json(json!({ "product": product })))
}

pub async fn update_product_field(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i32>,
    Json(body): Json<FieldUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = services
        .products
        .update_product_field(id, &body.field, &body.value)
        .await?;
    Ok(Json(json!({ "product": product })))
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    services.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(criteria): Query<SearchCriteria>,
) -> Result<impl IntoResponse, ApiError> {
    // Empty query strings count as "criterion not supplied".
    let criteria = SearchCriteria {
        article_no: criteria.article_no.filter(|q| !q.is_empty()),
        name: criteria.name.filter(|q| !q.is_empty()),
    };
    let result = services.products.search_products(criteria).await?;
    Ok(Json(result))
}

pub async fn product_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = services.products.get_product_stats().await?;
    Ok(Json(stats))
}

pub async fn bulk_update_products(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<BulkUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let results = services.products.bulk_update_products(body.updates).await;
    Ok(Json(json!({ "results": results })))
}
