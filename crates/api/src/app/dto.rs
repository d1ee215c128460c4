//! Request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pricelist_core::{FieldValue, Product, SearchCriteria};

// -------------------------
// Request DTOs
// -------------------------

/// PATCH body: `{"field": "...", "value": ...}`.
#[derive(Debug, Deserialize)]
pub struct FieldUpdateRequest {
    pub field: String,
    #[serde(default)]
    pub value: FieldValue,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    pub updates: Vec<BulkUpdateItem>,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdateItem {
    pub id: i32,
    pub field: String,
    #[serde(default)]
    pub value: FieldValue,
}

#[derive(Debug, Deserialize)]
pub struct TermsQuery {
    pub lang: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub count: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub products: Vec<Product>,
    pub count: i64,
    pub search_criteria: SearchCriteria,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: i64,
    pub total_value: f64,
    pub average_price: f64,
    pub in_stock_products: i64,
    pub out_of_stock_products: i64,
    pub timestamp: DateTime<Utc>,
}

/// One slot of a bulk-update result list.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BulkOutcome {
    Updated { success: bool, product: Product },
    Failed { success: bool, id: i32, error: String },
}
