//! Typed wrapper over the pricelist REST endpoints.
//!
//! Read operations fail soft: network or decode failures degrade to an
//! empty result so the UI shows an empty state instead of crashing.
//! Write operations propagate a typed error for the sync layer to
//! handle.

use reqwest::Response;
use serde::Deserialize;
use serde_json::json;

use pricelist_core::{FieldValue, Product, ProductDraft, ProductField, SearchCriteria};

use crate::error::{ClientError, ClientResult};

pub struct ProductsApi {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ProductListBody {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct ProductBody {
    product: Product,
}

/// Aggregate stats as served by `/api/pricelist/stats`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total_products: i64,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub average_price: f64,
    #[serde(default)]
    pub in_stock_products: i64,
    #[serde(default)]
    pub out_of_stock_products: i64,
}

async fn checked(res: Response) -> ClientResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    // Prefer the server's error envelope when it parses.
    let message = match res.json::<serde_json::Value>().await {
        Ok(body) => body["error"].as_str().unwrap_or("request failed").to_string(),
        Err(_) => "request failed".to_string(),
    };

    Err(ClientError::Api { status: status.as_u16(), message })
}

impl ProductsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/pricelist", self.base_url)
    }

    /// Fetch the full list; empty on any failure.
    pub async fn fetch_products(&self) -> Vec<Product> {
        match self.try_fetch_products().await {
            Ok(products) => products,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch products");
                Vec::new()
            }
        }
    }

    /// Fetch the full list, surfacing failures.
    pub async fn try_fetch_products(&self) -> ClientResult<Vec<Product>> {
        let res = self.http.get(self.endpoint()).send().await?;
        let body: ProductListBody = checked(res).await?.json().await?;
        Ok(body.products)
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product> {
        let res = self.http.post(self.endpoint()).json(draft).send().await?;
        Ok(checked(res).await?.json().await?)
    }

    pub async fn update_product(&self, id: i32, draft: &ProductDraft) -> ClientResult<Product> {
        let res = self
            .http
            .put(format!("{}/{id}", self.endpoint()))
            .json(draft)
            .send()
            .await?;
        let body: ProductBody = checked(res).await?.json().await?;
        Ok(body.product)
    }

    pub async fn update_product_field(
        &self,
        id: i32,
        field: ProductField,
        value: &FieldValue,
    ) -> ClientResult<Product> {
        let res = self
            .http
            .patch(format!("{}/{id}", self.endpoint()))
            .json(&json!({ "field": field.as_str(), "value": value }))
            .send()
            .await?;
        let body: ProductBody = checked(res).await?.json().await?;
        Ok(body.product)
    }

    pub async fn delete_product(&self, id: i32) -> ClientResult<()> {
        let res = self.http.delete(format!("{}/{id}", self.endpoint())).send().await?;
        checked(res).await?;
        Ok(())
    }

    /// Server-side substring search; empty on any failure.
    pub async fn search_products(&self, criteria: &SearchCriteria) -> Vec<Product> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(article_no) = criteria.article_no.as_deref() {
            query.push(("articleNo", article_no));
        }
        if let Some(name) = criteria.name.as_deref() {
            query.push(("name", name));
        }

        let result: ClientResult<Vec<Product>> = async {
            let res = self
                .http
                .get(format!("{}/search", self.endpoint()))
                .query(&query)
                .send()
                .await?;
            let body: ProductListBody = checked(res).await?.json().await?;
            Ok(body.products)
        }
        .await;

        match result {
            Ok(products) => products,
            Err(err) => {
                tracing::error!(error = %err, "failed to search products");
                Vec::new()
            }
        }
    }

    /// Aggregate stats; zeroed on any failure.
    pub async fn fetch_stats(&self) -> Stats {
        let result: ClientResult<Stats> = async {
            let res = self.http.get(format!("{}/stats", self.endpoint())).send().await?;
            Ok(checked(res).await?.json().await?)
        }
        .await;

        match result {
            Ok(stats) => stats,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch stats");
                Stats::default()
            }
        }
    }
}
