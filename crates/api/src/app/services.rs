//! Application context object.
//!
//! One `AppServices` is constructed at process start and injected into
//! request handlers. No hidden singletons; tests get fresh instances
//! per test.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use pricelist_core::{
    sanitize_field, sanitize_product, validate_product, validate_product_field, Error, FieldValue,
    Lang, Product, ProductDraft, ProductField, Result, SearchCriteria, TermsSection,
};
use pricelist_store::{
    db, InMemoryProductStore, InMemoryTermsStore, PostgresProductStore, PostgresTermsStore,
    ProductStore, TermsStore,
};

use crate::app::dto::{BulkOutcome, BulkUpdateItem, ProductListResponse, ProductStats, SearchResponse};

pub struct AppServices {
    pub products: ProductService,
    pub terms: TermsService,
    db: Option<PgPool>,
}

impl AppServices {
    /// Wire the context over explicit store instances.
    pub fn with_stores(
        products: Arc<dyn ProductStore>,
        terms: Arc<dyn TermsStore>,
        db: Option<PgPool>,
    ) -> Self {
        Self {
            products: ProductService::new(products),
            terms: TermsService::new(terms),
            db,
        }
    }

    /// In-memory wiring (dev fallback and tests).
    pub fn in_memory() -> Self {
        Self::with_stores(
            Arc::new(InMemoryProductStore::new()),
            Arc::new(InMemoryTermsStore::new()),
            None,
        )
    }

    /// Postgres wiring for production.
    pub fn postgres(pool: PgPool) -> Self {
        Self::with_stores(
            Arc::new(PostgresProductStore::new(pool.clone())),
            Arc::new(PostgresTermsStore::new(pool.clone())),
            Some(pool),
        )
    }

    /// Database liveness: `None` when running on in-memory stores.
    pub async fn database_alive(&self) -> Option<bool> {
        match &self.db {
            Some(pool) => Some(db::ping(pool).await),
            None => None,
        }
    }
}

/// Orchestrates validation and persistence for products, and computes
/// the derived statistics.
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_products(&self) -> Result<ProductListResponse> {
        let products = self.store.find_all().await?;
        let count = self.store.count().await?;
        Ok(ProductListResponse { products, count, timestamp: Utc::now() })
    }

    pub async fn get_product(&self, id: i32) -> Result<Product> {
        self.store.find_by_id(id).await
    }

    /// Validate, sanitize, persist. Validation failure short-circuits
    /// with no persistence attempt.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        let validation = validate_product(draft);
        if !validation.is_valid {
            return Err(Error::validation(validation.errors));
        }
        self.store.create(sanitize_product(draft)).await
    }

    pub async fn update_product(&self, id: i32, draft: &ProductDraft) -> Result<Product> {
        let validation = validate_product(draft);
        if !validation.is_valid {
            return Err(Error::validation(validation.errors));
        }
        self.store.update(id, sanitize_product(draft)).await
    }

    pub async fn update_product_field(&self, id: i32, field: &str, value: &FieldValue) -> Result<Product> {
        let validation = validate_product_field(field, value);
        if !validation.is_valid {
            return Err(Error::validation(validation.errors));
        }
        let field: ProductField = field
            .parse()
            .map_err(|_| Error::validation(vec!["Invalid field name".to_string()]))?;

        self.store.update_field(id, field, sanitize_field(field, value)).await
    }

    pub async fn delete_product(&self, id: i32) -> Result<bool> {
        self.store.delete(id).await
    }

    pub async fn search_products(&self, criteria: SearchCriteria) -> Result<SearchResponse> {
        let products = self.store.search(&criteria).await?;
        let count = products.len() as i64;
        Ok(SearchResponse { products, count, search_criteria: criteria, timestamp: Utc::now() })
    }

    /// Aggregate statistics over the whole catalog. Monetary outputs
    /// are rounded to 2 decimal places.
    pub async fn get_product_stats(&self) -> Result<ProductStats> {
        let total_products = self.store.count().await?;
        let products = self.store.find_all().await?;

        let total_value: f64 = products
            .iter()
            .map(|p| p.price * f64::from(p.in_stock.unwrap_or(0)))
            .sum();

        let average_price = if products.is_empty() {
            0.0
        } else {
            products.iter().map(|p| p.price).sum::<f64>() / products.len() as f64
        };

        let in_stock_products = products.iter().filter(|p| p.in_stock.unwrap_or(0) > 0).count() as i64;

        Ok(ProductStats {
            total_products,
            total_value: round2(total_value),
            average_price: round2(average_price),
            in_stock_products,
            out_of_stock_products: total_products - in_stock_products,
            timestamp: Utc::now(),
        })
    }

    /// Best-effort batch of independent single-field updates. A failed
    /// item is captured in its slot and never aborts the rest.
    pub async fn bulk_update_products(&self, updates: Vec<BulkUpdateItem>) -> Vec<BulkOutcome> {
        let mut results = Vec::with_capacity(updates.len());
        for update in updates {
            match self.update_product_field(update.id, &update.field, &update.value).await {
                Ok(product) => results.push(BulkOutcome::Updated { success: true, product }),
                Err(err) => {
                    tracing::warn!(id = update.id, field = %update.field, error = %err, "bulk update item failed");
                    results.push(BulkOutcome::Failed {
                        success: false,
                        id: update.id,
                        error: err.to_string(),
                    });
                }
            }
        }
        results
    }
}

/// Ordered terms-of-service content reads.
pub struct TermsService {
    store: Arc<dyn TermsStore>,
}

impl TermsService {
    pub fn new(store: Arc<dyn TermsStore>) -> Self {
        Self { store }
    }

    pub async fn sections_for(&self, lang: Lang) -> Result<Vec<TermsSection>> {
        self.store.sections_for(lang).await
    }

    pub async fn all_sections(&self) -> Result<Vec<TermsSection>> {
        self.store.all_sections().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> AppServices {
        AppServices::in_memory()
    }

    fn draft(name: &str, price: f64, in_stock: Option<i32>) -> ProductDraft {
        ProductDraft {
            name: Some(name.to_string()),
            price: FieldValue::Number(price),
            in_stock: in_stock.map(|n| FieldValue::Number(f64::from(n))).unwrap_or_default(),
            ..ProductDraft::default()
        }
    }

    #[tokio::test]
    async fn create_rejects_invalid_drafts_without_persisting() {
        let ctx = services();
        let err = ctx
            .products
            .create_product(&ProductDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(ctx.products.get_all_products().await.unwrap().count, 0);
    }

    #[tokio::test]
    async fn stats_match_the_worked_example() {
        let ctx = services();
        ctx.products.create_product(&draft("A", 10.0, Some(2))).await.unwrap();
        ctx.products.create_product(&draft("B", 5.0, Some(0))).await.unwrap();

        let stats = ctx.products.get_product_stats().await.unwrap();
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.total_value, 20.0);
        assert_eq!(stats.average_price, 7.5);
        assert_eq!(stats.in_stock_products, 1);
        assert_eq!(stats.out_of_stock_products, 1);
    }

    #[tokio::test]
    async fn stats_on_an_empty_catalog_are_zero() {
        let stats = services().products.get_product_stats().await.unwrap();
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.total_value, 0.0);
        assert_eq!(stats.average_price, 0.0);
    }

    #[tokio::test]
    async fn missing_in_stock_counts_as_zero_value() {
        let ctx = services();
        ctx.products.create_product(&draft("A", 10.0, None)).await.unwrap();

        let stats = ctx.products.get_product_stats().await.unwrap();
        assert_eq!(stats.total_value, 0.0);
        assert_eq!(stats.out_of_stock_products, 1);
    }

    #[tokio::test]
    async fn bulk_update_is_best_effort_per_item() {
        let ctx = services();
        let a = ctx.products.create_product(&draft("A", 10.0, None)).await.unwrap();
        let b = ctx.products.create_product(&draft("B", 5.0, None)).await.unwrap();

        let results = ctx
            .products
            .bulk_update_products(vec![
                BulkUpdateItem { id: a.id, field: "price".to_string(), value: FieldValue::Number(11.0) },
                BulkUpdateItem { id: 9999, field: "price".to_string(), value: FieldValue::Number(1.0) },
                BulkUpdateItem { id: b.id, field: "unit".to_string(), value: FieldValue::from("kg") },
            ])
            .await;

        assert_eq!(results.len(), 3);
        let failed: Vec<_> = results
            .iter()
            .filter(|r| matches!(r, BulkOutcome::Failed { .. }))
            .collect();
        assert_eq!(failed.len(), 1);
        assert!(matches!(failed[0], BulkOutcome::Failed { id: 9999, .. }));

        assert_eq!(ctx.products.get_product(a.id).await.unwrap().price, 11.0);
        assert_eq!(ctx.products.get_product(b.id).await.unwrap().unit.as_deref(), Some("kg"));
    }

    #[tokio::test]
    async fn field_update_coerces_strings() {
        let ctx = services();
        let a = ctx.products.create_product(&draft("A", 10.0, None)).await.unwrap();

        let updated = ctx
            .products
            .update_product_field(a.id, "price", &FieldValue::from("12.50"))
            .await
            .unwrap();
        assert_eq!(updated.price, 12.5);

        let updated = ctx
            .products
            .update_product_field(a.id, "unit", &FieldValue::from("  st "))
            .await
            .unwrap();
        assert_eq!(updated.unit.as_deref(), Some("st"));
    }

    #[tokio::test]
    async fn field_update_rejects_unknown_fields() {
        let ctx = services();
        let a = ctx.products.create_product(&draft("A", 10.0, None)).await.unwrap();

        let err = ctx
            .products
            .update_product_field(a.id, "created_at", &FieldValue::from("now"))
            .await
            .unwrap_err();
        assert_eq!(err, Error::Validation(vec!["Invalid field name".to_string()]));
    }
}
