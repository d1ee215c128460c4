//! Product persistence gateway.

use async_trait::async_trait;

use pricelist_core::{FieldPatch, NewProduct, Product, ProductField, Result, SearchCriteria};

mod in_memory;
mod postgres;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

/// CRUD plus substring search over the single product table.
///
/// All implementations return records ordered by identity ascending and
/// surface absence as `Error::NotFound`.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> Result<Product>;

    /// Insert a sanitized record; returns it with generated id and
    /// timestamps.
    async fn create(&self, data: NewProduct) -> Result<Product>;

    /// Full replace of the editable fields of an existing record.
    async fn update(&self, id: i32, data: NewProduct) -> Result<Product>;

    /// Single-field replace.
    async fn update_field(&self, id: i32, field: ProductField, value: FieldPatch) -> Result<Product>;

    async fn delete(&self, id: i32) -> Result<bool>;

    /// Case-insensitive substring match. The `article_no` criterion is
    /// scoped to the article-number column; the `name` criterion ORs
    /// across English/Swedish name and description.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Product>>;

    async fn count(&self) -> Result<i64>;
}
