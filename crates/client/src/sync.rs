//! Client-held product list and the optimistic-update protocol.
//!
//! Field saves rewrite the local record before the server confirms, so
//! the UI reflects the edit immediately. A failed save discards local
//! state by forcing a full authoritative refetch; rollback is "refetch
//! everything", never a field-level undo. Add/edit/delete go to the
//! network first and only then touch the local list.

use std::collections::HashMap;
use std::time::Duration;

use pricelist_core::{
    filter_products, sanitize_field, FieldPatch, FieldValue, Product, ProductDraft, ProductField,
};

use crate::api::ProductsApi;
use crate::cache::{TtlCache, DEFAULT_TTL};
use crate::error::ClientResult;
use crate::limit::{OpClass, RateLimiter};

/// Cache key for the product list.
pub const PRODUCTS_CACHE_KEY: &str = "products";

pub struct ProductSync {
    api: ProductsApi,
    cache: TtlCache<Vec<Product>>,
    limiter: RateLimiter,
    products: Vec<Product>,
    /// Edit-session token per cell (keyed by product id). A stale
    /// in-flight response is discarded when its token no longer
    /// matches.
    edit_sessions: HashMap<i32, u64>,
    next_session: u64,
}

impl ProductSync {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_parts(ProductsApi::new(base_url), DEFAULT_TTL, RateLimiter::with_defaults())
    }

    pub fn with_parts(api: ProductsApi, cache_ttl: Duration, limiter: RateLimiter) -> Self {
        Self {
            api,
            cache: TtlCache::new(cache_ttl),
            limiter,
            products: Vec::new(),
            edit_sessions: HashMap::new(),
            next_session: 0,
        }
    }

    /// The current client-held list (possibly stale).
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Read-through fetch. Cache hits skip the network entirely; a
    /// failed network fetch yields the empty list and caches nothing.
    pub async fn fetch_products(&mut self) -> Vec<Product> {
        if let Some(cached) = self.cache.get(PRODUCTS_CACHE_KEY) {
            self.products = cached.clone();
            return cached;
        }

        self.limiter.acquire(OpClass::Fetch).await;
        match self.api.try_fetch_products().await {
            Ok(products) => {
                self.cache.set(PRODUCTS_CACHE_KEY, products.clone());
                self.products = products.clone();
                products
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch products");
                self.products = Vec::new();
                Vec::new()
            }
        }
    }

    /// Drop the cache and fetch the authoritative list.
    pub async fn refresh_products(&mut self) -> Vec<Product> {
        self.cache.clear();
        self.fetch_products().await
    }

    /// Optimistic single-field save.
    ///
    /// The local record is rewritten before the PATCH resolves. On
    /// success the server record is merged back unless a newer edit
    /// session for the same cell has started in the meantime. On
    /// failure the whole list is refetched and the error propagated so
    /// the UI can notify.
    pub async fn save_product_field(
        &mut self,
        id: i32,
        field: ProductField,
        value: FieldValue,
    ) -> ClientResult<Product> {
        let token = self.begin_edit_session(id);

        if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
            apply_local(product, field, &value);
        }

        self.limiter.acquire(OpClass::FieldSave).await;
        match self.api.update_product_field(id, field, &value).await {
            Ok(product) => {
                self.cache.invalidate_prefix(PRODUCTS_CACHE_KEY);
                if self.edit_sessions.get(&id) == Some(&token) {
                    self.merge(product.clone());
                }
                Ok(product)
            }
            Err(err) => {
                self.refresh_products().await;
                Err(err)
            }
        }
    }

    /// Create on the server, then append locally.
    pub async fn add_product(&mut self, draft: &ProductDraft) -> ClientResult<Product> {
        self.limiter.acquire(OpClass::Add).await;
        let product = self.api.create_product(draft).await?;
        self.cache.invalidate_prefix(PRODUCTS_CACHE_KEY);
        self.products.push(product.clone());
        Ok(product)
    }

    /// Full update on the server, then merge locally.
    pub async fn edit_product(&mut self, id: i32, draft: &ProductDraft) -> ClientResult<Product> {
        self.limiter.acquire(OpClass::Edit).await;
        let product = self.api.update_product(id, draft).await?;
        self.cache.invalidate_prefix(PRODUCTS_CACHE_KEY);
        self.merge(product.clone());
        Ok(product)
    }

    /// Delete on the server, then remove locally.
    pub async fn delete_product(&mut self, id: i32) -> ClientResult<()> {
        self.limiter.acquire(OpClass::Delete).await;
        self.api.delete_product(id).await?;
        self.cache.invalidate_prefix(PRODUCTS_CACHE_KEY);
        self.products.retain(|p| p.id != id);
        Ok(())
    }

    /// Pure local re-filter of the held list.
    pub fn filter(&self, article_no_query: &str, name_query: &str) -> Vec<Product> {
        filter_products(&self.products, article_no_query, name_query)
    }

    fn begin_edit_session(&mut self, id: i32) -> u64 {
        self.next_session += 1;
        self.edit_sessions.insert(id, self.next_session);
        self.next_session
    }

    fn merge(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product,
            None => self.products.push(product),
        }
    }
}

/// Local counterpart of the server's single-field write, using the
/// same coercion rules so the optimistic value matches what the server
/// will store.
fn apply_local(product: &mut Product, field: ProductField, value: &FieldValue) {
    match sanitize_field(field, value) {
        FieldPatch::Text(text) => match field {
            ProductField::ArticleNo => product.article_no = text,
            ProductField::Name => {
                if let Some(name) = text {
                    product.name = name;
                }
            }
            ProductField::NameSv => product.name_sv = text,
            ProductField::Unit => product.unit = text,
            ProductField::Description => product.description = text,
            ProductField::DescriptionSv => product.description_sv = text,
            _ => {}
        },
        FieldPatch::Float(number) => match field {
            ProductField::InPrice => product.in_price = number,
            ProductField::Price => {
                if let Some(price) = number {
                    product.price = price;
                }
            }
            _ => {}
        },
        FieldPatch::Int(number) => {
            if field == ProductField::InStock {
                product.in_stock = number;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i32) -> Product {
        Product {
            id,
            article_no: None,
            name: "Hammer".to_string(),
            name_sv: None,
            in_price: None,
            price: 10.0,
            unit: None,
            in_stock: None,
            description: None,
            description_sv: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn apply_local_coerces_like_the_server() {
        let mut p = product(1);

        apply_local(&mut p, ProductField::Price, &FieldValue::from("12.50"));
        assert_eq!(p.price, 12.5);

        apply_local(&mut p, ProductField::InStock, &FieldValue::from("7"));
        assert_eq!(p.in_stock, Some(7));

        apply_local(&mut p, ProductField::Unit, &FieldValue::from("  kg "));
        assert_eq!(p.unit.as_deref(), Some("kg"));

        apply_local(&mut p, ProductField::Unit, &FieldValue::from("   "));
        assert_eq!(p.unit, None);
    }

    #[test]
    fn edit_sessions_supersede_older_ones_per_cell() {
        let mut sync = ProductSync::new("http://localhost:0");

        let first = sync.begin_edit_session(1);
        let second = sync.begin_edit_session(1);
        let other_cell = sync.begin_edit_session(2);

        // Only the newest token for a cell is current.
        assert_eq!(sync.edit_sessions.get(&1), Some(&second));
        assert_ne!(first, second);
        assert_eq!(sync.edit_sessions.get(&2), Some(&other_cell));
    }

    #[test]
    fn merge_replaces_or_appends() {
        let mut sync = ProductSync::new("http://localhost:0");
        sync.products = vec![product(1)];

        let mut updated = product(1);
        updated.price = 99.0;
        sync.merge(updated);
        assert_eq!(sync.products.len(), 1);
        assert_eq!(sync.products[0].price, 99.0);

        sync.merge(product(2));
        assert_eq!(sync.products.len(), 2);
    }
}
