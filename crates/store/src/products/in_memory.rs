//! In-memory product store for dev and tests.
//!
//! Mirrors the observable semantics of the Postgres store, including
//! the error taxonomy and id-ascending ordering.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use pricelist_core::{
    filter_products, Error, FieldPatch, NewProduct, Product, ProductField, Result, SearchCriteria,
};

use super::ProductStore;

#[derive(Default)]
struct Inner {
    rows: Vec<Product>,
    next_id: i32,
}

#[derive(Default)]
pub struct InMemoryProductStore {
    inner: Mutex<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply_patch(row: &mut Product, field: ProductField, value: FieldPatch) -> Result<()> {
    match (field, value) {
        (ProductField::ArticleNo, FieldPatch::Text(v)) => row.article_no = v,
        (ProductField::Name, FieldPatch::Text(Some(v))) => row.name = v,
        (ProductField::Name, FieldPatch::Text(None)) => {
            return Err(Error::Constraint("null value in column \"name\"".to_string()));
        }
        (ProductField::NameSv, FieldPatch::Text(v)) => row.name_sv = v,
        (ProductField::InPrice, FieldPatch::Float(v)) => row.in_price = v,
        (ProductField::Price, FieldPatch::Float(Some(v))) => row.price = v,
        (ProductField::Price, FieldPatch::Float(None)) => {
            return Err(Error::Constraint("null value in column \"price\"".to_string()));
        }
        (ProductField::Unit, FieldPatch::Text(v)) => row.unit = v,
        (ProductField::InStock, FieldPatch::Int(v)) => row.in_stock = v,
        (ProductField::Description, FieldPatch::Text(v)) => row.description = v,
        (ProductField::DescriptionSv, FieldPatch::Text(v)) => row.description_sv = v,
        (field, _) => {
            return Err(Error::Constraint(format!("type mismatch for column \"{field}\"")));
        }
    }
    Ok(())
}

fn set_editable(row: &mut Product, data: NewProduct) {
    row.article_no = data.article_no;
    row.name = data.name;
    row.name_sv = data.name_sv;
    row.in_price = data.in_price;
    row.price = data.price;
    row.unit = data.unit;
    row.in_stock = data.in_stock;
    row.description = data.description;
    row.description_sv = data.description_sv;
    row.updated_at = Utc::now();
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.inner.lock().unwrap().rows.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Product> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("Product", id))
    }

    async fn create(&self, data: NewProduct) -> Result<Product> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let now = Utc::now();
        let mut row = Product {
            id: inner.next_id,
            article_no: None,
            name: String::new(),
            name_sv: None,
            in_price: None,
            price: 0.0,
            unit: None,
            in_stock: None,
            description: None,
            description_sv: None,
            created_at: now,
            updated_at: now,
        };
        set_editable(&mut row, data);
        row.updated_at = now;
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, data: NewProduct) -> Result<Product> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("Product", id))?;
        set_editable(row, data);
        Ok(row.clone())
    }

    async fn update_field(&self, id: i32, field: ProductField, value: FieldPatch) -> Result<Product> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("Product", id))?;
        apply_patch(row, field, value)?;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|p| p.id != id);
        if inner.rows.len() == before {
            return Err(Error::not_found("Product", id));
        }
        Ok(true)
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Product>> {
        let inner = self.inner.lock().unwrap();
        Ok(filter_products(
            &inner.rows,
            criteria.article_no.as_deref().unwrap_or(""),
            criteria.name.as_deref().unwrap_or(""),
        ))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.inner.lock().unwrap().rows.len() as i64)
    }
}
