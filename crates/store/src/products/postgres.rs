//! Postgres-backed product store.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use pricelist_core::{Error, FieldPatch, NewProduct, Product, ProductField, Result, SearchCriteria};

use crate::error::map_db_error;

use super::ProductStore;

const COLUMNS: &str = "id, article_no, name, name_sv, in_price, price, unit, in_stock, \
                       description, description_sv, created_at, updated_at";

pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn product_from_row(row: &PgRow) -> Result<Product> {
    let read = || -> std::result::Result<Product, sqlx::Error> {
        Ok(Product {
            id: row.try_get("id")?,
            article_no: row.try_get("article_no")?,
            name: row.try_get("name")?,
            name_sv: row.try_get("name_sv")?,
            in_price: row.try_get("in_price")?,
            price: row.try_get("price")?,
            unit: row.try_get("unit")?,
            in_stock: row.try_get("in_stock")?,
            description: row.try_get("description")?,
            description_sv: row.try_get("description_sv")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    };
    read().map_err(map_db_error)
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM products ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Product> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match row {
            Some(row) => product_from_row(&row),
            None => Err(Error::not_found("Product", id)),
        }
    }

    async fn create(&self, data: NewProduct) -> Result<Product> {
        let row = sqlx::query(&format!(
            "INSERT INTO products \
             (article_no, name, name_sv, in_price, price, unit, in_stock, description, description_sv) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        ))
        .bind(&data.article_no)
        .bind(&data.name)
        .bind(&data.name_sv)
        .bind(data.in_price)
        .bind(data.price)
        .bind(&data.unit)
        .bind(data.in_stock)
        .bind(&data.description)
        .bind(&data.description_sv)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        product_from_row(&row)
    }

    async fn update(&self, id: i32, data: NewProduct) -> Result<Product> {
        let row = sqlx::query(&format!(
            "UPDATE products SET \
             article_no = $1, name = $2, name_sv = $3, in_price = $4, price = $5, \
             unit = $6, in_stock = $7, description = $8, description_sv = $9, \
             updated_at = NOW() \
             WHERE id = $10 \
             RETURNING {COLUMNS}"
        ))
        .bind(&data.article_no)
        .bind(&data.name)
        .bind(&data.name_sv)
        .bind(data.in_price)
        .bind(data.price)
        .bind(&data.unit)
        .bind(data.in_stock)
        .bind(&data.description)
        .bind(&data.description_sv)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match row {
            Some(row) => product_from_row(&row),
            None => Err(Error::not_found("Product", id)),
        }
    }

    async fn update_field(&self, id: i32, field: ProductField, value: FieldPatch) -> Result<Product> {
        // Column name comes from the enum, never from user input.
        let sql = format!(
            "UPDATE products SET {} = $1, updated_at = NOW() WHERE id = $2 RETURNING {COLUMNS}",
            field.as_str()
        );

        let query = sqlx::query(&sql);
        let query = match value {
            FieldPatch::Text(v) => query.bind(v),
            FieldPatch::Float(v) => query.bind(v),
            FieldPatch::Int(v) => query.bind(v),
        };

        let row = query.bind(id).fetch_optional(&self.pool).await.map_err(map_db_error)?;

        match row {
            Some(row) => product_from_row(&row),
            None => Err(Error::not_found("Product", id)),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Product", id));
        }
        Ok(true)
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Product>> {
        let article_pattern = criteria.article_no.as_deref().map(|q| format!("%{q}%"));
        let name_pattern = criteria.name.as_deref().map(|q| format!("%{q}%"));

        const NAME_CLAUSE: &str = "(name ILIKE $1 OR name_sv ILIKE $1 \
                                   OR description ILIKE $1 OR description_sv ILIKE $1)";

        let rows = match (&article_pattern, &name_pattern) {
            (Some(article), Some(name)) => {
                sqlx::query(&format!(
                    "SELECT {COLUMNS} FROM products \
                     WHERE article_no ILIKE $2 AND {NAME_CLAUSE} \
                     ORDER BY id ASC"
                ))
                .bind(name)
                .bind(article)
                .fetch_all(&self.pool)
                .await
            }
            (Some(article), None) => {
                sqlx::query(&format!(
                    "SELECT {COLUMNS} FROM products WHERE article_no ILIKE $1 ORDER BY id ASC"
                ))
                .bind(article)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(name)) => {
                sqlx::query(&format!(
                    "SELECT {COLUMNS} FROM products WHERE {NAME_CLAUSE} ORDER BY id ASC"
                ))
                .bind(name)
                .fetch_all(&self.pool)
                .await
            }
            (None, None) => {
                sqlx::query(&format!("SELECT {COLUMNS} FROM products ORDER BY id ASC"))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.try_get("n").map_err(map_db_error)
    }
}
