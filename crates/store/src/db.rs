//! Connection pool construction and dev-mode schema sync.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use pricelist_core::Result;

use crate::error::map_db_error;

const CONNECT_ATTEMPTS: u32 = 5;

/// Build the bounded connection pool and establish the initial
/// connection, retrying with exponential backoff.
///
/// Pool sizing mirrors the production configuration: 2..=10
/// connections, 60 s acquire timeout, 30 s idle timeout.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let mut last_err = None;

    for attempt in 0..CONNECT_ATTEMPTS {
        if attempt > 0 {
            let delay = Duration::from_secs(1 << attempt.saturating_sub(1));
            tracing::warn!(attempt, delay_secs = delay.as_secs(), "retrying database connection");
            tokio::time::sleep(delay).await;
        }

        let result = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(60))
            .idle_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await;

        match result {
            Ok(pool) => {
                tracing::info!("database connection established");
                return Ok(pool);
            }
            Err(err) => {
                tracing::error!(attempt, error = %err, "database connection failed");
                last_err = Some(err);
            }
        }
    }

    Err(map_db_error(last_err.expect("at least one connection attempt")))
}

/// Liveness probe used by the health endpoint.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        article_no TEXT,
        name TEXT NOT NULL,
        name_sv TEXT,
        in_price DOUBLE PRECISION,
        price DOUBLE PRECISION NOT NULL DEFAULT 0,
        unit TEXT,
        in_stock INTEGER,
        description TEXT,
        description_sv TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_products_article_no ON products (article_no)",
    "CREATE INDEX IF NOT EXISTS idx_products_name ON products (name)",
    r#"
    CREATE TABLE IF NOT EXISTS terms_sections (
        id SERIAL PRIMARY KEY,
        lang_code VARCHAR(2) NOT NULL,
        slug TEXT NOT NULL,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_terms_lang_sort ON terms_sections (lang_code, sort_order)",
];

/// Create the tables if absent. Dev-mode only; production schemas are
/// managed out of band.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await.map_err(map_db_error)?;
    }
    tracing::info!("database schema synchronized");
    Ok(())
}
