//! Terms-section persistence gateway.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use pricelist_core::{Error, Lang, Result, TermsSection};

use crate::error::map_db_error;

/// Ordered reads of the terms-of-service sections.
#[async_trait]
pub trait TermsStore: Send + Sync {
    /// Sections for one language, ordered by `sort_order` ascending.
    async fn sections_for(&self, lang: Lang) -> Result<Vec<TermsSection>>;

    /// Every section in both languages, ordered by language then
    /// `sort_order`.
    async fn all_sections(&self) -> Result<Vec<TermsSection>>;
}

pub struct PostgresTermsStore {
    pool: PgPool,
}

impl PostgresTermsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, lang_code, slug, title, body, sort_order, created_at, updated_at";

fn section_from_row(row: &PgRow) -> Result<TermsSection> {
    let lang_code: String = row.try_get("lang_code").map_err(map_db_error)?;
    let lang_code = lang_code
        .parse::<Lang>()
        .map_err(|_| Error::storage(format!("invalid lang_code {lang_code:?} in terms_sections")))?;

    let read = || -> std::result::Result<TermsSection, sqlx::Error> {
        Ok(TermsSection {
            id: row.try_get("id")?,
            lang_code,
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
            body: row.try_get("body")?,
            sort_order: row.try_get("sort_order")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    };
    read().map_err(map_db_error)
}

#[async_trait]
impl TermsStore for PostgresTermsStore {
    async fn sections_for(&self, lang: Lang) -> Result<Vec<TermsSection>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM terms_sections WHERE lang_code = $1 ORDER BY sort_order ASC"
        ))
        .bind(lang.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.iter().map(section_from_row).collect()
    }

    async fn all_sections(&self) -> Result<Vec<TermsSection>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM terms_sections ORDER BY lang_code ASC, sort_order ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.iter().map(section_from_row).collect()
    }
}

/// In-memory terms store for dev and tests.
#[derive(Default)]
pub struct InMemoryTermsStore {
    inner: Mutex<Vec<TermsSection>>,
}

impl InMemoryTermsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one section; ids are assigned in insertion order.
    pub fn push(&self, lang_code: Lang, slug: &str, title: &str, body: &str, sort_order: i32) {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();
        let id = inner.len() as i32 + 1;
        inner.push(TermsSection {
            id,
            lang_code,
            slug: slug.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            sort_order,
            created_at: now,
            updated_at: now,
        });
    }
}

#[async_trait]
impl TermsStore for InMemoryTermsStore {
    async fn sections_for(&self, lang: Lang) -> Result<Vec<TermsSection>> {
        let mut sections: Vec<TermsSection> = self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.lang_code == lang)
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.sort_order);
        Ok(sections)
    }

    async fn all_sections(&self) -> Result<Vec<TermsSection>> {
        let mut sections = self.inner.lock().unwrap().clone();
        sections.sort_by_key(|s| (s.lang_code.as_str(), s.sort_order));
        Ok(sections)
    }
}
