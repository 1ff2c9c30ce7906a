//! Postgres-backed document store.
//!
//! Documents live in a single `documents` table keyed by id. Timestamps are
//! stored as `TIMESTAMPTZ` and surfaced as Unix seconds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use snipbin_core::Document;

use super::r#trait::{DocumentStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id         TEXT PRIMARY KEY,
    content    TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Document store over a shared `PgPool`.
///
/// The pool is internally reference counted, so cloning the store is cheap.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `uri` with a small default pool.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(uri)
            .await
            .map_err(backend)?;
        Ok(Self::new(pool))
    }

    /// Create the `documents` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn get(&self, id: &str) -> Result<Document, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, content, created_at, updated_at
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            Some(row) => document_from_row(&row),
            None => Err(StoreError::NotFound),
        }
    }

    async fn create(&self, id: &str, content: &str) -> Result<Document, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO documents (id, content)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            Some(row) => document_from_row(&row),
            None => Err(StoreError::Conflict(id.to_string())),
        }
    }
}

fn document_from_row(row: &PgRow) -> Result<Document, StoreError> {
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(backend)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(backend)?;

    Ok(Document {
        id: row.try_get("id").map_err(backend)?,
        content: row.try_get("content").map_err(backend)?,
        created_at: created_at.timestamp(),
        updated_at: updated_at.timestamp(),
        exists: true,
    })
}

fn backend(err: sqlx::Error) -> StoreError {
    tracing::warn!(error = %err, "postgres document store error");
    StoreError::Backend(err.to_string())
}
