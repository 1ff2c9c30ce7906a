use async_trait::async_trait;
use thiserror::Error;

use snipbin_core::Document;

/// Persistent document storage.
///
/// Implementations must be safe to share across request tasks; each call is a
/// single request/response round trip with no multi-step transaction.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by its (already validated) identifier.
    async fn get(&self, id: &str) -> Result<Document, StoreError>;

    /// Insert a new document. Fails with `StoreError::Conflict` if `id` is taken.
    async fn create(&self, id: &str, content: &str) -> Result<Document, StoreError>;
}

/// Storage error.
///
/// Callers distinguish only `NotFound` from everything else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,
    #[error("document already exists: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}
