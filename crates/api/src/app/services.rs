//! Document store wiring and the lookup/creation pipeline.

use std::sync::Arc;
use std::time::Duration;

use snipbin_core::{Document, IdPolicy, Request};
use snipbin_infra::{AppConfig, DocumentStore, IdKind, InMemoryDocumentStore, StoreError, keygen};

use crate::app::errors::AppError;

/// Attempts at finding an unused identifier before giving up.
const CREATE_ATTEMPTS: usize = 3;

/// Pick the store implementation from configuration.
///
/// With a connection URI (and the `postgres` feature) documents are persisted;
/// otherwise they live in memory for the lifetime of the process.
pub async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.connection_uri.as_deref() {
        None => {
            tracing::warn!("no connection URI configured; documents are kept in memory only");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        #[cfg(feature = "postgres")]
        Some(uri) => {
            use anyhow::Context;

            let store = snipbin_infra::document_store::PostgresDocumentStore::connect(uri)
                .await
                .context("failed to connect to Postgres")?;
            store
                .migrate()
                .await
                .context("failed to prepare documents table")?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "postgres"))]
        Some(_) => anyhow::bail!(
            "SNIPBIN_CONNECTION_URI is set but this build lacks the `postgres` feature"
        ),
    }
}

/// Store access with the HTTP layer's error classification and timeouts applied.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    ids: IdPolicy,
    id_kind: IdKind,
    max_size: usize,
    timeout: Duration,
}

impl DocumentService {
    pub fn new(config: &AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            ids: config.id_policy(),
            id_kind: config.id_kind,
            max_size: config.max_size,
            timeout: config.store_timeout,
        }
    }

    /// Validate `id` and fetch it. Not-found maps to 404, anything else to 500.
    pub async fn fetch(&self, id: &str) -> Result<Document, AppError> {
        self.ids.validate(id)?;

        let result = tokio::time::timeout(self.timeout, self.store.get(id))
            .await
            .map_err(|_| AppError::Internal(format!("document lookup timed out after {:?}", self.timeout)))?;

        result.map_err(|err| {
            if !err.is_not_found() {
                tracing::warn!(id, error = %err, "document lookup failed");
            }
            err.into()
        })
    }

    /// Validate a create request and store it under a fresh identifier.
    pub async fn create(&self, request: Request) -> Result<Document, AppError> {
        request.validate(self.max_size)?;
        let Request::Create(body) = request else {
            return Err(AppError::ValidationFailed(
                "body: unsupported request type.".to_string(),
            ));
        };

        for _ in 0..CREATE_ATTEMPTS {
            let id = keygen::generate(self.id_kind, self.ids.length());
            if self.ids.is_reserved(&id) {
                continue;
            }

            let result = tokio::time::timeout(self.timeout, self.store.create(&id, &body.content))
                .await
                .map_err(|_| AppError::Internal(format!("document insert timed out after {:?}", self.timeout)))?;

            match result {
                Ok(document) => {
                    tracing::info!(id = %document.id, bytes = document.content.len(), "document created");
                    return Ok(document);
                }
                Err(StoreError::Conflict(taken)) => {
                    tracing::warn!(id = %taken, "generated id already taken; retrying");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "document insert failed");
                    return Err(AppError::internal(err));
                }
            }
        }

        Err(AppError::Internal(format!(
            "could not allocate a unique document id after {CREATE_ATTEMPTS} attempts"
        )))
    }
}
