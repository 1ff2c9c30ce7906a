use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use snipbin_core::Document;

use super::r#trait::{DocumentStore, StoreError};

/// In-memory document store.
///
/// Intended for tests/dev. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document directly, bypassing conflict checks.
    pub fn insert(&self, document: Document) {
        let mut documents = self.documents.write().unwrap_or_else(|e| e.into_inner());
        documents.insert(document.id.clone(), document);
    }

    pub fn len(&self) -> usize {
        self.documents.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, id: &str) -> Result<Document, StoreError> {
        let documents = self.documents.read().unwrap_or_else(|e| e.into_inner());
        documents.get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create(&self, id: &str, content: &str) -> Result<Document, StoreError> {
        let mut documents = self.documents.write().unwrap_or_else(|e| e.into_inner());
        if documents.contains_key(id) {
            return Err(StoreError::Conflict(id.to_string()));
        }

        let document = Document::stored(id, content, Utc::now().timestamp());
        documents.insert(id.to_string(), document.clone());
        Ok(document)
    }
}
