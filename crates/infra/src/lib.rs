//! Infrastructure layer: document storage, configuration and id generation.

pub mod config;
pub mod document_store;
pub mod keygen;

pub use config::{AppConfig, ConfigError, IdKind};
pub use document_store::{DocumentStore, InMemoryDocumentStore, StoreError};
