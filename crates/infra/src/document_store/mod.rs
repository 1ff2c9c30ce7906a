//! Document storage boundary.
//!
//! The HTTP layer only needs two operations: look a document up by id and
//! insert a new one. Everything storage-specific stays behind `DocumentStore`.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryDocumentStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresDocumentStore;
pub use r#trait::{DocumentStore, StoreError};
