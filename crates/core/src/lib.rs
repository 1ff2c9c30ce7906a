//! `snipbin-core`: domain building blocks for the paste service.
//!
//! This crate contains **pure domain** types and rules (no infrastructure concerns):
//! documents, identifier validation and request field validation.

pub mod document;
pub mod error;
pub mod id;
pub mod request;
pub mod validation;

pub use document::{Document, Token};
pub use error::{DomainError, DomainResult};
pub use id::{DocumentPath, IdPolicy};
pub use request::{CreateRequest, Request, SigninRequest, SignupRequest};
pub use validation::FieldErrors;
