//! Stored documents and credential records.

use serde::{Deserialize, Serialize};

/// A stored text blob addressable by an identifier.
///
/// Zero values are omitted from JSON output, so an absent document serializes
/// to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,

    /// Unix timestamp (seconds) of insertion.
    #[serde(skip_serializing_if = "is_zero")]
    pub created_at: i64,

    /// Unix timestamp (seconds) of the last modification.
    #[serde(skip_serializing_if = "is_zero")]
    pub updated_at: i64,

    #[serde(skip_serializing_if = "core::ops::Not::not")]
    pub exists: bool,
}

impl Document {
    /// A document as returned by a store: present, with both timestamps set to `at`.
    pub fn stored(id: impl Into<String>, content: impl Into<String>, at: i64) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            created_at: at,
            updated_at: at,
            exists: true,
        }
    }
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// Authentication token record. Only referenced structurally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub version: String,
    pub public: String,
    pub secret: String,
    pub salt: String,
}
