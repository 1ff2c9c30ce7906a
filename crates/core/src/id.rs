//! Document identifiers: well-formedness policy and route-segment parsing.

use std::collections::BTreeSet;

use crate::error::{DomainError, DomainResult};

/// Rules a document identifier must satisfy before it is looked up.
///
/// An identifier is accepted when it is exactly `length` bytes long, or when it
/// is one of the configured reserved identifiers (static/well-known pages).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPolicy {
    length: usize,
    reserved: BTreeSet<String>,
}

impl IdPolicy {
    pub fn new(length: usize, reserved: impl IntoIterator<Item = String>) -> Self {
        Self {
            length,
            reserved: reserved.into_iter().collect(),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_reserved(&self, id: &str) -> bool {
        self.reserved.contains(id)
    }

    pub fn validate(&self, id: &str) -> DomainResult<()> {
        if id.len() != self.length && !self.is_reserved(id) {
            return Err(DomainError::invalid_id(format!(
                "id is of length {}, should be {}",
                id.len(),
                self.length
            )));
        }
        Ok(())
    }
}

/// A `{document}` route segment split into identifier and optional extension hint.
///
/// `abc123.rs` → id `abc123`, extension `rs`. Segments with more than one dot
/// keep only the leading identifier and carry no hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath<'a> {
    pub id: &'a str,
    pub extension: Option<&'a str>,
}

impl<'a> DocumentPath<'a> {
    pub fn parse(segment: &'a str) -> Self {
        let mut parts = segment.split('.');
        let id = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        let extension = match rest.as_slice() {
            [ext] if !ext.is_empty() => Some(*ext),
            _ => None,
        };

        Self { id, extension }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn policy() -> IdPolicy {
        IdPolicy::new(6, ["about".to_string()])
    }

    #[test]
    fn wrong_length_is_rejected_with_message() {
        let err = policy().validate("abc").unwrap_err();
        assert_eq!(err, DomainError::InvalidId("id is of length 3, should be 6".into()));
    }

    #[test]
    fn reserved_ids_bypass_length() {
        assert!(policy().validate("about").is_ok());
        assert!(policy().validate("abc123").is_ok());
    }

    #[test]
    fn path_with_extension() {
        let p = DocumentPath::parse("abc123.rs");
        assert_eq!(p.id, "abc123");
        assert_eq!(p.extension, Some("rs"));
    }

    #[test]
    fn path_without_extension() {
        assert_eq!(DocumentPath::parse("abc123").extension, None);
        assert_eq!(DocumentPath::parse("abc123.").extension, None);
    }

    #[test]
    fn path_with_many_dots_drops_hint() {
        let p = DocumentPath::parse("abc123.tar.gz");
        assert_eq!(p.id, "abc123");
        assert_eq!(p.extension, None);
    }

    proptest! {
        #[test]
        fn accepted_iff_exact_length_or_reserved(id in "[a-zA-Z0-9]{0,12}") {
            let policy = policy();
            let expected = id.len() == 6 || id == "about";
            prop_assert_eq!(policy.validate(&id).is_ok(), expected);
        }
    }
}
