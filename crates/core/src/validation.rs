//! Field-level validation rules and their aggregate error.

use std::collections::BTreeMap;

/// Violations keyed by field name.
///
/// Fields are kept sorted so the rendered message is stable:
/// `content: cannot be blank; password: the length must be between 16 and 128.`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Run a rule against a string field, recording the first failure.
    pub fn check(&mut self, field: &'static str, value: &str, rules: &[Rule]) {
        if let Some(msg) = rules.iter().find_map(|rule| rule.apply(value)) {
            self.fields.insert(field, msg);
        }
    }

    /// `Ok(())` when no rule failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, (field, msg)) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {msg}")?;
        }
        if !self.fields.is_empty() {
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A single string constraint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty.
    Required,
    /// Character count must fall within `[min, max]`. Empty values pass; pair with `Required`.
    Length { min: usize, max: usize },
}

impl Rule {
    fn apply(self, value: &str) -> Option<String> {
        match self {
            Rule::Required if value.is_empty() => Some("cannot be blank".to_string()),
            Rule::Required => None,
            Rule::Length { min, max } => {
                if value.is_empty() {
                    return None;
                }
                let n = value.chars().count();
                (n < min || n > max)
                    .then(|| format!("the length must be between {min} and {max}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_reported_before_length() {
        let mut errs = FieldErrors::new();
        errs.check("content", "", &[Rule::Required, Rule::Length { min: 2, max: 10 }]);
        assert_eq!(errs.get("content"), Some("cannot be blank"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut errs = FieldErrors::new();
        // Two characters, six bytes.
        errs.check("content", "日本", &[Rule::Length { min: 2, max: 2 }]);
        assert!(errs.is_empty());
    }

    #[test]
    fn display_sorts_fields_and_terminates() {
        let mut errs = FieldErrors::new();
        errs.check("username", "", &[Rule::Required]);
        errs.check("password", "short", &[Rule::Length { min: 16, max: 128 }]);
        assert_eq!(
            errs.to_string(),
            "password: the length must be between 16 and 128; username: cannot be blank."
        );
    }
}
