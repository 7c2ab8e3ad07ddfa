//! Submitted query validation

use super::ValidationError;

/// Maximum length for a submitted query (16KB)
const MAX_QUERY_LEN: usize = 16384;

/// Validated submission query text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedQuery(String);

impl SubmittedQuery {
    /// Create a validated query.
    ///
    /// # Rules
    /// - Must not be blank (whitespace-only counts as blank)
    /// - Max 16KB (16384 bytes)
    ///
    /// The text is stored as submitted; only the blank check trims.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "user_code" });
        }

        if s.len() > MAX_QUERY_LEN {
            return Err(ValidationError::TooLong {
                field: "user_code",
                max: MAX_QUERY_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the query as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SubmittedQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_query() {
        assert!(SubmittedQuery::new("SELECT * FROM users").is_ok());
    }

    #[test]
    fn rejects_blank() {
        assert!(matches!(
            SubmittedQuery::new("   \n\t").unwrap_err(),
            ValidationError::Empty { .. }
        ));
    }

    #[test]
    fn max_length() {
        let at_limit = "a".repeat(16384);
        assert!(SubmittedQuery::new(&at_limit).is_ok());

        let over = "a".repeat(16385);
        let err = SubmittedQuery::new(&over).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 16384, .. }));
    }

    #[test]
    fn preserves_original_text() {
        let q = SubmittedQuery::new("  SELECT 1 FROM t  ").unwrap();
        assert_eq!(q.as_str(), "  SELECT 1 FROM t  ");
    }
}
