//! Community post and comment content validation

use super::ValidationError;

/// Maximum length for post and comment content (10000 bytes)
const MAX_CONTENT_LEN: usize = 10000;

/// Validated post or comment body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Create validated content.
    ///
    /// # Rules
    /// - Must not be blank
    /// - Max 10000 bytes
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }

        if s.len() > MAX_CONTENT_LEN {
            return Err(ValidationError::TooLong {
                field: "content",
                max: MAX_CONTENT_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
