//! Type-safe claimant identifier.
//!
//! [`UserId`] is a newtype over the chat platform's opaque user identifier
//! (a snowflake rendered as a decimal string on the observed platform) so
//! that user identifiers cannot be confused with channel IDs or other strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::BoardError;

/// Identifier of the member who claimed a first.
///
/// Opaque to the core: only equality matters. Uniqueness is per log entry,
/// not per user; one user owns many entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parses a user identifier, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidRequest`] if the identifier is empty or
    /// contains whitespace.
    pub fn parse(raw: &str) -> Result<Self, BoardError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardError::InvalidRequest(
                "user_id must not be empty".to_string(),
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(BoardError::InvalidRequest(format!(
                "user_id must not contain whitespace: {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}
