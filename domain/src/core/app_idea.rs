//! App idea value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Minimum accepted length of an app idea, in characters
pub const MIN_APP_IDEA_CHARS: usize = 10;
/// Maximum accepted length of an app idea, in characters
pub const MAX_APP_IDEA_CHARS: usize = 1000;

/// The free-text description a pipeline run starts from (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppIdea {
    content: String,
}

impl AppIdea {
    /// Validate and create an app idea
    ///
    /// Surrounding whitespace is trimmed before the length check.
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into().trim().to_string();
        let chars = content.chars().count();
        if chars < MIN_APP_IDEA_CHARS {
            return Err(DomainError::InvalidAppIdea(format!(
                "must be at least {} characters (got {})",
                MIN_APP_IDEA_CHARS, chars
            )));
        }
        if chars > MAX_APP_IDEA_CHARS {
            return Err(DomainError::InvalidAppIdea(format!(
                "must be at most {} characters (got {})",
                MAX_APP_IDEA_CHARS, chars
            )));
        }
        Ok(Self { content })
    }

    /// Get the idea text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for AppIdea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for AppIdea {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AppIdea::try_new(value)
    }
}

impl From<AppIdea> for String {
    fn from(idea: AppIdea) -> Self {
        idea.content
    }
}
