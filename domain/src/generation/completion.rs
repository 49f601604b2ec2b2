//! Raw provider completions

use serde::{Deserialize, Serialize};

/// Whatever a provider returned, before extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawCompletion {
    /// Free-form text, possibly wrapping JSON or markup
    Text { text: String },
    /// A generated image, by URL or data URI
    Image { source: String, format: String },
}

impl RawCompletion {
    pub fn text(text: impl Into<String>) -> Self {
        RawCompletion::Text { text: text.into() }
    }

    pub fn image(source: impl Into<String>, format: impl Into<String>) -> Self {
        RawCompletion::Image {
            source: source.into(),
            format: format.into(),
        }
    }

    /// The text body, if this is a text completion
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawCompletion::Text { text } => Some(text),
            RawCompletion::Image { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawCompletion::Text { text } => text.trim().is_empty(),
            RawCompletion::Image { source, .. } => source.trim().is_empty(),
        }
    }
}
