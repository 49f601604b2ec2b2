//! Prompt domain
//!
//! Templates that turn a [`crate::context::PromptContext`] into the prompt
//! sent to a provider for each task.

mod template;

pub use template::PromptTemplate;

use serde::{Deserialize, Serialize};

/// A rendered prompt pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

impl RenderedPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}
