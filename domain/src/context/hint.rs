//! Context hints for local defaults

use crate::artifacts::ScreenSpec;
use crate::core::category::AppCategory;
use crate::core::string::truncate;
use crate::generation::DEFAULT_IMAGE_STYLE;
use serde::{Deserialize, Serialize};

const SUBJECT_MAX_LEN: usize = 80;
const DEFAULT_AUDIENCE: &str = "general users";

/// The small slice of pipeline context that local generators and the
/// reconciler's defaults depend on.
///
/// Local output is a pure function of the task and this hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextHint {
    pub category: AppCategory,
    /// Short label for the app, taken from the app idea
    pub subject: String,
    pub audience: String,
    /// The screen being rendered, for per-screen tasks
    pub screen: Option<ScreenSpec>,
    pub style: String,
}

impl ContextHint {
    pub fn new(category: AppCategory, subject: impl AsRef<str>) -> Self {
        Self {
            category,
            subject: truncate(subject.as_ref().trim(), SUBJECT_MAX_LEN),
            audience: DEFAULT_AUDIENCE.to_string(),
            screen: None,
            style: DEFAULT_IMAGE_STYLE.to_string(),
        }
    }

    /// Classify the subject text and build a hint from it
    pub fn from_subject(subject: impl AsRef<str>) -> Self {
        let subject = subject.as_ref();
        Self::new(AppCategory::classify(subject), subject)
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        let audience = audience.into();
        if !audience.trim().is_empty() {
            self.audience = audience;
        }
        self
    }

    pub fn with_screen(mut self, screen: ScreenSpec) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        let style = style.into();
        if !style.trim().is_empty() {
            self.style = style;
        }
        self
    }

    /// The screen being rendered, or a generic landing page
    pub fn screen_or_default(&self) -> ScreenSpec {
        self.screen
            .clone()
            .unwrap_or_else(|| ScreenSpec::named("Landing Page"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_subject_classifies() {
        let hint = ContextHint::from_subject("A pet-sitting marketplace");
        assert_eq!(hint.category, AppCategory::Ecommerce);
        assert_eq!(hint.subject, "A pet-sitting marketplace");
        assert_eq!(hint.audience, DEFAULT_AUDIENCE);
        assert_eq!(hint.style, DEFAULT_IMAGE_STYLE);
    }

    #[test]
    fn test_subject_is_shortened() {
        let hint = ContextHint::from_subject("x".repeat(500));
        assert!(hint.subject.len() <= SUBJECT_MAX_LEN);
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let hint = ContextHint::from_subject("A todo list app")
            .with_audience("  ")
            .with_style("");
        assert_eq!(hint.audience, DEFAULT_AUDIENCE);
        assert_eq!(hint.style, DEFAULT_IMAGE_STYLE);
    }

    #[test]
    fn test_screen_or_default() {
        let hint = ContextHint::from_subject("A todo list app");
        assert_eq!(hint.screen_or_default().id, "landing_page");
        let hint = hint.with_screen(ScreenSpec::named("Task Board"));
        assert_eq!(hint.screen_or_default().name, "Task Board");
    }
}
