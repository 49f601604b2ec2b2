//! Prompt context passed from the orchestrator to the fallback ladder.
//!
//! [`PromptContext`] carries everything a prompt template may reference.
//! [`ContextHint`] is the deterministic subset the local generators use.

pub mod hint;
pub mod requirements;

pub use hint::ContextHint;
pub use requirements::Requirements;

use crate::artifacts::{RoleInsights, ScreenSpec};
use crate::core::app_idea::AppIdea;
use crate::core::category::AppCategory;

/// Everything a task prompt can draw on
#[derive(Debug, Clone, PartialEq)]
pub struct PromptContext {
    pub app_idea: AppIdea,
    pub requirements: Option<Requirements>,
    pub insights: Option<RoleInsights>,
    /// The screen being rendered, for per-screen tasks
    pub screen: Option<ScreenSpec>,
    /// Names of every screen in the specification
    pub screen_names: Vec<String>,
    pub style: Option<String>,
}

impl PromptContext {
    pub fn new(app_idea: AppIdea) -> Self {
        Self {
            app_idea,
            requirements: None,
            insights: None,
            screen: None,
            screen_names: Vec::new(),
            style: None,
        }
    }

    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = Some(requirements);
        self
    }

    pub fn with_insights(mut self, insights: RoleInsights) -> Self {
        self.insights = Some(insights);
        self
    }

    pub fn with_screen(mut self, screen: ScreenSpec) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn with_screen_names(mut self, names: Vec<String>) -> Self {
        self.screen_names = names;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Category is always inferred from the app idea alone, so it stays
    /// stable across every step of a run.
    pub fn category(&self) -> AppCategory {
        AppCategory::classify(self.app_idea.content())
    }

    pub fn hint(&self) -> ContextHint {
        let mut hint = ContextHint::new(self.category(), self.app_idea.content());
        if let Some(audience) = self
            .requirements
            .as_ref()
            .and_then(Requirements::audience_phrase)
        {
            hint = hint.with_audience(audience);
        }
        if let Some(screen) = &self.screen {
            hint = hint.with_screen(screen.clone());
        }
        if let Some(style) = &self.style {
            hint = hint.with_style(style.clone());
        }
        hint
    }
}
