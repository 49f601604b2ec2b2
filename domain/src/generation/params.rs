//! Per-task generation parameters

use crate::core::task::GenerationTask;
use serde::{Deserialize, Serialize};

/// Default visual style for image mockups
pub const DEFAULT_IMAGE_STYLE: &str = "clean wireframe";

/// Sampling parameters handed to a provider alongside the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Visual style, only meaningful for image tasks
    pub style: Option<String>,
    pub image_width: u32,
    pub image_height: u32,
}

impl GenerationParams {
    /// Defaults tuned per task: creative tasks run warmer, synthesis
    /// runs cooler and shorter.
    pub fn for_task(task: GenerationTask) -> Self {
        let (max_tokens, temperature) = match task {
            GenerationTask::QuestionGeneration => (4000, 0.7),
            GenerationTask::RoleAnalysis => (1024, 0.3),
            GenerationTask::SpecificationSynthesis(_) => (1024, 0.3),
            GenerationTask::ScreenRendering => (8000, 0.7),
            GenerationTask::ImageMockup => (0, 0.0),
        };
        let style = match task {
            GenerationTask::ImageMockup => Some(DEFAULT_IMAGE_STYLE.to_string()),
            _ => None,
        };
        Self {
            max_tokens,
            temperature,
            style,
            image_width: 1024,
            image_height: 768,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::task::SynthesisFacet;

    #[test]
    fn test_defaults_per_task() {
        let questions = GenerationParams::for_task(GenerationTask::QuestionGeneration);
        assert_eq!(questions.max_tokens, 4000);
        assert!(questions.style.is_none());

        let synthesis = GenerationParams::for_task(GenerationTask::SpecificationSynthesis(
            SynthesisFacet::DataModel,
        ));
        assert_eq!(synthesis.max_tokens, 1024);
        assert!(synthesis.temperature < questions.temperature);

        let image = GenerationParams::for_task(GenerationTask::ImageMockup);
        assert_eq!(image.style.as_deref(), Some(DEFAULT_IMAGE_STYLE));
    }

    #[test]
    fn test_builder_overrides() {
        let params = GenerationParams::for_task(GenerationTask::ImageMockup)
            .with_style("dark mode")
            .with_max_tokens(10);
        assert_eq!(params.style.as_deref(), Some("dark mode"));
        assert_eq!(params.max_tokens, 10);
    }
}
