//! Pipeline parameters: what the orchestrator produces and how long each
//! step may take.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tux_domain::{DEFAULT_IMAGE_STYLE, GenerationMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Layouts, image mockups or both, per screen.
    pub generation_mode: GenerationMode,
    /// Visual style for image mockups.
    pub image_style: String,
    /// Deadline for each pipeline step. When it passes, unfinished tasks of
    /// the step abandon their provider rungs and generate locally.
    pub step_timeout: Option<Duration>,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            generation_mode: GenerationMode::default(),
            image_style: DEFAULT_IMAGE_STYLE.to_string(),
            step_timeout: None,
        }
    }
}

impl PipelineParams {
    pub fn with_generation_mode(mut self, mode: GenerationMode) -> Self {
        self.generation_mode = mode;
        self
    }

    pub fn with_image_style(mut self, style: impl Into<String>) -> Self {
        self.image_style = style.into();
        self
    }

    pub fn with_step_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.step_timeout = timeout;
        self
    }
}
