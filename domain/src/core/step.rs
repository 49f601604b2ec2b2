//! Pipeline steps

use serde::{Deserialize, Serialize};

/// The sequential steps of a full generation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    Questions,
    RoleAnalysis,
    Specification,
    ScreenRendering,
    Mockups,
}

impl PipelineStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStep::Questions => "questions",
            PipelineStep::RoleAnalysis => "role_analysis",
            PipelineStep::Specification => "specification",
            PipelineStep::ScreenRendering => "screen_rendering",
            PipelineStep::Mockups => "mockups",
        }
    }

    /// Human-readable label for progress output
    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineStep::Questions => "Clarifying questions",
            PipelineStep::RoleAnalysis => "Role analysis",
            PipelineStep::Specification => "UX specification",
            PipelineStep::ScreenRendering => "Screen layouts",
            PipelineStep::Mockups => "Image mockups",
        }
    }
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
