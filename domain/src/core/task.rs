//! Generation tasks
//!
//! A [`GenerationTask`] names one unit of work the fallback ladder can run:
//! it decides which providers are eligible, which prompt is rendered, what
//! shape the extractor looks for and which schema the reconciler fills.

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One facet of the UX specification, synthesized independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisFacet {
    Screens,
    DataModel,
    InteractionPatterns,
    ResponsiveRules,
    SeoRules,
    ComponentLibrary,
}

impl SynthesisFacet {
    /// All facets in merge order
    pub const ALL: [SynthesisFacet; 6] = [
        SynthesisFacet::Screens,
        SynthesisFacet::DataModel,
        SynthesisFacet::InteractionPatterns,
        SynthesisFacet::ResponsiveRules,
        SynthesisFacet::SeoRules,
        SynthesisFacet::ComponentLibrary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisFacet::Screens => "screens",
            SynthesisFacet::DataModel => "data_model",
            SynthesisFacet::InteractionPatterns => "interaction_patterns",
            SynthesisFacet::ResponsiveRules => "responsive_rules",
            SynthesisFacet::SeoRules => "seo_rules",
            SynthesisFacet::ComponentLibrary => "component_library",
        }
    }
}

impl FromStr for SynthesisFacet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SynthesisFacet::ALL
            .into_iter()
            .find(|facet| facet.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| DomainError::UnknownTask(s.to_string()))
    }
}

/// Routing key for a task; facets share one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    QuestionGeneration,
    RoleAnalysis,
    SpecificationSynthesis,
    ScreenRendering,
    ImageMockup,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::QuestionGeneration,
        TaskKind::RoleAnalysis,
        TaskKind::SpecificationSynthesis,
        TaskKind::ScreenRendering,
        TaskKind::ImageMockup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::QuestionGeneration => "question_generation",
            TaskKind::RoleAnalysis => "role_analysis",
            TaskKind::SpecificationSynthesis => "specification_synthesis",
            TaskKind::ScreenRendering => "screen_rendering",
            TaskKind::ImageMockup => "image_mockup",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownTask(s.to_string()))
    }
}

/// Shape the extractor should look for in a raw completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    /// A single JSON object
    Object,
    /// A JSON list of items
    List,
    /// An HTML document
    Markup,
    /// A reference to a generated image
    ImageRef,
}

/// A unit of generation work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationTask {
    QuestionGeneration,
    RoleAnalysis,
    SpecificationSynthesis(SynthesisFacet),
    ScreenRendering,
    ImageMockup,
}

impl GenerationTask {
    /// Every concrete task, including each specification facet
    pub fn all() -> Vec<GenerationTask> {
        let mut tasks = vec![GenerationTask::QuestionGeneration, GenerationTask::RoleAnalysis];
        tasks.extend(
            SynthesisFacet::ALL
                .into_iter()
                .map(GenerationTask::SpecificationSynthesis),
        );
        tasks.push(GenerationTask::ScreenRendering);
        tasks.push(GenerationTask::ImageMockup);
        tasks
    }

    /// Routing key used by the provider registry
    pub fn kind(&self) -> TaskKind {
        match self {
            GenerationTask::QuestionGeneration => TaskKind::QuestionGeneration,
            GenerationTask::RoleAnalysis => TaskKind::RoleAnalysis,
            GenerationTask::SpecificationSynthesis(_) => TaskKind::SpecificationSynthesis,
            GenerationTask::ScreenRendering => TaskKind::ScreenRendering,
            GenerationTask::ImageMockup => TaskKind::ImageMockup,
        }
    }

    pub fn expected_shape(&self) -> ExpectedShape {
        match self {
            GenerationTask::QuestionGeneration => ExpectedShape::List,
            GenerationTask::SpecificationSynthesis(SynthesisFacet::Screens) => ExpectedShape::List,
            GenerationTask::RoleAnalysis | GenerationTask::SpecificationSynthesis(_) => {
                ExpectedShape::Object
            }
            GenerationTask::ScreenRendering => ExpectedShape::Markup,
            GenerationTask::ImageMockup => ExpectedShape::ImageRef,
        }
    }

    /// Whether an unparseable completion must be rejected.
    ///
    /// Screen rendering accepts a bare markup fragment and wraps it; every
    /// other task needs structured output.
    pub fn requires_structure(&self) -> bool {
        !matches!(self, GenerationTask::ScreenRendering)
    }

    /// Stable label, e.g. `specification_synthesis/data_model`
    pub fn label(&self) -> String {
        match self {
            GenerationTask::SpecificationSynthesis(facet) => {
                format!("{}/{}", self.kind().as_str(), facet.as_str())
            }
            _ => self.kind().as_str().to_string(),
        }
    }
}

impl std::fmt::Display for GenerationTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for GenerationTask {
    type Err = DomainError;

    /// Parse a task label. A bare `specification_synthesis` selects the
    /// screens facet.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, facet) = match s.split_once(['/', ':']) {
            Some((kind, facet)) => (kind, Some(facet)),
            None => (s, None),
        };
        let kind: TaskKind = kind.parse()?;
        match (kind, facet) {
            (TaskKind::SpecificationSynthesis, Some(facet)) => Ok(
                GenerationTask::SpecificationSynthesis(facet.parse()?),
            ),
            (TaskKind::SpecificationSynthesis, None) => {
                Ok(GenerationTask::SpecificationSynthesis(SynthesisFacet::Screens))
            }
            (_, Some(_)) => Err(DomainError::UnknownTask(s.to_string())),
            (TaskKind::QuestionGeneration, None) => Ok(GenerationTask::QuestionGeneration),
            (TaskKind::RoleAnalysis, None) => Ok(GenerationTask::RoleAnalysis),
            (TaskKind::ScreenRendering, None) => Ok(GenerationTask::ScreenRendering),
            (TaskKind::ImageMockup, None) => Ok(GenerationTask::ImageMockup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tasks_cover_every_facet() {
        let all = GenerationTask::all();
        assert_eq!(all.len(), 4 + SynthesisFacet::ALL.len());
        for facet in SynthesisFacet::ALL {
            assert!(all.contains(&GenerationTask::SpecificationSynthesis(facet)));
        }
    }

    #[test]
    fn test_facets_share_routing_key() {
        assert_eq!(
            GenerationTask::SpecificationSynthesis(SynthesisFacet::DataModel).kind(),
            TaskKind::SpecificationSynthesis
        );
        assert_eq!(
            GenerationTask::SpecificationSynthesis(SynthesisFacet::SeoRules).kind(),
            TaskKind::SpecificationSynthesis
        );
    }

    #[test]
    fn test_expected_shapes() {
        assert_eq!(
            GenerationTask::QuestionGeneration.expected_shape(),
            ExpectedShape::List
        );
        assert_eq!(GenerationTask::RoleAnalysis.expected_shape(), ExpectedShape::Object);
        assert_eq!(
            GenerationTask::SpecificationSynthesis(SynthesisFacet::Screens).expected_shape(),
            ExpectedShape::List
        );
        assert_eq!(
            GenerationTask::ScreenRendering.expected_shape(),
            ExpectedShape::Markup
        );
        assert_eq!(
            GenerationTask::ImageMockup.expected_shape(),
            ExpectedShape::ImageRef
        );
    }

    #[test]
    fn test_only_screen_rendering_tolerates_fragments() {
        for task in GenerationTask::all() {
            assert_eq!(
                task.requires_structure(),
                task != GenerationTask::ScreenRendering,
                "{task}"
            );
        }
    }

    #[test]
    fn test_label_round_trip() {
        for task in GenerationTask::all() {
            let parsed: GenerationTask = task.label().parse().unwrap();
            assert_eq!(parsed, task);
        }
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(
            "specification_synthesis".parse::<GenerationTask>().unwrap(),
            GenerationTask::SpecificationSynthesis(SynthesisFacet::Screens)
        );
        assert_eq!(
            "specification_synthesis:seo_rules"
                .parse::<GenerationTask>()
                .unwrap(),
            GenerationTask::SpecificationSynthesis(SynthesisFacet::SeoRules)
        );
        assert!("role_analysis/screens".parse::<GenerationTask>().is_err());
        assert!("translate".parse::<GenerationTask>().is_err());
    }
}
