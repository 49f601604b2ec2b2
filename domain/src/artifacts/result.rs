//! Reconciled task results

use super::insights::RoleInsights;
use super::questions::QuestionSet;
use super::screen::{ImageMockup, ScreenLayout};
use super::specification::{
    ComponentLibrary, DataModel, InteractionPatterns, ResponsiveRules, ScreenSet, SeoRules,
    SpecFragment,
};
use crate::core::task::{GenerationTask, SynthesisFacet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A schema-complete record for one task
///
/// Every variant has every field of its task's schema populated, whether
/// it came from a provider, from local defaults, or from a mix of both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum ReconciledResult {
    Questions(QuestionSet),
    RoleInsights(RoleInsights),
    Specification(SpecFragment),
    ScreenLayout(ScreenLayout),
    ImageMockup(ImageMockup),
}

impl ReconciledResult {
    /// Deserialize a filled record for `task`
    pub fn from_value(task: GenerationTask, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match task {
            GenerationTask::QuestionGeneration => {
                ReconciledResult::Questions(serde_json::from_value(value)?)
            }
            GenerationTask::RoleAnalysis => {
                ReconciledResult::RoleInsights(serde_json::from_value(value)?)
            }
            GenerationTask::SpecificationSynthesis(facet) => {
                ReconciledResult::Specification(match facet {
                    SynthesisFacet::Screens => {
                        SpecFragment::Screens(serde_json::from_value::<ScreenSet>(value)?)
                    }
                    SynthesisFacet::DataModel => {
                        SpecFragment::DataModel(serde_json::from_value::<DataModel>(value)?)
                    }
                    SynthesisFacet::InteractionPatterns => SpecFragment::InteractionPatterns(
                        serde_json::from_value::<InteractionPatterns>(value)?,
                    ),
                    SynthesisFacet::ResponsiveRules => SpecFragment::ResponsiveRules(
                        serde_json::from_value::<ResponsiveRules>(value)?,
                    ),
                    SynthesisFacet::SeoRules => {
                        SpecFragment::SeoRules(serde_json::from_value::<SeoRules>(value)?)
                    }
                    SynthesisFacet::ComponentLibrary => SpecFragment::ComponentLibrary(
                        serde_json::from_value::<ComponentLibrary>(value)?,
                    ),
                })
            }
            GenerationTask::ScreenRendering => {
                ReconciledResult::ScreenLayout(serde_json::from_value(value)?)
            }
            GenerationTask::ImageMockup => {
                ReconciledResult::ImageMockup(serde_json::from_value(value)?)
            }
        })
    }

    /// The record as a JSON object whose keys are exactly the schema fields
    pub fn payload(&self) -> Value {
        let value = match self {
            ReconciledResult::Questions(v) => serde_json::to_value(v),
            ReconciledResult::RoleInsights(v) => serde_json::to_value(v),
            ReconciledResult::Specification(fragment) => match fragment {
                SpecFragment::Screens(v) => serde_json::to_value(v),
                SpecFragment::DataModel(v) => serde_json::to_value(v),
                SpecFragment::InteractionPatterns(v) => serde_json::to_value(v),
                SpecFragment::ResponsiveRules(v) => serde_json::to_value(v),
                SpecFragment::SeoRules(v) => serde_json::to_value(v),
                SpecFragment::ComponentLibrary(v) => serde_json::to_value(v),
            },
            ReconciledResult::ScreenLayout(v) => serde_json::to_value(v),
            ReconciledResult::ImageMockup(v) => serde_json::to_value(v),
        };
        // Plain data records with string keys always serialize
        value.unwrap_or(Value::Null)
    }

    /// Record which provider produced this result, where the record has a
    /// `generation_method` field.
    pub fn stamp_generation_method(&mut self, method: &str) {
        match self {
            ReconciledResult::ScreenLayout(layout) => {
                layout.generation_method = method.to_string();
            }
            ReconciledResult::ImageMockup(mockup) => {
                mockup.generation_method = method.to_string();
            }
            _ => {}
        }
    }

    pub fn generation_method(&self) -> Option<&str> {
        match self {
            ReconciledResult::ScreenLayout(layout) => Some(&layout.generation_method),
            ReconciledResult::ImageMockup(mockup) => Some(&mockup.generation_method),
            _ => None,
        }
    }

    pub fn into_questions(self) -> Option<QuestionSet> {
        match self {
            ReconciledResult::Questions(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_role_insights(self) -> Option<RoleInsights> {
        match self {
            ReconciledResult::RoleInsights(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_fragment(self) -> Option<SpecFragment> {
        match self {
            ReconciledResult::Specification(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_screen_layout(self) -> Option<ScreenLayout> {
        match self {
            ReconciledResult::ScreenLayout(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_image_mockup(self) -> Option<ImageMockup> {
        match self {
            ReconciledResult::ImageMockup(v) => Some(v),
            _ => None,
        }
    }
}
