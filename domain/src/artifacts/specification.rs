//! UX specification records
//!
//! The specification is synthesized one facet at a time. Each facet is its
//! own record so that a provider failure on one facet never costs the
//! others; [`SpecificationBuilder`] merges the fragments back together.

use crate::context::ContextHint;
use crate::core::task::SynthesisFacet;
use crate::local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Nested string map, e.g. `{"navigation": {"mobile": "bottom tabs"}}`
pub type NestedTextMap = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSpec {
    pub id: String,
    pub name: String,
    pub description: String,
    pub elements: Vec<String>,
    pub user_flow: String,
    pub interactions: Vec<String>,
    pub layout_type: String,
}

impl ScreenSpec {
    /// A bare screen reference with only a name; other fields empty
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: crate::core::string::slugify(&name),
            name,
            description: String::new(),
            elements: Vec::new(),
            user_flow: String::new(),
            interactions: Vec::new(),
            layout_type: "responsive".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSet {
    pub screens: Vec<ScreenSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub attributes: Vec<EntityAttribute>,
    pub relationships: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    pub method: String,
    pub path: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    pub entities: Vec<Entity>,
    pub relationships: Vec<String>,
    pub api_endpoints: Vec<ApiEndpoint>,
    pub validation_rules: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionPatterns {
    pub global_patterns: NestedTextMap,
    pub transitions: BTreeMap<String, String>,
    pub micro_interactions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveRules {
    pub breakpoints: BTreeMap<String, String>,
    pub layout_rules: NestedTextMap,
    pub typography: NestedTextMap,
    pub touch_targets: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoRules {
    pub seo: Map<String, Value>,
    pub performance: Map<String, Value>,
    pub image_optimization: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    pub reason: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentLibrary {
    pub primary_library: Library,
    pub alternative_libraries: Vec<Library>,
    pub component_mapping: Map<String, Value>,
    pub custom_components: Vec<String>,
}

/// One synthesized facet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "facet", content = "value", rename_all = "snake_case")]
pub enum SpecFragment {
    Screens(ScreenSet),
    DataModel(DataModel),
    InteractionPatterns(InteractionPatterns),
    ResponsiveRules(ResponsiveRules),
    SeoRules(SeoRules),
    ComponentLibrary(ComponentLibrary),
}

impl SpecFragment {
    pub fn facet(&self) -> SynthesisFacet {
        match self {
            SpecFragment::Screens(_) => SynthesisFacet::Screens,
            SpecFragment::DataModel(_) => SynthesisFacet::DataModel,
            SpecFragment::InteractionPatterns(_) => SynthesisFacet::InteractionPatterns,
            SpecFragment::ResponsiveRules(_) => SynthesisFacet::ResponsiveRules,
            SpecFragment::SeoRules(_) => SynthesisFacet::SeoRules,
            SpecFragment::ComponentLibrary(_) => SynthesisFacet::ComponentLibrary,
        }
    }
}

/// The complete UX specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UxSpecification {
    pub screens: Vec<ScreenSpec>,
    pub data_model: DataModel,
    pub interaction_patterns: InteractionPatterns,
    pub responsive_rules: ResponsiveRules,
    pub seo_rules: SeoRules,
    pub component_library: ComponentLibrary,
}

/// Merges facet fragments by key union.
///
/// A facet that is already present is never overwritten; a later fragment
/// for the same facet is ignored.
#[derive(Debug, Clone, Default)]
pub struct SpecificationBuilder {
    screens: Option<Vec<ScreenSpec>>,
    data_model: Option<DataModel>,
    interaction_patterns: Option<InteractionPatterns>,
    responsive_rules: Option<ResponsiveRules>,
    seo_rules: Option<SeoRules>,
    component_library: Option<ComponentLibrary>,
}

impl SpecificationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fragment; returns `false` if the facet was already set.
    pub fn merge(&mut self, fragment: SpecFragment) -> bool {
        fn set<T>(slot: &mut Option<T>, value: T) -> bool {
            if slot.is_some() {
                return false;
            }
            *slot = Some(value);
            true
        }

        match fragment {
            SpecFragment::Screens(screen_set) => set(&mut self.screens, screen_set.screens),
            SpecFragment::DataModel(v) => set(&mut self.data_model, v),
            SpecFragment::InteractionPatterns(v) => set(&mut self.interaction_patterns, v),
            SpecFragment::ResponsiveRules(v) => set(&mut self.responsive_rules, v),
            SpecFragment::SeoRules(v) => set(&mut self.seo_rules, v),
            SpecFragment::ComponentLibrary(v) => set(&mut self.component_library, v),
        }
    }

    /// Facets not merged yet
    pub fn missing(&self) -> Vec<SynthesisFacet> {
        let present = [
            self.screens.is_some(),
            self.data_model.is_some(),
            self.interaction_patterns.is_some(),
            self.responsive_rules.is_some(),
            self.seo_rules.is_some(),
            self.component_library.is_some(),
        ];
        SynthesisFacet::ALL
            .into_iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(facet, _)| facet)
            .collect()
    }

    /// Finish the specification, filling missing facets from local defaults
    pub fn build(self, hint: &ContextHint) -> UxSpecification {
        UxSpecification {
            screens: self
                .screens
                .unwrap_or_else(|| local::specification::default_screens(hint).screens),
            data_model: self
                .data_model
                .unwrap_or_else(|| local::specification::default_data_model(hint)),
            interaction_patterns: self
                .interaction_patterns
                .unwrap_or_else(|| local::specification::default_interaction_patterns(hint)),
            responsive_rules: self
                .responsive_rules
                .unwrap_or_else(local::specification::default_responsive_rules),
            seo_rules: self
                .seo_rules
                .unwrap_or_else(|| local::specification::default_seo_rules(hint)),
            component_library: self
                .component_library
                .unwrap_or_else(|| local::specification::default_component_library(hint)),
        }
    }
}
