//! Task schemas
//!
//! Each task has a fixed schema: the field names its reconciled record
//! must carry, the kind of value each field holds, and the alternative
//! keys providers are known to use for it. The reconciler is driven
//! entirely by these tables.

mod tables;

pub use tables::*;

use crate::core::string::normalize_key;
use crate::core::task::{GenerationTask, SynthesisFacet};

/// Value kind of a schema field, with the coercions the reconciler applies
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Non-empty string; numbers and booleans are stringified
    Text,
    /// String or null
    OptionalText,
    /// Boolean; "yes"/"true"/"1" style strings are accepted
    Bool,
    /// List of strings; a single string becomes a one-element list
    TextList,
    /// Flat string map
    TextMap,
    /// Two-level string map
    NestedTextMap,
    /// Any non-empty JSON object
    JsonObject,
    /// Closed set of values with synonym table `(synonym, canonical)`
    Choice(&'static [(&'static str, &'static str)]),
    /// Complete HTML document; fragments are wrapped in a document shell
    Document,
    /// Nested record
    Record(&'static Schema),
    /// List of nested records
    Records(&'static Schema),
}

/// One field of a schema
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Alternative keys accepted for this field
    pub aliases: &'static [&'static str],
    /// Items of a record list are dropped when their core field is missing
    pub core: bool,
}

impl FieldSpec {
    pub const fn new(
        name: &'static str,
        kind: FieldKind,
        aliases: &'static [&'static str],
        core: bool,
    ) -> Self {
        Self {
            name,
            kind,
            aliases,
            core,
        }
    }

    /// Whether a payload key refers to this field.
    ///
    /// Keys are compared after normalization, so `helpText` matches
    /// `help_text`.
    pub fn matches_key(&self, key: &str) -> bool {
        let key = normalize_key(key);
        normalize_key(self.name) == key || self.aliases.iter().any(|a| normalize_key(a) == key)
    }
}

/// A named, ordered set of fields
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The field a bare list payload belongs to, for list-shaped tasks
    pub fn list_field(&self) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| matches!(f.kind, FieldKind::Records(_)))
    }

    pub fn core_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.core)
    }
}

/// The schema a task's reconciled record must satisfy
pub fn schema_for(task: GenerationTask) -> &'static Schema {
    match task {
        GenerationTask::QuestionGeneration => &QUESTION_SET_SCHEMA,
        GenerationTask::RoleAnalysis => &ROLE_INSIGHTS_SCHEMA,
        GenerationTask::SpecificationSynthesis(facet) => match facet {
            SynthesisFacet::Screens => &SCREEN_SET_SCHEMA,
            SynthesisFacet::DataModel => &DATA_MODEL_SCHEMA,
            SynthesisFacet::InteractionPatterns => &INTERACTION_PATTERNS_SCHEMA,
            SynthesisFacet::ResponsiveRules => &RESPONSIVE_RULES_SCHEMA,
            SynthesisFacet::SeoRules => &SEO_RULES_SCHEMA,
            SynthesisFacet::ComponentLibrary => &COMPONENT_LIBRARY_SCHEMA,
        },
        GenerationTask::ScreenRendering => &SCREEN_LAYOUT_SCHEMA,
        GenerationTask::ImageMockup => &IMAGE_MOCKUP_SCHEMA,
    }
}
