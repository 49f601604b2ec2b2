//! Artifact records produced by the pipeline.
//!
//! Each record mirrors one task schema in [`crate::schema`]: the serialized
//! field names are the schema field names.

pub mod insights;
pub mod questions;
pub mod result;
pub mod screen;
pub mod specification;

pub use insights::RoleInsights;
pub use questions::{Question, QuestionOption, QuestionSet, QuestionType};
pub use result::ReconciledResult;
pub use screen::{ImageMockup, SVG_DATA_URI_PREFIX, ScreenLayout};
pub use specification::{
    ApiEndpoint, ComponentLibrary, DataModel, Entity, EntityAttribute, InteractionPatterns,
    Library, NestedTextMap, ResponsiveRules, ScreenSet, ScreenSpec, SeoRules, SpecFragment,
    SpecificationBuilder, UxSpecification,
};
