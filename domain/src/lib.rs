//! Domain layer for tux
//!
//! This crate contains the artifact records, the task catalogue and the
//! pure parts of the generation pipeline. It has no dependencies on
//! providers, configuration files or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Generation tasks
//!
//! Every artifact is produced by a [`GenerationTask`]: clarifying
//! questions, role analysis, one facet of the UX specification, a screen
//! layout or an image mockup. Each task declares the payload shape it
//! expects and the schema its reconciled record must satisfy.
//!
//! ## Extraction and reconciliation
//!
//! - **Extraction** locates a JSON payload, an HTML document or an image
//!   reference inside a raw completion, tolerating prose, code fences and
//!   truncation.
//! - **Reconciliation** turns whatever was found (or nothing) into a
//!   schema-complete [`ReconciledResult`], filling gaps from the local
//!   generators.
//!
//! ## Local generation
//!
//! The [`local`] module produces a complete artifact for every task from a
//! [`ContextHint`] alone. It is the last rung of the fallback ladder and
//! the source of per-field defaults.

pub mod artifacts;
pub mod config;
pub mod context;
pub mod core;
pub mod extraction;
pub mod generation;
pub mod local;
pub mod prompt;
pub mod reconcile;
pub mod schema;

// Re-export commonly used types
pub use artifacts::{
    ComponentLibrary, DataModel, ImageMockup, InteractionPatterns, Question, QuestionOption,
    QuestionSet, QuestionType, ReconciledResult, ResponsiveRules, RoleInsights, ScreenLayout,
    ScreenSet, ScreenSpec, SeoRules, SpecFragment, SpecificationBuilder, UxSpecification,
};
pub use config::{ConfigIssue, ConfigIssueCode, GenerationMode, OutputFormat, Severity};
pub use context::{ContextHint, PromptContext, Requirements};
pub use core::{
    app_idea::AppIdea,
    category::AppCategory,
    error::DomainError,
    step::PipelineStep,
    task::{ExpectedShape, GenerationTask, SynthesisFacet, TaskKind},
};
pub use extraction::{ExtractedPayload, extract, extract_text};
pub use generation::{
    AttemptOutcome, DEFAULT_IMAGE_STYLE, FailureKind, GenerationParams, ProviderAttempt,
    RawCompletion, Rung,
};
pub use local::LOCAL_GENERATION_METHOD;
pub use prompt::{PromptTemplate, RenderedPrompt};
pub use reconcile::{Reconciliation, reconcile, reconcile_with_report};
