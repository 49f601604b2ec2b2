//! Generation value objects shared by providers and the fallback ladder.

pub mod attempt;
pub mod completion;
pub mod params;

pub use attempt::{AttemptOutcome, FailureKind, ProviderAttempt, Rung};
pub use completion::RawCompletion;
pub use params::{DEFAULT_IMAGE_STYLE, GenerationParams};
