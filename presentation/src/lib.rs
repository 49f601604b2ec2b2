//! Presentation layer for tux
//!
//! This crate contains CLI definitions, output formatters,
//! artifact file writers, and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::{ConsoleFormatter, UsageLine};
pub use output::files::ArtifactWriter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
