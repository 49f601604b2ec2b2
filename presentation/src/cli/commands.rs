//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;
use tux_domain::{GenerationMode, GenerationTask, OutputFormat};

/// CLI arguments for tux
#[derive(Parser, Debug)]
#[command(name = "tux")]
#[command(author, version, about = "Turn an app idea into UX artifacts, with provider fallback")]
#[command(long_about = r#"
tux turns a one-line app idea into clarifying questions, a role analysis,
a UX specification, per-screen HTML layouts and image mockups.

Every task runs on a fallback ladder: the primary provider, then the
secondary provider, then a local template generator. A run always
produces complete artifacts, even with no providers configured.

Configuration files are loaded from (in priority order):
1. TUX_* environment variables
2. --config <path>     Explicit config file
3. ./tux.toml          Project-level config
4. ~/.config/tux/config.toml   Global config

Example:
  tux "A marketplace connecting pet owners with trusted pet sitters"
  tux --answer platform=mobile --mode hybrid --out-dir mockups "Recipe sharing app"
  tux --task role_analysis "Booking app for hair salons"
  tux --task specification_synthesis/data_model --offline "Team task tracker"
"#)]
pub struct Cli {
    /// The app idea (10 to 1000 characters)
    pub idea: Option<String>,

    /// Answer to a clarifying question, as `id=value` (can be repeated)
    #[arg(short, long, value_name = "ID=VALUE", value_parser = parse_answer)]
    pub answer: Vec<(String, String)>,

    /// Run a single task instead of the full pipeline
    /// (e.g. `role_analysis`, `specification_synthesis/seo_rules`)
    #[arg(short, long, value_name = "TASK")]
    pub task: Option<GenerationTask>,

    /// Screen name for single screen_rendering / image_mockup tasks
    #[arg(long, value_name = "NAME")]
    pub screen: Option<String>,

    /// What to produce per screen: html, image or hybrid
    #[arg(long, value_name = "MODE")]
    pub mode: Option<GenerationMode>,

    /// Visual style for image mockups
    #[arg(long, value_name = "STYLE")]
    pub style: Option<String>,

    /// Output format: full, summary or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Write screen layouts and mockups to this directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Use no providers; every task is generated locally
    #[arg(long)]
    pub offline: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_answer(raw: &str) -> Result<(String, String), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", raw))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing question id in '{}'", raw));
    }
    Ok((id.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "tux",
            "--answer",
            "platform=mobile",
            "-a",
            "pricing = subscription",
            "--mode",
            "hybrid",
            "-o",
            "json",
            "-vv",
            "A marketplace for pet sitters",
        ])
        .unwrap();
        assert_eq!(cli.idea.as_deref(), Some("A marketplace for pet sitters"));
        assert_eq!(
            cli.answer,
            vec![
                ("platform".to_string(), "mobile".to_string()),
                ("pricing".to_string(), "subscription".to_string()),
            ]
        );
        assert_eq!(cli.mode, Some(GenerationMode::Hybrid));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(cli.task.is_none());
    }

    #[test]
    fn test_parse_single_task() {
        let cli = Cli::try_parse_from([
            "tux",
            "--task",
            "specification_synthesis/data_model",
            "--offline",
            "Team task tracker app",
        ])
        .unwrap();
        assert!(matches!(
            cli.task,
            Some(GenerationTask::SpecificationSynthesis(_))
        ));
        assert!(cli.offline);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["tux", "--answer", "no-equals", "idea"]).is_err());
        assert!(Cli::try_parse_from(["tux", "--answer", "=x", "idea"]).is_err());
        assert!(Cli::try_parse_from(["tux", "--mode", "video", "idea"]).is_err());
        assert!(Cli::try_parse_from(["tux", "--task", "deploy", "idea"]).is_err());
    }
}
