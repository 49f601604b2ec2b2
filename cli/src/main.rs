//! CLI entrypoint for tux
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tux_application::{
    FallbackLadder, GenerationOrchestrator, MeteringSink, NoProgress, PipelineProgressNotifier,
    ProviderRegistry, RunPipelineInput, RunTaskInput, RunTaskUseCase,
};
use tux_domain::{OutputFormat, ScreenSpec};
use tux_infrastructure::{
    ConfigLoader, CostTracker, FanoutMetering, FileConfig, JsonlMeteringSink, UsageSummary,
    build_registry,
};
use tux_presentation::{
    ArtifactWriter, Cli, ConsoleFormatter, ProgressReporter, SimpleProgress, UsageLine,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let _log_guard = match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let (file_writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(level))
                .with_target(false)
                .with_writer(std::io::stderr.and(file_writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(level))
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting tux");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!("{e}"))?
    };
    for issue in config.check()? {
        eprintln!("{}", issue);
    }
    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(idea) = cli.idea.clone() else {
        bail!("An app idea is required, e.g. tux \"A marketplace for pet sitters\"");
    };

    // === Dependency Injection ===
    let registry = if cli.offline {
        ProviderRegistry::offline()
    } else {
        build_registry(&config.providers)
    };
    if registry.is_empty() {
        info!("No providers available; every task will be generated locally");
    }

    let tracker = Arc::new(CostTracker::new(config.metering.rates.clone()));
    let metering = build_metering(&config, tracker.clone());

    let (ladder_params, _) = config.pipeline.to_ladder_params();
    let ladder = Arc::new(
        FallbackLadder::new(Arc::new(registry), ladder_params).with_metering(metering),
    );

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; finishing remaining tasks locally");
                cancel.cancel();
            }
        });
    }

    let format = cli
        .output
        .or(config.output.parse_format().0)
        .unwrap_or_default();

    // Single task mode
    if let Some(task) = cli.task {
        let mut input = RunTaskInput::new(idea, task);
        if let Some(screen) = &cli.screen {
            input = input.with_screen(ScreenSpec::named(screen.clone()));
        }
        if let Some(style) = &cli.style {
            input = input.with_style(style.clone());
        }
        let outcome = RunTaskUseCase::new(ladder)
            .with_cancellation(cancel)
            .execute(input)
            .await?;
        let output = match format {
            OutputFormat::Json => ConsoleFormatter::format_task_json(&outcome),
            OutputFormat::Full | OutputFormat::Summary => ConsoleFormatter::format_task(&outcome),
        };
        println!("{}", output);
        print_usage(&cli, format, &tracker.summary());
        return Ok(());
    }

    // Full pipeline
    let (mut params, _) = config.pipeline.to_pipeline_params();
    if let Some(mode) = cli.mode {
        params = params.with_generation_mode(mode);
    }
    if let Some(style) = &cli.style {
        params = params.with_image_style(style.clone());
    }

    let answers: BTreeMap<String, String> = cli.answer.iter().cloned().collect();
    let input = RunPipelineInput::new(idea).with_answers(answers);
    let orchestrator = GenerationOrchestrator::new(ladder, params).with_cancellation(cancel);

    // SimpleProgress prints to stdout, so it is only used for text output
    let progress: Box<dyn PipelineProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.verbose > 0 && format != OutputFormat::Json {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let result = orchestrator
        .execute_with_progress(input, progress.as_ref())
        .await?;

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };
    println!("{}", output);

    let out_dir = cli
        .out_dir
        .clone()
        .or_else(|| config.output.out_dir.clone().map(Into::into));
    if let Some(dir) = out_dir {
        let writer = ArtifactWriter::new(dir);
        let written = writer
            .write_result(&result)
            .with_context(|| format!("cannot write artifacts to {}", writer.out_dir().display()))?;
        if format != OutputFormat::Json {
            println!(
                "Wrote {} files to {}",
                written.len(),
                writer.out_dir().display()
            );
        }
    }

    print_usage(&cli, format, &tracker.summary());

    Ok(())
}

/// Cost tracker always; JSONL file when enabled
fn build_metering(config: &FileConfig, tracker: Arc<CostTracker>) -> Arc<dyn MeteringSink> {
    let mut fanout = FanoutMetering::new().with_sink(tracker);
    if config.metering.enabled {
        let path = config.metering.resolved_path();
        if let Some(sink) = JsonlMeteringSink::new(&path) {
            info!(path = %path.display(), "Metering to JSONL");
            fanout = fanout.with_sink(Arc::new(sink.with_rates(config.metering.rates.clone())));
        }
    }
    Arc::new(fanout)
}

fn print_usage(cli: &Cli, format: OutputFormat, summary: &UsageSummary) {
    if cli.quiet || format == OutputFormat::Json || summary.is_empty() {
        return;
    }
    let lines: Vec<UsageLine> = summary
        .by_provider
        .iter()
        .map(|(provider_id, totals)| UsageLine {
            provider_id: provider_id.clone(),
            attempts: totals.attempts,
            successes: totals.successes,
            units: totals.units,
            cost: totals.cost,
        })
        .collect();
    print!("{}", ConsoleFormatter::format_usage(&lines));
}
