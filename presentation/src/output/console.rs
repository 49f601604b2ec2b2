//! Console output formatter for pipeline results

use colored::Colorize;
use serde::Serialize;
use tux_application::{PipelineResult, TaskOutcome, TaskReport};
use tux_domain::{PipelineStep, Rung};

/// One row of the end-of-run usage table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageLine {
    pub provider_id: String,
    pub attempts: u32,
    pub successes: u32,
    pub units: u64,
    pub cost: f64,
}

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete pipeline result
    pub fn format(result: &PipelineResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("tux UX Artifacts"));
        output.push('\n');
        output.push_str(&Self::idea_block(result));

        // Questions
        output.push_str(&Self::section_header(PipelineStep::Questions.display_name()));
        for question in &result.questions.questions {
            let required = if question.required { "*" } else { " " };
            output.push_str(&format!(
                "{} {} {}\n",
                required.red(),
                question.question,
                format!("[{}]", question.kind.as_str()).dimmed()
            ));
            for option in &question.options {
                output.push_str(&format!("     - {}\n", option.label));
            }
        }

        // Requirements
        if !result.requirements.answers.is_empty() {
            output.push_str(&format!("\n{}\n", "Answers:".cyan().bold()));
            for (id, answer) in &result.requirements.answers {
                output.push_str(&format!("  {}: {}\n", id.dimmed(), answer));
            }
        }

        // Role analysis
        output.push_str(&Self::section_header(PipelineStep::RoleAnalysis.display_name()));
        for (role, text) in [
            ("UX Designer", &result.insights.designer),
            ("Business Analyst", &result.insights.analyst),
            ("Solution Architect", &result.insights.architect),
        ] {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", role).yellow().bold(),
                text
            ));
        }

        // Specification
        let spec = &result.specification;
        output.push_str(&Self::section_header(PipelineStep::Specification.display_name()));
        output.push_str(&format!("\n{}\n", "Screens:".cyan().bold()));
        for screen in &spec.screens {
            output.push_str(&format!(
                "  * {} {}\n",
                screen.name.bold(),
                format!("({})", screen.layout_type).dimmed()
            ));
            if !screen.description.is_empty() {
                output.push_str(&format!("{}\n", Self::indent(&screen.description, "      ")));
            }
        }
        output.push_str(&format!("\n{}\n", "Data model:".cyan().bold()));
        for entity in &spec.data_model.entities {
            let attributes: Vec<&str> =
                entity.attributes.iter().map(|a| a.name.as_str()).collect();
            output.push_str(&format!("  * {} ({})\n", entity.name.bold(), attributes.join(", ")));
        }
        for endpoint in &spec.data_model.api_endpoints {
            output.push_str(&format!("    {} {}\n", endpoint.method.green(), endpoint.path));
        }
        output.push_str(&format!(
            "\n{} {} {}\n",
            "Component library:".cyan().bold(),
            spec.component_library.primary_library.name,
            format!("({})", spec.component_library.primary_library.reason).dimmed()
        ));

        // Screens
        if !result.layouts.is_empty() {
            output.push_str(&Self::section_header(PipelineStep::ScreenRendering.display_name()));
            for layout in &result.layouts {
                output.push_str(&format!(
                    "  * {} {} {}\n",
                    layout.screen_name,
                    format!("{} bytes", layout.html_layout.len()).dimmed(),
                    Self::method_tag(&layout.generation_method)
                ));
            }
        }
        if !result.mockups.is_empty() {
            output.push_str(&Self::section_header(PipelineStep::Mockups.display_name()));
            for mockup in &result.mockups {
                let source = if mockup.inline_svg().is_some() {
                    "inline svg".to_string()
                } else {
                    mockup.image_source.clone()
                };
                output.push_str(&format!(
                    "  * {} {} {}\n",
                    mockup.screen_name,
                    source.dimmed(),
                    Self::method_tag(&mockup.generation_method)
                ));
            }
        }

        // Provenance
        output.push_str(&Self::section_header("Task Provenance"));
        for report in &result.reports {
            output.push_str(&Self::report_line(report));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &PipelineResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a concise summary
    pub fn format_summary(result: &PipelineResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== tux Summary ===".cyan().bold()));
        output.push_str(&Self::idea_block(result));

        let spec = &result.specification;
        output.push_str(&format!(
            "{} {} questions, {} screens, {} entities, {} layouts, {} mockups\n",
            "Produced:".bold(),
            result.questions.len(),
            spec.screens.len(),
            spec.data_model.entities.len(),
            result.layouts.len(),
            result.mockups.len()
        ));

        let fallbacks = result.fallback_count();
        let total = result.reports.len();
        let line = format!("{}/{} tasks used local fallback", fallbacks, total);
        if fallbacks == 0 {
            output.push_str(&format!("{} {}\n", "Providers:".bold(), line.green()));
        } else {
            output.push_str(&format!("{} {}\n", "Providers:".bold(), line.yellow()));
        }

        output
    }

    /// Format the outcome of a single task run
    pub fn format_task(outcome: &TaskOutcome) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {} {}\n",
            "Task:".cyan().bold(),
            outcome.task.label(),
            Self::rung_tag(outcome.rung, &outcome.provider_id)
        ));
        let defaulted = outcome.defaulted_fields();
        if !defaulted.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Defaulted:".yellow(),
                defaulted.join(", ")
            ));
        }
        output.push('\n');
        output.push_str(
            &serde_json::to_string_pretty(&outcome.result.payload())
                .unwrap_or_else(|_| "{}".to_string()),
        );
        output.push('\n');
        output
    }

    /// Format a single task outcome as JSON
    pub fn format_task_json(outcome: &TaskOutcome) -> String {
        let value = serde_json::json!({
            "task": outcome.task.label(),
            "rung": outcome.rung,
            "provider_id": outcome.provider_id,
            "attempts": outcome.attempts,
            "result": outcome.result.payload(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the usage table
    pub fn format_usage(lines: &[UsageLine]) -> String {
        if lines.is_empty() {
            return String::new();
        }
        let mut output = format!("\n{}\n", "Usage:".cyan().bold());
        for line in lines {
            output.push_str(&format!(
                "  {:<12} {:>3}/{:<3} ok  {:>8} units  ${:.4}\n",
                line.provider_id, line.successes, line.attempts, line.units, line.cost
            ));
        }
        output
    }

    fn idea_block(result: &PipelineResult) -> String {
        format!(
            "{} {}\n{} {}  {} {}\n\n",
            "Idea:".cyan().bold(),
            result.app_idea,
            "Category:".cyan().bold(),
            result.category,
            "Mode:".cyan().bold(),
            result.generation_mode
        )
    }

    fn report_line(report: &TaskReport) -> String {
        let failures: Vec<String> = report
            .attempts
            .iter()
            .filter_map(|a| a.outcome.failure().map(|k| format!("{}: {}", a.provider_id, k)))
            .collect();
        let mut line = format!(
            "  {:<18} {:<40} {}",
            report.step.as_str(),
            report.task,
            Self::rung_tag(report.rung, &report.provider_id)
        );
        if !failures.is_empty() {
            line.push_str(&format!(" {}", format!("({})", failures.join(", ")).dimmed()));
        }
        line.push('\n');
        line
    }

    fn rung_tag(rung: Rung, provider_id: &str) -> String {
        let tag = format!("[{} {}]", rung.as_str(), provider_id);
        match rung {
            Rung::Primary => tag.green().to_string(),
            Rung::Secondary => tag.yellow().to_string(),
            Rung::Local => tag.magenta().to_string(),
        }
    }

    fn method_tag(method: &str) -> String {
        format!("[{}]", method).dimmed().to_string()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tux_application::{
        FallbackLadder, GenerationOrchestrator, PipelineParams, RunPipelineInput,
    };
    use tux_domain::GenerationMode;

    async fn offline_result(mode: GenerationMode) -> PipelineResult {
        colored::control::set_override(false);
        GenerationOrchestrator::new(
            Arc::new(FallbackLadder::offline()),
            PipelineParams::default().with_generation_mode(mode),
        )
        .execute(
            RunPipelineInput::new("A marketplace connecting pet owners with trusted pet sitters")
                .with_answer("platform", "mobile"),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_full_format_lists_every_section() {
        let result = offline_result(GenerationMode::Hybrid).await;
        let output = ConsoleFormatter::format(&result);
        for title in [
            "Clarifying questions",
            "Role analysis",
            "UX specification",
            "Screen layouts",
            "Image mockups",
            "Task Provenance",
        ] {
            assert!(output.contains(title), "missing section {title}");
        }
        assert!(output.contains("platform: mobile"));
        assert!(output.contains("inline svg"));
        assert!(output.contains("[local local_template]"));
    }

    #[tokio::test]
    async fn test_summary_counts_fallbacks() {
        let result = offline_result(GenerationMode::Html).await;
        let output = ConsoleFormatter::format_summary(&result);
        let total = result.reports.len();
        assert!(output.contains(&format!("{total}/{total} tasks used local fallback")));
        assert!(!output.contains("Image mockups"));
    }

    #[tokio::test]
    async fn test_json_round_trips_as_value() {
        let result = offline_result(GenerationMode::Html).await;
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&result)).unwrap();
        assert_eq!(value["generation_mode"], "html");
        assert!(!value["specification"]["screens"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_usage_table() {
        colored::control::set_override(false);
        assert!(ConsoleFormatter::format_usage(&[]).is_empty());
        let output = ConsoleFormatter::format_usage(&[UsageLine {
            provider_id: "anthropic".to_string(),
            attempts: 4,
            successes: 3,
            units: 5120,
            cost: 0.0041,
        }]);
        assert!(output.contains("anthropic"));
        assert!(output.contains("3/4"));
        assert!(output.contains("$0.0041"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
