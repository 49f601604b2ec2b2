//! Prompt templates for each generation task

use super::RenderedPrompt;
use crate::artifacts::ScreenSpec;
use crate::context::PromptContext;
use crate::core::task::{GenerationTask, SynthesisFacet};

/// How many screen elements are named in an image prompt
const MOCKUP_ELEMENT_LIMIT: usize = 10;

/// Templates for generating prompts at each pipeline step
pub struct PromptTemplate;

impl PromptTemplate {
    /// Render the system and user prompt for a task
    pub fn render(task: GenerationTask, ctx: &PromptContext) -> RenderedPrompt {
        match task {
            GenerationTask::QuestionGeneration => RenderedPrompt::new(
                Self::questions_system(),
                Self::questions_prompt(ctx.app_idea.content()),
            ),
            GenerationTask::RoleAnalysis => {
                RenderedPrompt::new(Self::analysis_system(), Self::role_analysis_prompt(ctx))
            }
            GenerationTask::SpecificationSynthesis(facet) => {
                RenderedPrompt::new(Self::synthesis_system(), Self::synthesis_prompt(facet, ctx))
            }
            GenerationTask::ScreenRendering => {
                RenderedPrompt::new(Self::screen_system(), Self::screen_prompt(ctx))
            }
            GenerationTask::ImageMockup => {
                let screen = ctx
                    .screen
                    .clone()
                    .unwrap_or_else(|| ScreenSpec::named("App Screen"));
                let hint = ctx.hint();
                RenderedPrompt::new(
                    "",
                    Self::mockup_prompt(&screen, &hint.subject, &hint.style),
                )
            }
        }
    }

    pub fn questions_system() -> &'static str {
        r#"You are a senior UX researcher preparing a discovery interview.
You ask short, specific questions whose answers change design decisions.
Always answer with JSON only."#
    }

    pub fn questions_prompt(app_idea: &str) -> String {
        format!(
            r#"An entrepreneur wants to build: "{app_idea}"

Write 8-12 clarifying questions that would most change the UX of this app.
Cover target audience, core features, business model, content, and platform.

Return a JSON array inside a ```json fenced block. Each item:
{{
  "id": "snake_case_identifier",
  "question": "The question text",
  "type": "select" | "multiselect" | "text" | "textarea" | "number",
  "category": "audience" | "features" | "business" | "design" | "technical",
  "options": [{{"value": "option_key", "label": "Option text", "description": "Optional detail"}}],
  "required": true,
  "help_text": "Why this matters for the design"
}}

Options are required for select and multiselect questions and must be specific to this app."#
        )
    }

    pub fn analysis_system() -> &'static str {
        r#"You are a panel of three experts reviewing a product brief:
a UX designer, a business analyst, and a solution architect.
Each gives one focused paragraph. Always answer with JSON only."#
    }

    pub fn role_analysis_prompt(ctx: &PromptContext) -> String {
        format!(
            r#"{}

Give one paragraph of insight from each role.

Return a JSON object:
{{"designer": "...", "analyst": "...", "architect": "..."}}"#,
            Self::brief(ctx)
        )
    }

    pub fn synthesis_system() -> &'static str {
        r#"You are a lead product designer writing a UX specification.
You write concrete, implementable guidance. Always answer with JSON only."#
    }

    pub fn synthesis_prompt(facet: SynthesisFacet, ctx: &PromptContext) -> String {
        let (instruction, shape) = match facet {
            SynthesisFacet::Screens => (
                "List the 4-8 screens this app needs, in the order a new user meets them.",
                r#"[{"id": "snake_case", "name": "Screen name", "description": "...", "elements": ["..."], "user_flow": "...", "interactions": ["..."], "layout_type": "grid | single_column | two_column | dashboard | form"}]"#,
            ),
            SynthesisFacet::DataModel => (
                "Design the data model and REST API.",
                r#"{"entities": [{"name": "User", "attributes": [{"name": "id", "type": "UUID", "required": true}], "relationships": ["..."]}], "relationships": ["..."], "api_endpoints": [{"method": "GET", "path": "/api/...", "description": "..."}], "validation_rules": {"field": "rule"}}"#,
            ),
            SynthesisFacet::InteractionPatterns => (
                "Define the interaction patterns.",
                r#"{"global_patterns": {"buttons": {"hover": "..."}}, "transitions": {"page_transition": "..."}, "micro_interactions": ["..."]}"#,
            ),
            SynthesisFacet::ResponsiveRules => (
                "Define responsive design rules.",
                r#"{"breakpoints": {"mobile": "0-767px"}, "layout_rules": {"mobile": {"columns": "1"}}, "typography": {"mobile": {"h1": "24px"}}, "touch_targets": {"minimum": "44px"}}"#,
            ),
            SynthesisFacet::SeoRules => (
                "Define SEO and performance guidelines.",
                r#"{"seo": {"meta_tags": ["..."]}, "performance": {"targets": {"lcp": "< 2.5s"}}, "image_optimization": {"formats": ["webp"]}}"#,
            ),
            SynthesisFacet::ComponentLibrary => (
                "Recommend a UI component library.",
                r#"{"primary_library": {"name": "...", "reason": "...", "pros": ["..."], "cons": ["..."]}, "alternative_libraries": [{"name": "...", "reason": "..."}], "component_mapping": {"element": "Component"}, "custom_components": ["..."]}"#,
            ),
        };
        format!(
            "{}\n\n{instruction}\n\nReturn JSON inside a ```json fenced block with this shape:\n{shape}",
            Self::brief(ctx)
        )
    }

    pub fn screen_system() -> &'static str {
        r#"You are a front-end developer producing static HTML prototypes.
Output a single complete HTML5 document with inline CSS and no external assets."#
    }

    pub fn screen_prompt(ctx: &PromptContext) -> String {
        let screen = ctx
            .screen
            .clone()
            .unwrap_or_else(|| ScreenSpec::named("Landing Page"));
        let elements = if screen.elements.is_empty() {
            "choose sensible elements".to_string()
        } else {
            screen.elements.join(", ")
        };
        let siblings = if ctx.screen_names.is_empty() {
            String::new()
        } else {
            format!("\nOther screens (for navigation): {}", ctx.screen_names.join(", "))
        };
        format!(
            r#"App: {}
Screen: {} ({})
Elements: {}
User flow: {}{}

Write the complete HTML document for this screen. It must be responsive, accessible,
and use realistic placeholder content. Start with <!DOCTYPE html> and end with </html>."#,
            ctx.app_idea.content(),
            screen.name,
            screen.description,
            elements,
            screen.user_flow,
            siblings
        )
    }

    /// Prompt for an image model; style modifiers are appended for the
    /// styles we know.
    pub fn mockup_prompt(screen: &ScreenSpec, subject: &str, style: &str) -> String {
        let mut parts = vec![
            format!("{style} UI mockup design"),
            format!("app: {subject}"),
            format!("screen name: {}", screen.name),
        ];
        if !screen.description.is_empty() {
            parts.push(screen.description.clone());
        }
        if !screen.elements.is_empty() {
            let elements: Vec<_> = screen
                .elements
                .iter()
                .take(MOCKUP_ELEMENT_LIMIT)
                .map(String::as_str)
                .collect();
            parts.push(format!("UI elements: {}", elements.join(", ")));
        }
        if let Some(modifier) = style_modifier(style) {
            parts.push(modifier.to_string());
        }
        parts.extend(
            [
                "high quality UI design",
                "professional mockup",
                "clean layout",
                "proper spacing and alignment",
            ]
            .map(String::from),
        );
        parts.join(", ")
    }

    /// App idea plus whatever requirements and insights are known
    fn brief(ctx: &PromptContext) -> String {
        let mut brief = format!("App idea: {}", ctx.app_idea.content());
        if let Some(req) = &ctx.requirements {
            if !req.target_audience.is_empty() {
                brief.push_str(&format!("\nTarget audience: {}", req.target_audience.join(", ")));
            }
            if !req.goals.is_empty() {
                brief.push_str(&format!("\nGoals: {}", req.goals.join(", ")));
            }
            if !req.key_features.is_empty() {
                brief.push_str(&format!("\nKey features: {}", req.key_features.join(", ")));
            }
            for (id, answer) in &req.answers {
                brief.push_str(&format!("\n- {id}: {answer}"));
            }
        }
        if let Some(insights) = &ctx.insights {
            brief.push_str(&format!(
                "\n\nDesigner: {}\nAnalyst: {}\nArchitect: {}",
                insights.designer, insights.analyst, insights.architect
            ));
        }
        brief
    }
}

fn style_modifier(style: &str) -> Option<&'static str> {
    match style.trim().to_lowercase().as_str() {
        "clean wireframe" => Some("minimal black and white wireframe, simple lines, no colors, schematic"),
        "modern ui" => Some("modern flat design, material design, clean interface, professional"),
        "colorful mockup" => Some("vibrant colors, modern UI design, clean layout, professional app interface"),
        "dark mode" => Some("dark theme UI, modern interface, high contrast, elegant design"),
        "mobile app" => Some("mobile app interface, iOS/Android style, touch-friendly, responsive"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app_idea::AppIdea;

    fn ctx() -> PromptContext {
        PromptContext::new(AppIdea::try_new("A pet-sitting marketplace").unwrap())
    }

    #[test]
    fn test_every_task_renders_a_prompt() {
        for task in GenerationTask::all() {
            let prompt = PromptTemplate::render(task, &ctx());
            assert!(!prompt.user.is_empty(), "{task}");
        }
    }

    #[test]
    fn test_questions_prompt_mentions_idea() {
        let prompt = PromptTemplate::render(GenerationTask::QuestionGeneration, &ctx());
        assert!(prompt.user.contains("A pet-sitting marketplace"));
        assert!(prompt.user.contains("```json"));
    }

    #[test]
    fn test_mockup_prompt_style_modifier() {
        let mut screen = ScreenSpec::named("Feed");
        screen.elements = (0..15).map(|i| format!("e{i}")).collect();
        let prompt = PromptTemplate::mockup_prompt(&screen, "Chat app", "Dark Mode");
        assert!(prompt.starts_with("Dark Mode UI mockup design"));
        assert!(prompt.contains("dark theme UI"));
        assert!(prompt.contains("e9"));
        assert!(!prompt.contains("e10"));

        let plain = PromptTemplate::mockup_prompt(&screen, "Chat app", "sketchy");
        assert!(!plain.contains("dark theme"));
    }

    #[test]
    fn test_screen_prompt_lists_siblings() {
        let ctx = ctx()
            .with_screen(ScreenSpec::named("Cart"))
            .with_screen_names(vec!["Home".to_string(), "Cart".to_string()]);
        let prompt = PromptTemplate::render(GenerationTask::ScreenRendering, &ctx);
        assert!(prompt.user.contains("Screen: Cart"));
        assert!(prompt.user.contains("Home, Cart"));
    }
}
