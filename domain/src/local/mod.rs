//! Deterministic local generators
//!
//! The last rung of the fallback ladder. Every function here is a pure
//! function of the task and a [`ContextHint`], so the same hint always
//! yields the same artifact, and the reconciler uses the same output as
//! its source of per-field defaults.

pub mod html;
pub mod insights;
pub mod questions;
pub mod specification;
pub mod svg;

use crate::artifacts::{
    ImageMockup, ReconciledResult, SVG_DATA_URI_PREFIX, ScreenLayout, SpecFragment,
};
use crate::context::ContextHint;
use crate::core::string::slugify;
use crate::core::task::{GenerationTask, SynthesisFacet};
use crate::prompt::PromptTemplate;
use crate::schema::{FieldKind, FieldSpec, Schema};
use serde_json::{Map, Value, json};

/// `generation_method` recorded on locally generated artifacts
pub const LOCAL_GENERATION_METHOD: &str = "local_template";

pub use insights::default_insights;
pub use questions::default_questions;

/// The complete local artifact for a task
pub fn default_result(task: GenerationTask, hint: &ContextHint) -> ReconciledResult {
    match task {
        GenerationTask::QuestionGeneration => {
            ReconciledResult::Questions(questions::default_questions(hint))
        }
        GenerationTask::RoleAnalysis => {
            ReconciledResult::RoleInsights(insights::default_insights(hint))
        }
        GenerationTask::SpecificationSynthesis(facet) => {
            ReconciledResult::Specification(default_fragment(facet, hint))
        }
        GenerationTask::ScreenRendering => ReconciledResult::ScreenLayout(default_layout(hint)),
        GenerationTask::ImageMockup => ReconciledResult::ImageMockup(default_mockup(hint)),
    }
}

/// The local artifact as a JSON object, for per-field defaults
pub fn default_record(task: GenerationTask, hint: &ContextHint) -> Map<String, Value> {
    match default_result(task, hint).payload() {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn default_fragment(facet: SynthesisFacet, hint: &ContextHint) -> SpecFragment {
    match facet {
        SynthesisFacet::Screens => SpecFragment::Screens(specification::default_screens(hint)),
        SynthesisFacet::DataModel => {
            SpecFragment::DataModel(specification::default_data_model(hint))
        }
        SynthesisFacet::InteractionPatterns => SpecFragment::InteractionPatterns(
            specification::default_interaction_patterns(hint),
        ),
        SynthesisFacet::ResponsiveRules => {
            SpecFragment::ResponsiveRules(specification::default_responsive_rules())
        }
        SynthesisFacet::SeoRules => SpecFragment::SeoRules(specification::default_seo_rules(hint)),
        SynthesisFacet::ComponentLibrary => {
            SpecFragment::ComponentLibrary(specification::default_component_library(hint))
        }
    }
}

pub fn default_layout(hint: &ContextHint) -> ScreenLayout {
    let screen = hint.screen_or_default();
    ScreenLayout {
        html_layout: html::render_screen(&screen, &hint.subject),
        screen_id: screen.id,
        screen_name: screen.name,
        generation_method: LOCAL_GENERATION_METHOD.to_string(),
    }
}

pub fn default_mockup(hint: &ContextHint) -> ImageMockup {
    let screen = hint.screen_or_default();
    let svg = svg::wireframe(&screen, &hint.subject);
    ImageMockup {
        prompt_used: PromptTemplate::mockup_prompt(&screen, &hint.subject, &hint.style),
        screen_id: screen.id,
        screen_name: screen.name,
        image_format: "svg".to_string(),
        image_source: format!("{SVG_DATA_URI_PREFIX}{svg}"),
        generation_method: LOCAL_GENERATION_METHOD.to_string(),
    }
}

/// Default for a field of a nested record item (a question, an option, an
/// entity attribute, ...), given the item's already-reconciled fields.
pub fn item_field_default(
    schema: &Schema,
    field: &FieldSpec,
    index: usize,
    item: &Map<String, Value>,
    hint: &ContextHint,
) -> Value {
    let text = |key: &str| item.get(key).and_then(Value::as_str).unwrap_or_default();
    let slug_or = |key: &str, prefix: &str| {
        let slug = slugify(text(key));
        if slug.is_empty() {
            format!("{prefix}_{}", index + 1)
        } else {
            slug
        }
    };

    match (schema.name, field.name) {
        ("question", "id") => json!(slug_or("question", "question")),
        ("question", "type") => {
            let has_options = item
                .get("options")
                .and_then(Value::as_array)
                .is_some_and(|o| !o.is_empty());
            json!(if has_options { "select" } else { "text" })
        }
        ("question", "category") => json!("general"),
        ("question", "required") => json!(true),
        ("option", "value") => json!(slug_or("label", "option")),
        ("screen", "id") => json!(slug_or("name", "screen")),
        ("screen", "description") => json!(format!("{} for {}", text("name"), hint.subject)),
        ("screen", "user_flow") => {
            json!(format!("Users reach {} from the main navigation", text("name")))
        }
        ("screen", "layout_type") => json!("responsive"),
        ("attribute", "type") => json!("string"),
        ("endpoint", "method") => json!("GET"),
        _ => empty_value(&field.kind),
    }
}

/// The empty value of a field kind
pub fn empty_value(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Text | FieldKind::Document | FieldKind::Choice(_) => json!(""),
        FieldKind::OptionalText => Value::Null,
        FieldKind::Bool => json!(false),
        FieldKind::TextList | FieldKind::Records(_) => json!([]),
        FieldKind::TextMap | FieldKind::NestedTextMap | FieldKind::JsonObject => json!({}),
        FieldKind::Record(schema) => {
            let map: Map<String, Value> = schema
                .fields
                .iter()
                .map(|f| (f.name.to_string(), empty_value(&f.kind)))
                .collect();
            Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ScreenSpec;
    use crate::schema::{QUESTION_SCHEMA, schema_for};

    fn hint() -> ContextHint {
        ContextHint::from_subject("A pet-sitting marketplace")
    }

    #[test]
    fn test_local_output_is_deterministic() {
        for task in GenerationTask::all() {
            assert_eq!(default_result(task, &hint()), default_result(task, &hint()), "{task}");
        }
    }

    #[test]
    fn test_default_record_keys_match_schema() {
        for task in GenerationTask::all() {
            let record = default_record(task, &hint());
            let mut keys: Vec<_> = record.keys().map(String::as_str).collect();
            let mut expected = schema_for(task).field_names();
            keys.sort();
            expected.sort();
            assert_eq!(keys, expected, "{task}");
        }
    }

    #[test]
    fn test_layout_and_mockup_are_stamped_local() {
        let hint = hint().with_screen(ScreenSpec::named("Shopping Cart"));
        let layout = default_layout(&hint);
        assert_eq!(layout.generation_method, LOCAL_GENERATION_METHOD);
        assert_eq!(layout.screen_id, "shopping_cart");

        let mockup = default_mockup(&hint);
        assert_eq!(mockup.generation_method, LOCAL_GENERATION_METHOD);
        assert_eq!(mockup.image_format, "svg");
        assert!(mockup.inline_svg().unwrap().starts_with("<svg"));
        assert!(!mockup.prompt_used.is_empty());
    }

    #[test]
    fn test_item_field_default_for_question_type() {
        let field = QUESTION_SCHEMA.field("type").unwrap();
        let mut item = Map::new();
        assert_eq!(item_field_default(&QUESTION_SCHEMA, field, 0, &item, &hint()), "text");
        item.insert("options".to_string(), json!([{"value": "a", "label": "A"}]));
        assert_eq!(item_field_default(&QUESTION_SCHEMA, field, 0, &item, &hint()), "select");
    }

    #[test]
    fn test_item_id_default_from_question_text() {
        let field = QUESTION_SCHEMA.field("id").unwrap();
        let mut item = Map::new();
        item.insert("question".to_string(), json!("How many pets?"));
        assert_eq!(
            item_field_default(&QUESTION_SCHEMA, field, 3, &item, &hint()),
            "how_many_pets"
        );
        assert_eq!(
            item_field_default(&QUESTION_SCHEMA, field, 3, &Map::new(), &hint()),
            "question_4"
        );
    }
}
