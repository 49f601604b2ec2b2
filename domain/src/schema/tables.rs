//! Schema tables for every task record

use super::{FieldKind, FieldSpec, Schema};

/// Synonyms providers use for question input types
pub const QUESTION_TYPE_SYNONYMS: &[(&str, &str)] = &[
    ("text", "text"),
    ("short_text", "text"),
    ("string", "text"),
    ("input", "text"),
    ("email", "text"),
    ("url", "text"),
    ("select", "select"),
    ("single_select", "select"),
    ("single_choice", "select"),
    ("single", "select"),
    ("radio", "select"),
    ("dropdown", "select"),
    ("choice", "select"),
    ("boolean", "select"),
    ("multiselect", "multiselect"),
    ("multi_select", "multiselect"),
    ("multiple_choice", "multiselect"),
    ("multiple", "multiselect"),
    ("checkbox", "multiselect"),
    ("checkboxes", "multiselect"),
    ("priority_rank", "multiselect"),
    ("ranking", "multiselect"),
    ("number", "number"),
    ("numeric", "number"),
    ("integer", "number"),
    ("range", "number"),
    ("slider", "number"),
    ("scale", "number"),
    ("textarea", "textarea"),
    ("long_text", "textarea"),
    ("paragraph", "textarea"),
    ("free_text", "textarea"),
];

pub static OPTION_SCHEMA: Schema = Schema {
    name: "option",
    fields: &[
        FieldSpec::new("value", FieldKind::Text, &["id", "key", "slug"], false),
        FieldSpec::new(
            "label",
            FieldKind::Text,
            &["text", "name", "title", "option"],
            true,
        ),
        FieldSpec::new(
            "description",
            FieldKind::OptionalText,
            &["detail", "details"],
            false,
        ),
    ],
};

pub static QUESTION_SCHEMA: Schema = Schema {
    name: "question",
    fields: &[
        FieldSpec::new("id", FieldKind::Text, &["question_id", "key", "slug"], false),
        FieldSpec::new(
            "question",
            FieldKind::Text,
            &["label", "text", "title", "prompt", "question_text"],
            true,
        ),
        FieldSpec::new(
            "type",
            FieldKind::Choice(QUESTION_TYPE_SYNONYMS),
            &["kind", "question_type", "input_type", "answer_type"],
            false,
        ),
        FieldSpec::new("category", FieldKind::Text, &["group", "section", "topic"], false),
        FieldSpec::new(
            "options",
            FieldKind::Records(&OPTION_SCHEMA),
            &["choices", "answers", "values"],
            false,
        ),
        FieldSpec::new(
            "required",
            FieldKind::Bool,
            &["is_required", "mandatory"],
            false,
        ),
        FieldSpec::new(
            "help_text",
            FieldKind::OptionalText,
            &["help", "hint", "why_asking", "description", "explanation"],
            false,
        ),
        FieldSpec::new("placeholder", FieldKind::OptionalText, &["example"], false),
    ],
};

pub static QUESTION_SET_SCHEMA: Schema = Schema {
    name: "question_set",
    fields: &[FieldSpec::new(
        "questions",
        FieldKind::Records(&QUESTION_SCHEMA),
        &["items", "clarifying_questions", "data"],
        false,
    )],
};

pub static ROLE_INSIGHTS_SCHEMA: Schema = Schema {
    name: "role_insights",
    fields: &[
        FieldSpec::new(
            "designer",
            FieldKind::Text,
            &["ux_designer", "designer_insight", "design", "ux"],
            false,
        ),
        FieldSpec::new(
            "analyst",
            FieldKind::Text,
            &["business_analyst", "analyst_insight", "business", "analysis"],
            false,
        ),
        FieldSpec::new(
            "architect",
            FieldKind::Text,
            &[
                "solution_architect",
                "technical_architect",
                "architect_insight",
                "architecture",
                "technical",
            ],
            false,
        ),
    ],
};

pub static SCREEN_SPEC_SCHEMA: Schema = Schema {
    name: "screen",
    fields: &[
        FieldSpec::new("id", FieldKind::Text, &["screen_id", "slug", "key"], false),
        FieldSpec::new(
            "name",
            FieldKind::Text,
            &["title", "screen_name", "label"],
            true,
        ),
        FieldSpec::new(
            "description",
            FieldKind::Text,
            &["summary", "purpose"],
            false,
        ),
        FieldSpec::new(
            "elements",
            FieldKind::TextList,
            &["components", "ui_elements", "sections"],
            false,
        ),
        FieldSpec::new("user_flow", FieldKind::Text, &["flow", "navigation"], false),
        FieldSpec::new(
            "interactions",
            FieldKind::TextList,
            &["actions", "user_actions"],
            false,
        ),
        FieldSpec::new("layout_type", FieldKind::Text, &["layout"], false),
    ],
};

pub static SCREEN_SET_SCHEMA: Schema = Schema {
    name: "screen_set",
    fields: &[FieldSpec::new(
        "screens",
        FieldKind::Records(&SCREEN_SPEC_SCHEMA),
        &["items", "pages", "views"],
        false,
    )],
};

pub static ATTRIBUTE_SCHEMA: Schema = Schema {
    name: "attribute",
    fields: &[
        FieldSpec::new("name", FieldKind::Text, &["field", "label", "key"], true),
        FieldSpec::new("type", FieldKind::Text, &["data_type", "datatype"], false),
        FieldSpec::new("required", FieldKind::Bool, &["is_required", "mandatory"], false),
    ],
};

pub static ENTITY_SCHEMA: Schema = Schema {
    name: "entity",
    fields: &[
        FieldSpec::new("name", FieldKind::Text, &["entity", "label", "title"], true),
        FieldSpec::new(
            "attributes",
            FieldKind::Records(&ATTRIBUTE_SCHEMA),
            &["fields", "properties", "columns"],
            false,
        ),
        FieldSpec::new(
            "relationships",
            FieldKind::TextList,
            &["relations", "associations"],
            false,
        ),
    ],
};

pub static ENDPOINT_SCHEMA: Schema = Schema {
    name: "endpoint",
    fields: &[
        FieldSpec::new("method", FieldKind::Text, &["verb", "http_method"], false),
        FieldSpec::new(
            "path",
            FieldKind::Text,
            &["route", "url", "endpoint", "label"],
            true,
        ),
        FieldSpec::new("description", FieldKind::Text, &["summary", "purpose"], false),
    ],
};

pub static DATA_MODEL_SCHEMA: Schema = Schema {
    name: "data_model",
    fields: &[
        FieldSpec::new(
            "entities",
            FieldKind::Records(&ENTITY_SCHEMA),
            &["models", "tables"],
            false,
        ),
        FieldSpec::new(
            "relationships",
            FieldKind::TextList,
            &["relations", "associations"],
            false,
        ),
        FieldSpec::new(
            "api_endpoints",
            FieldKind::Records(&ENDPOINT_SCHEMA),
            &["endpoints", "api", "routes"],
            false,
        ),
        FieldSpec::new(
            "validation_rules",
            FieldKind::JsonObject,
            &["validation", "validations"],
            false,
        ),
    ],
};

pub static INTERACTION_PATTERNS_SCHEMA: Schema = Schema {
    name: "interaction_patterns",
    fields: &[
        FieldSpec::new(
            "global_patterns",
            FieldKind::NestedTextMap,
            &["patterns", "global"],
            false,
        ),
        FieldSpec::new(
            "transitions",
            FieldKind::TextMap,
            &["animations", "page_transitions"],
            false,
        ),
        FieldSpec::new(
            "micro_interactions",
            FieldKind::TextList,
            &["microinteractions", "micro"],
            false,
        ),
    ],
};

pub static RESPONSIVE_RULES_SCHEMA: Schema = Schema {
    name: "responsive_rules",
    fields: &[
        FieldSpec::new(
            "breakpoints",
            FieldKind::TextMap,
            &["screen_sizes", "sizes"],
            false,
        ),
        FieldSpec::new(
            "layout_rules",
            FieldKind::NestedTextMap,
            &["layouts", "layout"],
            false,
        ),
        FieldSpec::new(
            "typography",
            FieldKind::NestedTextMap,
            &["fonts", "type_scale"],
            false,
        ),
        FieldSpec::new(
            "touch_targets",
            FieldKind::TextMap,
            &["touch", "tap_targets"],
            false,
        ),
    ],
};

pub static SEO_RULES_SCHEMA: Schema = Schema {
    name: "seo_rules",
    fields: &[
        FieldSpec::new(
            "seo",
            FieldKind::JsonObject,
            &["seo_rules", "search"],
            false,
        ),
        FieldSpec::new(
            "performance",
            FieldKind::JsonObject,
            &["performance_targets", "web_vitals", "core_web_vitals"],
            false,
        ),
        FieldSpec::new(
            "image_optimization",
            FieldKind::JsonObject,
            &["images", "image_rules"],
            false,
        ),
    ],
};

pub static LIBRARY_SCHEMA: Schema = Schema {
    name: "library",
    fields: &[
        FieldSpec::new("name", FieldKind::Text, &["library", "title", "label"], true),
        FieldSpec::new(
            "reason",
            FieldKind::Text,
            &["why", "rationale", "justification"],
            false,
        ),
        FieldSpec::new(
            "pros",
            FieldKind::TextList,
            &["advantages", "strengths"],
            false,
        ),
        FieldSpec::new(
            "cons",
            FieldKind::TextList,
            &["disadvantages", "weaknesses", "drawbacks"],
            false,
        ),
    ],
};

pub static COMPONENT_LIBRARY_SCHEMA: Schema = Schema {
    name: "component_library",
    fields: &[
        FieldSpec::new(
            "primary_library",
            FieldKind::Record(&LIBRARY_SCHEMA),
            &["primary", "recommended", "recommended_library"],
            false,
        ),
        FieldSpec::new(
            "alternative_libraries",
            FieldKind::Records(&LIBRARY_SCHEMA),
            &["alternatives", "other_libraries"],
            false,
        ),
        FieldSpec::new(
            "component_mapping",
            FieldKind::JsonObject,
            &["mapping", "components"],
            false,
        ),
        FieldSpec::new(
            "custom_components",
            FieldKind::TextList,
            &["custom"],
            false,
        ),
    ],
};

pub static SCREEN_LAYOUT_SCHEMA: Schema = Schema {
    name: "screen_layout",
    fields: &[
        FieldSpec::new("screen_id", FieldKind::Text, &["id"], false),
        FieldSpec::new("screen_name", FieldKind::Text, &["name", "title"], false),
        FieldSpec::new(
            "html_layout",
            FieldKind::Document,
            &["html", "layout", "markup", "html_content", "content"],
            true,
        ),
        FieldSpec::new(
            "generation_method",
            FieldKind::Text,
            &["method", "generated_by"],
            false,
        ),
    ],
};

pub static IMAGE_MOCKUP_SCHEMA: Schema = Schema {
    name: "image_mockup",
    fields: &[
        FieldSpec::new("screen_id", FieldKind::Text, &["id"], false),
        FieldSpec::new("screen_name", FieldKind::Text, &["name", "title"], false),
        FieldSpec::new("image_format", FieldKind::Text, &["format", "mime"], false),
        FieldSpec::new(
            "image_source",
            FieldKind::Text,
            &["image_url", "url", "image", "source"],
            true,
        ),
        FieldSpec::new(
            "generation_method",
            FieldKind::Text,
            &["method", "generated_by"],
            false,
        ),
        FieldSpec::new("prompt_used", FieldKind::Text, &["prompt"], false),
    ],
};
