//! Schema reconciliation
//!
//! Turns whatever the extractor found (or nothing at all) into a
//! schema-complete record. Field lookup tolerates aliases and key-style
//! differences, values are coerced toward the field kind, and anything
//! missing or unusable is filled from the local generator's output for the
//! same task and hint. Reconciliation never fails.

mod coerce;

use crate::artifacts::ReconciledResult;
use crate::context::ContextHint;
use crate::core::task::GenerationTask;
use crate::extraction::{ExtractedPayload, promote_item};
use crate::local;
use crate::schema::{FieldKind, FieldSpec, Schema, schema_for};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A reconciled record plus the top-level fields that had to be defaulted
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub result: ReconciledResult,
    pub defaulted: Vec<String>,
}

impl Reconciliation {
    /// No top-level field needed a default
    pub fn is_complete(&self) -> bool {
        self.defaulted.is_empty()
    }
}

/// Fill a task record from an optional payload
pub fn reconcile(
    payload: Option<&ExtractedPayload>,
    task: GenerationTask,
    hint: &ContextHint,
) -> ReconciledResult {
    reconcile_with_report(payload, task, hint).result
}

/// Like [`reconcile`], also reporting which top-level fields were defaulted
pub fn reconcile_with_report(
    payload: Option<&ExtractedPayload>,
    task: GenerationTask,
    hint: &ContextHint,
) -> Reconciliation {
    let schema = schema_for(task);
    let defaults = local::default_record(task, hint);
    let source = payload.and_then(|p| source_map(p, schema));

    let mut reconciler = Reconciler {
        hint,
        defaulted: Vec::new(),
    };
    let (filled, _) = reconciler.record(schema, source.as_ref(), Some(&defaults), 0, 0);

    match ReconciledResult::from_value(task, Value::Object(filled)) {
        Ok(result) => Reconciliation {
            result,
            defaulted: reconciler.defaulted,
        },
        // Only reachable if a coercion produced a value the record type
        // rejects; the local artifact is always valid.
        Err(_) => Reconciliation {
            result: local::default_result(task, hint),
            defaulted: schema.field_names().into_iter().map(String::from).collect(),
        },
    }
}

/// The top-level map to read fields from.
///
/// A lone mapping that carries the schema's list field (or an alias of it)
/// as a list is a wrapper and is read as-is; any other list is the list
/// field's items.
fn source_map(payload: &ExtractedPayload, schema: &Schema) -> Option<Map<String, Value>> {
    match payload {
        ExtractedPayload::Object(map) => Some(map.clone()),
        ExtractedPayload::List(items) => match schema.list_field() {
            Some(field) => {
                if let [only] = items.as_slice()
                    && lookup(only, field).is_some_and(Value::is_array)
                {
                    return Some(only.clone());
                }
                let mut map = Map::new();
                map.insert(
                    field.name.to_string(),
                    Value::Array(items.iter().cloned().map(Value::Object).collect()),
                );
                Some(map)
            }
            None => match items.as_slice() {
                [only] => Some(only.clone()),
                _ => None,
            },
        },
    }
}

/// Find a field's value: exact name first, then aliases in order
fn lookup<'a>(source: &'a Map<String, Value>, field: &FieldSpec) -> Option<&'a Value> {
    if let Some(value) = source.get(field.name) {
        return Some(value);
    }
    source
        .iter()
        .find(|(key, _)| field.matches_key(key))
        .map(|(_, value)| value)
}

struct Reconciler<'h> {
    hint: &'h ContextHint,
    defaulted: Vec<String>,
}

impl Reconciler<'_> {
    /// Fill one record. Returns the record and whether every core field
    /// came from the source.
    fn record(
        &mut self,
        schema: &Schema,
        source: Option<&Map<String, Value>>,
        defaults: Option<&Map<String, Value>>,
        index: usize,
        depth: usize,
    ) -> (Map<String, Value>, bool) {
        let mut out = Map::new();
        let mut missing = Vec::new();

        for field in schema.fields {
            let field_defaults = defaults
                .and_then(|d| d.get(field.name))
                .and_then(Value::as_object);
            let coerced = source
                .and_then(|s| lookup(s, field))
                .and_then(|value| self.coerce(field, value, field_defaults, depth));
            match coerced {
                Some(value) => {
                    out.insert(field.name.to_string(), value);
                }
                None => missing.push(field),
            }
        }

        let core_ok = missing.iter().all(|f| !f.core);

        for field in missing {
            let value = defaults
                .and_then(|d| d.get(field.name))
                .cloned()
                .unwrap_or_else(|| {
                    local::item_field_default(schema, field, index, &out, self.hint)
                });
            if depth == 0 {
                self.defaulted.push(field.name.to_string());
            }
            out.insert(field.name.to_string(), value);
        }

        (out, core_ok)
    }

    fn coerce(
        &mut self,
        field: &FieldSpec,
        value: &Value,
        field_defaults: Option<&Map<String, Value>>,
        depth: usize,
    ) -> Option<Value> {
        match field.kind {
            FieldKind::Text | FieldKind::OptionalText => coerce::text(value),
            FieldKind::Bool => coerce::boolean(value),
            FieldKind::TextList => coerce::text_list(value),
            FieldKind::TextMap => coerce::text_map(value),
            FieldKind::NestedTextMap => coerce::nested_text_map(value),
            FieldKind::JsonObject => coerce::json_object(value),
            FieldKind::Choice(table) => coerce::choice(value, table),
            FieldKind::Document => {
                let title = self.hint.screen_or_default().name;
                coerce::document(value, &title)
            }
            FieldKind::Record(schema) => {
                let item = match value {
                    Value::Array(items) if items.len() == 1 => promote_item(0, items[0].clone()),
                    other => promote_item(0, other.clone()),
                }?;
                let (filled, core_ok) =
                    self.record(schema, Some(&item), field_defaults, 0, depth + 1);
                core_ok.then_some(Value::Object(filled))
            }
            FieldKind::Records(schema) => {
                let items = match value {
                    Value::Array(items) => items.clone(),
                    Value::Null => return None,
                    other => vec![other.clone()],
                };
                let mut kept: Vec<Value> = items
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, item)| promote_item(i, item))
                    .enumerate()
                    .filter_map(|(i, item)| {
                        let (filled, core_ok) = self.record(schema, Some(&item), None, i, depth + 1);
                        core_ok.then_some(Value::Object(filled))
                    })
                    .collect();
                if kept.is_empty() {
                    None
                } else {
                    make_ids_unique(&mut kept);
                    Some(Value::Array(kept))
                }
            }
        }
    }
}

/// Suffix repeated `id`s in a record list: `home`, `home_2`, `home_3`
fn make_ids_unique(items: &mut [Value]) {
    let mut seen = HashSet::new();
    for map in items.iter_mut().filter_map(Value::as_object_mut) {
        let Some(id) = map.get("id").and_then(Value::as_str).map(str::to_string) else {
            continue;
        };
        let mut candidate = id.clone();
        let mut n = 1;
        while !seen.insert(candidate.clone()) {
            n += 1;
            candidate = format!("{id}_{n}");
        }
        if candidate != id {
            map.insert("id".to_string(), Value::String(candidate));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{QuestionType, ScreenLayout, SpecFragment};
    use crate::core::task::SynthesisFacet;
    use crate::extraction::{extract_text, is_full_document};
    use serde_json::json;

    fn hint() -> ContextHint {
        ContextHint::from_subject("A pet-sitting marketplace")
    }

    fn object(value: Value) -> ExtractedPayload {
        match value {
            Value::Object(map) => ExtractedPayload::Object(map),
            other => panic!("not an object: {other}"),
        }
    }

    fn sorted_keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn schema_keys(task: GenerationTask) -> Vec<String> {
        let mut keys: Vec<_> = schema_for(task)
            .field_names()
            .into_iter()
            .map(String::from)
            .collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_every_task_yields_every_schema_key() {
        let partials = [
            None,
            Some(object(json!({}))),
            Some(object(json!({"unrelated": true, "designer": 7}))),
            Some(ExtractedPayload::List(vec![Map::new()])),
        ];
        for task in GenerationTask::all() {
            for payload in &partials {
                let result = reconcile(payload.as_ref(), task, &hint());
                assert_eq!(sorted_keys(&result.payload()), schema_keys(task), "{task}");
            }
        }
    }

    #[test]
    fn test_reconciling_local_output_is_identity() {
        for task in GenerationTask::all() {
            let local = local::default_result(task, &hint());
            let payload = object(local.payload());
            assert_eq!(reconcile(Some(&payload), task, &hint()), local, "{task}");
            assert_eq!(reconcile(None, task, &hint()), local, "{task}");
        }
    }

    #[test]
    fn test_malformed_completion_reconciles_to_local() {
        let payload = extract_text(
            "I'm sorry, I can't produce JSON today.",
            GenerationTask::QuestionGeneration.expected_shape(),
        );
        assert!(payload.is_none());
        let result = reconcile(payload.as_ref(), GenerationTask::QuestionGeneration, &hint());
        let questions = result.into_questions().unwrap();
        assert!(!questions.is_empty());
        for q in &questions.questions {
            assert!(!q.question.is_empty());
        }
    }

    #[test]
    fn test_partial_insights_keep_provider_fields() {
        let payload = object(json!({"ux_designer": "Lead with sitter trust badges."}));
        let report = reconcile_with_report(Some(&payload), GenerationTask::RoleAnalysis, &hint());
        assert_eq!(report.defaulted, vec!["analyst", "architect"]);
        let insights = report.result.into_role_insights().unwrap();
        assert_eq!(insights.designer, "Lead with sitter trust badges.");
        assert_eq!(insights.analyst, local::default_insights(&hint()).analyst);
    }

    #[test]
    fn test_question_aliases_and_coercions() {
        let payload = extract_text(
            r#"```json
[
  {"label": "How many pets do you care for?", "kind": "NUMBER", "required": "no"},
  {"id": 7, "question": "Which services?", "type": "multi_select",
   "choices": ["Dog walking", "Overnight stays"], "helpText": "Pick all"},
  {"question": "Preferred contact?", "options": [{"text": "Email"}, {"text": "Phone"}]},
  {"type": "select", "options": ["orphan"]}
]
```"#,
            GenerationTask::QuestionGeneration.expected_shape(),
        );
        let result = reconcile(payload.as_ref(), GenerationTask::QuestionGeneration, &hint());
        let questions = result.into_questions().unwrap().questions;

        // The last item has no question text and is dropped
        assert_eq!(questions.len(), 3);

        assert_eq!(questions[0].id, "how_many_pets_do_you_care_for");
        assert_eq!(questions[0].kind, QuestionType::Number);
        assert!(!questions[0].required);

        assert_eq!(questions[1].id, "7");
        assert_eq!(questions[1].kind, QuestionType::Multiselect);
        assert_eq!(questions[1].options[1].label, "Overnight stays");
        assert_eq!(questions[1].options[1].value, "overnight_stays");
        assert_eq!(questions[1].help_text.as_deref(), Some("Pick all"));

        // No type given but options present: select
        assert_eq!(questions[2].kind, QuestionType::Select);
        assert_eq!(questions[2].category, "general");
        assert!(questions[2].required);
    }

    #[test]
    fn test_empty_question_list_falls_back_to_defaults() {
        let payload = ExtractedPayload::List(vec![object_map(json!({"type": "text"}))]);
        let result = reconcile(Some(&payload), GenerationTask::QuestionGeneration, &hint());
        assert_eq!(
            result,
            local::default_result(GenerationTask::QuestionGeneration, &hint())
        );
    }

    fn screens_facet() -> GenerationTask {
        GenerationTask::SpecificationSynthesis(SynthesisFacet::Screens)
    }

    fn screen_set(result: ReconciledResult) -> crate::artifacts::ScreenSet {
        match result.into_fragment() {
            Some(SpecFragment::Screens(set)) => set,
            other => panic!("wrong fragment: {other:?}"),
        }
    }

    #[test]
    fn test_single_question_mapping_keeps_its_options() {
        let task = GenerationTask::QuestionGeneration;
        let payload = extract_text(
            r#"{"id": "budget", "question": "What is your budget?", "type": "select", "options": ["Low", "High"]}"#,
            task.expected_shape(),
        );
        let report = reconcile_with_report(payload.as_ref(), task, &hint());
        assert!(report.is_complete());
        let questions = report.result.into_questions().unwrap().questions;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "What is your budget?");
        let labels: Vec<_> = questions[0].options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Low", "High"]);
    }

    #[test]
    fn test_single_screen_mapping_keeps_its_elements() {
        let payload = extract_text(
            r#"{"name": "Home", "elements": ["hero", "search bar"]}"#,
            screens_facet().expected_shape(),
        );
        let set = screen_set(reconcile(payload.as_ref(), screens_facet(), &hint()));
        let names: Vec<_> = set.screens.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Home"]);
        assert_eq!(set.screens[0].elements, vec!["hero", "search bar"]);
    }

    #[test]
    fn test_wrapper_with_several_lists_uses_the_list_field() {
        let task = GenerationTask::QuestionGeneration;
        let payload = extract_text(
            r#"{"questions": [{"id": "pets", "question": "Which pets?"}], "categories": ["audience"]}"#,
            task.expected_shape(),
        );
        let report = reconcile_with_report(payload.as_ref(), task, &hint());
        assert!(report.defaulted.is_empty());
        let questions = report.result.into_questions().unwrap().questions;
        let texts: Vec<_> = questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, vec!["Which pets?"]);

        let payload = extract_text(
            r#"{"pages": [{"name": "Search"}, {"name": "Booking"}], "count": 2}"#,
            screens_facet().expected_shape(),
        );
        let set = screen_set(reconcile(payload.as_ref(), screens_facet(), &hint()));
        assert_eq!(set.screens.len(), 2);
    }

    #[test]
    fn test_repeated_record_ids_are_suffixed() {
        let payload = extract_text(
            r#"[{"name": "Home"}, {"name": "home"}, {"id": "home", "name": "Landing"}]"#,
            screens_facet().expected_shape(),
        );
        let set = screen_set(reconcile(payload.as_ref(), screens_facet(), &hint()));
        let ids: Vec<_> = set.screens.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "home_2", "home_3"]);

        let task = GenerationTask::QuestionGeneration;
        let payload = extract_text(
            r#"[{"id": "pets", "question": "Which pets?"}, {"id": "pets", "question": "How many pets?"}]"#,
            task.expected_shape(),
        );
        let questions = reconcile(payload.as_ref(), task, &hint())
            .into_questions()
            .unwrap()
            .questions;
        assert_eq!(questions[0].id, "pets");
        assert_eq!(questions[1].id, "pets_2");
    }

    fn object_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_screen_fragment_is_wrapped() {
        let hint = hint().with_screen(crate::artifacts::ScreenSpec::named("Sitter Search"));
        let payload = object(json!({"html": "<section><h2>Find a sitter</h2></section>"}));
        let result = reconcile(Some(&payload), GenerationTask::ScreenRendering, &hint);
        let ScreenLayout {
            screen_id,
            html_layout,
            ..
        } = result.into_screen_layout().unwrap();
        assert_eq!(screen_id, "sitter_search");
        assert!(is_full_document(&html_layout));
        assert!(html_layout.contains("Find a sitter"));
    }

    #[test]
    fn test_component_library_string_primary() {
        let payload = object(json!({
            "primaryLibrary": "Chakra UI",
            "alternatives": [{"name": "MUI", "why": "Popular"}],
        }));
        let task = GenerationTask::SpecificationSynthesis(SynthesisFacet::ComponentLibrary);
        let report = reconcile_with_report(Some(&payload), task, &hint());
        let Some(SpecFragment::ComponentLibrary(library)) = report.result.into_fragment() else {
            panic!("wrong fragment");
        };
        assert_eq!(library.primary_library.name, "Chakra UI");
        assert_eq!(library.alternative_libraries[0].reason, "Popular");
        assert_eq!(
            report.defaulted,
            vec!["component_mapping", "custom_components"]
        );
    }
}
