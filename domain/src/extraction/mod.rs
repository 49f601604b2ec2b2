//! Response extraction
//!
//! Pulls a structured payload out of a raw completion without ever
//! failing loudly: anything that cannot be located or parsed comes back
//! as `None`, and the fallback ladder decides what to do next.

mod image;
mod json;
mod markup;

pub use image::guess_format;
pub use markup::{contains_tag, is_full_document};

use crate::core::task::ExpectedShape;
use crate::generation::RawCompletion;
use serde_json::{Map, Value, json};

/// A located and parsed payload
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedPayload {
    Object(Map<String, Value>),
    List(Vec<Map<String, Value>>),
}

impl ExtractedPayload {
    pub fn len(&self) -> usize {
        match self {
            ExtractedPayload::Object(map) => map.len(),
            ExtractedPayload::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            ExtractedPayload::Object(map) => Some(map),
            ExtractedPayload::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Map<String, Value>]> {
        match self {
            ExtractedPayload::List(items) => Some(items),
            ExtractedPayload::Object(_) => None,
        }
    }
}

/// Extract a payload of the expected shape from a raw completion
pub fn extract(raw: &RawCompletion, shape: ExpectedShape) -> Option<ExtractedPayload> {
    match raw {
        RawCompletion::Image { source, format } => {
            if shape != ExpectedShape::ImageRef || source.trim().is_empty() {
                return None;
            }
            let format = if format.trim().is_empty() {
                guess_format(source)
            } else {
                format.clone()
            };
            Some(image_payload(source.trim(), &format))
        }
        RawCompletion::Text { text } => extract_text(text, shape),
    }
}

/// Extract a payload of the expected shape from completion text
pub fn extract_text(text: &str, shape: ExpectedShape) -> Option<ExtractedPayload> {
    match shape {
        ExpectedShape::Object | ExpectedShape::List => {
            json::extract_structured(text).and_then(|value| coerce_shape(value, shape))
        }
        ExpectedShape::Markup => markup::find_document(text).map(markup_payload),
        ExpectedShape::ImageRef => {
            image::find_image_ref(text).map(|found| image_payload(&found.source, &found.format))
        }
    }
}

/// Accept a bare markup fragment for tasks that tolerate one.
///
/// Returns `None` when the text contains no element tags at all.
pub fn markup_fragment(text: &str) -> Option<ExtractedPayload> {
    let trimmed = text.trim();
    if contains_tag(trimmed) {
        Some(markup_payload(trimmed))
    } else {
        None
    }
}

/// Promote a bare scalar list element to `{value_index, label}`.
///
/// Objects pass through; nulls and nested lists are dropped.
pub fn promote_item(index: usize, value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(promoted(index, Value::String(s.trim().to_string()))),
        Value::Number(_) | Value::Bool(_) => Some(promoted(index, Value::String(value.to_string()))),
        Value::Null | Value::Array(_) => None,
    }
}

fn promoted(index: usize, label: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("value_index".to_string(), json!(index));
    map.insert("label".to_string(), label);
    map
}

fn coerce_shape(value: Value, shape: ExpectedShape) -> Option<ExtractedPayload> {
    match (shape, value) {
        (ExpectedShape::List, Value::Array(items)) => promote_list(items),
        // A wrapper such as `{"questions": [...]}` is unwrapped by the
        // reconciler, which knows the task's list field
        (ExpectedShape::List, Value::Object(map)) => Some(ExtractedPayload::List(vec![map])),
        (ExpectedShape::Object, Value::Object(map)) => Some(ExtractedPayload::Object(map)),
        (ExpectedShape::Object, Value::Array(mut items)) if items.len() == 1 => match items.pop() {
            Some(Value::Object(map)) => Some(ExtractedPayload::Object(map)),
            _ => None,
        },
        _ => None,
    }
}

/// An empty list carries nothing to reconcile and counts as not found
fn promote_list(items: Vec<Value>) -> Option<ExtractedPayload> {
    let promoted: Vec<_> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| promote_item(i, v))
        .collect();
    if promoted.is_empty() {
        None
    } else {
        Some(ExtractedPayload::List(promoted))
    }
}

fn markup_payload(markup: &str) -> ExtractedPayload {
    let mut map = Map::new();
    map.insert("html_layout".to_string(), Value::String(markup.to_string()));
    ExtractedPayload::Object(map)
}

fn image_payload(source: &str, format: &str) -> ExtractedPayload {
    let mut map = Map::new();
    map.insert("image_source".to_string(), Value::String(source.to_string()));
    map.insert("image_format".to_string(), Value::String(format.to_string()));
    ExtractedPayload::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawCompletion {
        RawCompletion::text(s)
    }

    #[test]
    fn test_fenced_list_keeps_items_in_order() {
        let raw = text(
            "Here are the questions:\n```json\n[\n  {\"id\": \"q1\"},\n  {\"id\": \"q2\"},\n  {\"id\": \"q3\"},\n  {\"id\": \"q4\"}\n]\n```\nLet me know!",
        );
        let payload = extract(&raw, ExpectedShape::List).unwrap();
        let ids: Vec<_> = payload
            .as_list()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["q1", "q2", "q3", "q4"]);
    }

    #[test]
    fn test_malformed_text_is_none() {
        for garbage in ["", "Sorry, I can't do that.", "{not json at all", "[[[", "42"] {
            assert_eq!(extract(&text(garbage), ExpectedShape::List), None, "{garbage}");
            assert_eq!(extract(&text(garbage), ExpectedShape::Object), None, "{garbage}");
        }
    }

    #[test]
    fn test_mapping_with_nested_list_stays_one_item() {
        let raw = text(
            r#"{"id": "budget", "question": "What is your budget?", "type": "select", "options": ["Low", "High"]}"#,
        );
        let payload = extract(&raw, ExpectedShape::List).unwrap();
        let items = payload.as_list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["question"], "What is your budget?");
        assert_eq!(items[0]["options"], json!(["Low", "High"]));

        let raw = text(r#"{"name": "Home", "elements": ["hero", "search bar"]}"#);
        let payload = extract(&raw, ExpectedShape::List).unwrap();
        assert_eq!(payload.as_list().unwrap()[0]["name"], "Home");
    }

    #[test]
    fn test_single_object_becomes_one_item_list() {
        let raw = text(r#"{"id": "only", "question": "Why?"}"#);
        let payload = extract(&raw, ExpectedShape::List).unwrap();
        assert_eq!(payload.as_list().unwrap()[0]["id"], "only");
    }

    #[test]
    fn test_scalars_are_promoted() {
        let raw = text(r#"["Budget", 3, null, {"id": "x"}]"#);
        let payload = extract(&raw, ExpectedShape::List).unwrap();
        let items = payload.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["label"], "Budget");
        assert_eq!(items[0]["value_index"], 0);
        assert_eq!(items[1]["label"], "3");
        assert_eq!(items[2]["id"], "x");
    }

    #[test]
    fn test_object_shape_from_single_item_list() {
        let raw = text(r#"[{"designer": "a"}]"#);
        assert!(extract(&raw, ExpectedShape::Object).unwrap().as_object().is_some());
        let raw = text(r#"[{"a": 1}, {"b": 2}]"#);
        assert_eq!(extract(&raw, ExpectedShape::Object), None);
    }

    #[test]
    fn test_markup_document() {
        let raw = text("Sure:\n<!DOCTYPE html>\n<html><body><h1>Hi</h1></body></html>");
        let payload = extract(&raw, ExpectedShape::Markup).unwrap();
        assert!(
            payload.as_object().unwrap()["html_layout"]
                .as_str()
                .unwrap()
                .starts_with("<!DOCTYPE html>")
        );
        assert_eq!(extract(&text("<div>fragment</div>"), ExpectedShape::Markup), None);
    }

    #[test]
    fn test_markup_fragment() {
        assert!(markup_fragment("  <section><h2>Cart</h2></section> ").is_some());
        assert!(markup_fragment("no markup here").is_none());
    }

    #[test]
    fn test_image_completion() {
        let raw = RawCompletion::image("https://x.test/a.png", "");
        let payload = extract(&raw, ExpectedShape::ImageRef).unwrap();
        let map = payload.as_object().unwrap();
        assert_eq!(map["image_source"], "https://x.test/a.png");
        assert_eq!(map["image_format"], "png");
        assert_eq!(extract(&raw, ExpectedShape::Object), None);
    }
}
