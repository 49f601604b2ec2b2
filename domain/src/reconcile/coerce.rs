//! Per-kind value coercions
//!
//! Each function returns `None` when the value cannot stand in for the
//! field, which makes the reconciler fall back to the field default.

use crate::core::string::normalize_key;
use crate::extraction::{contains_tag, is_full_document};
use crate::local::html::document_shell;
use serde_json::{Map, Value};

const TRUE_WORDS: &[&str] = &["true", "yes", "y", "1", "required", "on"];
const FALSE_WORDS: &[&str] = &["false", "no", "n", "0", "optional", "off"];
const LABEL_KEYS: &[&str] = &["name", "label", "title", "value", "text"];

pub(super) fn text(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(Value::String(s.trim().to_string())),
        Value::Number(_) | Value::Bool(_) => Some(Value::String(value.to_string())),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_string).collect();
            if parts.is_empty() {
                None
            } else {
                Some(Value::String(parts.join(", ")))
            }
        }
        _ => None,
    }
}

pub(super) fn boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::Number(n) => n.as_f64().map(|f| Value::Bool(f != 0.0)),
        Value::String(s) => {
            let s = s.trim().to_lowercase();
            if TRUE_WORDS.contains(&s.as_str()) {
                Some(Value::Bool(true))
            } else if FALSE_WORDS.contains(&s.as_str()) {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        _ => None,
    }
}

pub(super) fn text_list(value: &Value) -> Option<Value> {
    let items: Vec<Value> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(
                    LABEL_KEYS
                        .iter()
                        .find_map(|k| map.get(*k).and_then(Value::as_str))
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string()),
                ),
                other => scalar_string(other),
            })
            .map(Value::String)
            .collect(),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            scalar_string(value).map(Value::String).into_iter().collect()
        }
        _ => Vec::new(),
    };
    if items.is_empty() {
        None
    } else {
        Some(Value::Array(items))
    }
}

pub(super) fn text_map(value: &Value) -> Option<Value> {
    let Value::Object(map) = value else {
        return None;
    };
    let out: Map<String, Value> = map
        .iter()
        .filter_map(|(k, v)| {
            let s = match v {
                Value::Null => return None,
                Value::Array(_) | Value::Object(_) => v.to_string(),
                other => scalar_string(other)?,
            };
            Some((k.clone(), Value::String(s)))
        })
        .collect();
    non_empty(out)
}

pub(super) fn nested_text_map(value: &Value) -> Option<Value> {
    let Value::Object(map) = value else {
        return None;
    };
    let out: Map<String, Value> = map
        .iter()
        .filter_map(|(k, v)| {
            let inner = match v {
                Value::Object(_) => text_map(v)?,
                Value::Null => return None,
                other => {
                    let mut wrapped = Map::new();
                    wrapped.insert("value".to_string(), text(other)?);
                    Value::Object(wrapped)
                }
            };
            Some((k.clone(), inner))
        })
        .collect();
    non_empty(out)
}

pub(super) fn json_object(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) if !map.is_empty() => Some(value.clone()),
        _ => None,
    }
}

/// Map a synonym to its canonical choice, comparing normalized keys
pub(super) fn choice(value: &Value, table: &[(&str, &str)]) -> Option<Value> {
    let wanted = normalize_key(value.as_str()?);
    table
        .iter()
        .find(|(synonym, _)| normalize_key(synonym) == wanted)
        .map(|(_, canonical)| Value::String(canonical.to_string()))
}

/// A full HTML document, or a fragment wrapped in a document shell
pub(super) fn document(value: &Value, title: &str) -> Option<Value> {
    let markup = value.as_str()?.trim();
    if is_full_document(markup) {
        Some(Value::String(markup.to_string()))
    } else if contains_tag(markup) {
        Some(Value::String(document_shell(title, markup)))
    } else {
        None
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        _ => None,
    }
}

fn non_empty(map: Map<String, Value>) -> Option<Value> {
    if map.is_empty() {
        None
    } else {
        Some(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::QUESTION_TYPE_SYNONYMS;
    use serde_json::json;

    #[test]
    fn test_text() {
        assert_eq!(text(&json!("  hi ")), Some(json!("hi")));
        assert_eq!(text(&json!(42)), Some(json!("42")));
        assert_eq!(text(&json!(["a", "b"])), Some(json!("a, b")));
        assert_eq!(text(&json!("   ")), None);
        assert_eq!(text(&json!({"a": 1})), None);
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean(&json!("Yes")), Some(json!(true)));
        assert_eq!(boolean(&json!("optional")), Some(json!(false)));
        assert_eq!(boolean(&json!(0)), Some(json!(false)));
        assert_eq!(boolean(&json!("maybe")), None);
    }

    #[test]
    fn test_text_list() {
        assert_eq!(text_list(&json!("solo")), Some(json!(["solo"])));
        assert_eq!(
            text_list(&json!([{"name": "Search"}, "Filters", 3, null])),
            Some(json!(["Search", "Filters", "3"]))
        );
        assert_eq!(text_list(&json!([])), None);
    }

    #[test]
    fn test_maps() {
        assert_eq!(
            text_map(&json!({"mobile": "0-767px", "columns": 2, "x": null})),
            Some(json!({"mobile": "0-767px", "columns": "2"}))
        );
        assert_eq!(
            nested_text_map(&json!({"buttons": {"hover": "lift"}, "cards": "flat"})),
            Some(json!({"buttons": {"hover": "lift"}, "cards": {"value": "flat"}}))
        );
        assert_eq!(text_map(&json!({})), None);
    }

    #[test]
    fn test_choice_synonyms() {
        assert_eq!(
            choice(&json!("single_select"), QUESTION_TYPE_SYNONYMS),
            Some(json!("select"))
        );
        assert_eq!(
            choice(&json!("Multi-Select"), QUESTION_TYPE_SYNONYMS),
            Some(json!("multiselect"))
        );
        assert_eq!(
            choice(&json!("priority_rank"), QUESTION_TYPE_SYNONYMS),
            Some(json!("multiselect"))
        );
        assert_eq!(choice(&json!("hologram"), QUESTION_TYPE_SYNONYMS), None);
    }

    #[test]
    fn test_document_wraps_fragment() {
        let wrapped = document(&json!("<main>Cart</main>"), "Cart").unwrap();
        let html = wrapped.as_str().unwrap();
        assert!(is_full_document(html));
        assert!(html.contains("<main>Cart</main>"));
        assert_eq!(document(&json!("just words"), "Cart"), None);
    }
}
