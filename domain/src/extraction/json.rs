//! Locating and parsing JSON inside free-form completions

use serde_json::Value;

/// How many cut points to try when repairing a truncated document
const MAX_REPAIR_ATTEMPTS: usize = 16;

/// Interior of the first fenced block whose info string is `tag`.
///
/// An unterminated fence runs to the end of the text.
pub(crate) fn fenced_block<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let mut rest = text;
    let mut offset = 0;
    while let Some(pos) = rest.find("```") {
        let after_ticks = offset + pos + 3;
        let tail = &text[after_ticks..];
        let line_end = tail.find('\n').unwrap_or(tail.len());
        let info = tail[..line_end].trim();

        if info.eq_ignore_ascii_case(tag) {
            let body_start = (after_ticks + line_end + 1).min(text.len());
            let body = &text[body_start..];
            let body_end = body.find("```").unwrap_or(body.len());
            return Some(&body[..body_end]);
        }

        // Skip past the whole fenced block so its closing fence is not
        // mistaken for an opening one.
        let body_start = (after_ticks + line_end + 1).min(text.len());
        let skip_to = match text[body_start..].find("```") {
            Some(close) => body_start + close + 3,
            None => return None,
        };
        offset = skip_to;
        rest = &text[skip_to..];
    }
    None
}

/// Top-level bracketed or braced spans that balance, in order.
///
/// Scanning stops at the first span that never closes; anything after it
/// is inside that span, not at top level.
pub(crate) fn balanced_spans(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' || bytes[i] == b'[' {
            match match_span(bytes, i) {
                SpanEnd::Closed(end) => {
                    spans.push(&text[i..=end]);
                    i = end + 1;
                    continue;
                }
                SpanEnd::Mismatched => {}
                SpanEnd::Unterminated => break,
            }
        }
        i += 1;
    }
    spans
}

enum SpanEnd {
    Closed(usize),
    Mismatched,
    Unterminated,
}

fn match_span(bytes: &[u8], start: usize) -> SpanEnd {
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => stack.push(b),
            b'}' | b']' => {
                let expected = if b == b'}' { b'{' } else { b'[' };
                if stack.pop() != Some(expected) {
                    return SpanEnd::Mismatched;
                }
                if stack.is_empty() {
                    return SpanEnd::Closed(i);
                }
            }
            _ => {}
        }
    }
    SpanEnd::Unterminated
}

/// Locate and parse a JSON value in a completion.
///
/// Precedence: a fenced block tagged `json`; otherwise the first top-level
/// balanced span that parses; otherwise the whole text when it starts with
/// a bracket, repairing truncated output if needed.
pub(crate) fn extract_structured(text: &str) -> Option<Value> {
    if let Some(block) = fenced_block(text, "json") {
        let block = block.trim();
        return serde_json::from_str(block)
            .ok()
            .or_else(|| repair_truncated(block));
    }

    let spans = balanced_spans(text);
    if !spans.is_empty() {
        return spans
            .into_iter()
            .find_map(|span| serde_json::from_str(span).ok());
    }

    let trimmed = text.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return serde_json::from_str(trimmed)
            .ok()
            .or_else(|| repair_truncated(trimmed));
    }
    None
}

/// Best-effort recovery of JSON cut off mid-stream.
///
/// Tries closing every open bracket at the end of the text, then at each
/// earlier comma, dropping the partial element after it.
pub(crate) fn repair_truncated(text: &str) -> Option<Value> {
    let bytes = text.as_bytes();
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut cuts: Vec<(usize, Vec<u8>)> = Vec::new();

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => stack.push(b),
            b'}' | b']' => {
                stack.pop();
            }
            b',' if !stack.is_empty() => cuts.push((i, stack.clone())),
            _ => {}
        }
    }
    if stack.is_empty() {
        return None;
    }

    let mut tail = String::from(text);
    if in_string {
        tail.push('"');
    }
    if let Some(value) = parse_closed(&tail, &stack) {
        return Some(value);
    }

    cuts.iter()
        .rev()
        .take(MAX_REPAIR_ATTEMPTS)
        .find_map(|(pos, open)| parse_closed(&text[..*pos], open))
}

fn parse_closed(prefix: &str, open: &[u8]) -> Option<Value> {
    let mut candidate = String::with_capacity(prefix.len() + open.len());
    candidate.push_str(prefix.trim_end().trim_end_matches([',', ':']));
    for &b in open.iter().rev() {
        candidate.push(if b == b'{' { '}' } else { ']' });
    }
    serde_json::from_str(&candidate).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_block_tagged_json() {
        let text = "Sure!\n```json\n{\"a\": 1}\n```\nDone.";
        assert_eq!(fenced_block(text, "json").unwrap().trim(), "{\"a\": 1}");
    }

    #[test]
    fn test_fenced_block_skips_other_tags() {
        let text = "```text\n[1]\n```\n```JSON\n[2]\n```";
        assert_eq!(fenced_block(text, "json").unwrap().trim(), "[2]");
        assert!(fenced_block("```\n[1]\n```", "json").is_none());
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let text = "```json\n[1, 2";
        assert_eq!(fenced_block(text, "json").unwrap(), "[1, 2");
    }

    #[test]
    fn test_balanced_spans_respect_strings() {
        let text = r#"Result: {"note": "a } inside", "n": [1, 2]} trailing"#;
        let spans = balanced_spans(text);
        assert_eq!(spans, vec![r#"{"note": "a } inside", "n": [1, 2]}"#]);
    }

    #[test]
    fn test_balanced_spans_stop_at_unclosed() {
        assert!(balanced_spans(r#"{"a": [1, 2"#).is_empty());
    }

    #[test]
    fn test_first_parseable_span_wins() {
        let text = r#"See [note 1]. Then {"ok": true} and {"second": 1}"#;
        assert_eq!(extract_structured(text), Some(json!({"ok": true})));
    }

    #[test]
    fn test_prose_without_json_is_none() {
        assert_eq!(extract_structured("I cannot help with that."), None);
        assert_eq!(extract_structured(""), None);
    }

    #[test]
    fn test_repair_truncated_list() {
        let text = r#"[{"id": "a"}, {"id": "b"}, {"id": "c", "quest"#;
        assert_eq!(
            extract_structured(text),
            Some(json!([{"id": "a"}, {"id": "b"}, {"id": "c"}]))
        );
    }

    #[test]
    fn test_repair_open_string() {
        let text = r#"{"designer": "Focus on trust", "analyst": "Two-sided mar"#;
        let value = extract_structured(text).unwrap();
        assert_eq!(value["designer"], "Focus on trust");
        assert_eq!(value["analyst"], "Two-sided mar");
    }

    #[test]
    fn test_repair_gives_up_on_garbage() {
        assert_eq!(repair_truncated("{{{{"), None);
        assert_eq!(repair_truncated("[1, 2]"), None);
    }
}
