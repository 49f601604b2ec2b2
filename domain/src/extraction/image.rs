//! Locating image references in completions

use super::json::extract_structured;
use serde_json::Value;

const URL_KEYS: &[&str] = &["image_source", "image_url", "url", "output", "image"];

/// An image reference and its format
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImageRef {
    pub source: String,
    pub format: String,
}

impl ImageRef {
    pub(crate) fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let format = guess_format(&source);
        Self { source, format }
    }
}

/// Find an image URL or data URI in a text completion
pub(crate) fn find_image_ref(text: &str) -> Option<ImageRef> {
    if let Some(Value::Object(map)) = extract_structured(text) {
        let found = URL_KEYS.iter().find_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Array(items)) => items
                .iter()
                .find_map(|v| v.as_str().map(str::to_string)),
            _ => None,
        });
        if let Some(source) = found {
            return Some(ImageRef::new(source));
        }
    }

    ["https://", "http://", "data:image/"]
        .iter()
        .filter_map(|scheme| text.find(scheme))
        .min()
        .map(|start| {
            let tail = &text[start..];
            let end = tail
                .find(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | ')' | ']' | '>' | ','))
                .unwrap_or(tail.len());
            ImageRef::new(&tail[..end])
        })
}

/// Guess an image format from a URL extension or data URI media type
pub fn guess_format(source: &str) -> String {
    if let Some(rest) = source.strip_prefix("data:image/") {
        let media = rest.split([';', ',']).next().unwrap_or("png");
        return if media.starts_with("svg") {
            "svg".to_string()
        } else {
            media.to_string()
        };
    }
    let path = source.split(['?', '#']).next().unwrap_or(source);
    match path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "webp" | "gif" | "svg") => ext,
        _ => "png".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_in_prose() {
        let found = find_image_ref("Your mockup: https://cdn.example.com/out/abc.webp (expires soon)")
            .unwrap();
        assert_eq!(found.source, "https://cdn.example.com/out/abc.webp");
        assert_eq!(found.format, "webp");
    }

    #[test]
    fn test_url_in_json_output_list() {
        let found =
            find_image_ref(r#"{"status": "succeeded", "output": ["https://x.test/a.png"]}"#).unwrap();
        assert_eq!(found.source, "https://x.test/a.png");
        assert_eq!(found.format, "png");
    }

    #[test]
    fn test_no_reference() {
        assert!(find_image_ref("I could not draw that").is_none());
    }

    #[test]
    fn test_guess_format() {
        assert_eq!(guess_format("data:image/svg+xml;utf8,<svg/>"), "svg");
        assert_eq!(guess_format("https://x.test/img.JPG?sig=1"), "jpg");
        assert_eq!(guess_format("https://x.test/render"), "png");
    }
}
