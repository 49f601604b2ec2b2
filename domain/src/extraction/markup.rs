//! Locating HTML documents in completions

use super::json::fenced_block;

/// True when the text contains at least one element tag
pub fn contains_tag(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'<'
            && bytes
                .get(i + 1)
                .is_some_and(|next| next.is_ascii_alphabetic() || *next == b'!')
            && text[i..].contains('>')
    })
}

/// True when the text is a complete HTML document
pub fn is_full_document(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    (lower.contains("<html") || lower.contains("<!doctype")) && lower.contains("</html>")
}

/// The span from `<!DOCTYPE`/`<html` through the last `</html>`
pub(crate) fn document_span(text: &str) -> Option<&str> {
    let lower = text.to_ascii_lowercase();
    let start = lower.find("<!doctype").or_else(|| lower.find("<html"))?;
    let end = lower.rfind("</html>")? + "</html>".len();
    if end <= start {
        return None;
    }
    Some(&text[start..end])
}

/// A fenced `html` block, or a complete document embedded in prose
pub(crate) fn find_document(text: &str) -> Option<&str> {
    fenced_block(text, "html")
        .map(str::trim)
        .filter(|block| contains_tag(block))
        .or_else(|| document_span(text))
}
