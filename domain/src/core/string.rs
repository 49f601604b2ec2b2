//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Turn a label into a lowercase snake_case identifier.
///
/// Runs of non-alphanumeric characters collapse to a single underscore.
/// Returns an empty string when the label has no alphanumeric content.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_sep = false;
    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

/// Normalize a map key for tolerant field matching.
///
/// `helpText`, `help_text`, `Help-Text` and `help text` all normalize to
/// `helptext`.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Capitalize the first character of each whitespace-separated word.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("日本語テスト", 30), "日本語テスト");
        assert_eq!(truncate("日本語テスト文字列", 15), "日本語テ...");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Product Detail"), "product_detail");
        assert_eq!(slugify("  Sign-in / Sign-up "), "sign_in_sign_up");
        assert_eq!(slugify("B2B SaaS"), "b2b_saas");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("helpText"), "helptext");
        assert_eq!(normalize_key("help_text"), "helptext");
        assert_eq!(normalize_key("Help-Text"), "helptext");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("product detail page"), "Product Detail Page");
        assert_eq!(title_case(""), "");
    }
}
