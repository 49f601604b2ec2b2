//! SVG wireframe mockups

use crate::artifacts::ScreenSpec;
use crate::core::string::{escape_html, title_case};
use std::fmt::Write;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 768;
const MAX_BLOCKS: usize = 6;

/// Draw a grey-box wireframe of a screen: header bar, title and one block
/// per element.
pub fn wireframe(screen: &ScreenSpec, subject: &str) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">"
    );
    let _ = write!(
        svg,
        "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"#f5f6f8\"/>\
         <rect width=\"{WIDTH}\" height=\"64\" fill=\"#ffffff\" stroke=\"#e4e7eb\"/>\
         <text x=\"24\" y=\"40\" font-size=\"20\" fill=\"#1f2933\">{}</text>\
         <text x=\"24\" y=\"112\" font-size=\"28\" fill=\"#1f2933\">{}</text>",
        escape_html(subject),
        escape_html(&screen.name)
    );

    let labels: Vec<String> = if screen.elements.is_empty() {
        vec!["Content".to_string()]
    } else {
        screen
            .elements
            .iter()
            .take(MAX_BLOCKS)
            .map(|e| title_case(&e.replace(['_', '-'], " ")))
            .collect()
    };

    let columns = 2;
    let block_w = (WIDTH - 24 * 3) / columns;
    let rows = labels.len().div_ceil(columns as usize) as u32;
    let block_h = ((HEIGHT - 160 - 24 * rows) / rows.max(1)).min(180);
    for (i, label) in labels.iter().enumerate() {
        let col = i as u32 % columns;
        let row = i as u32 / columns;
        let x = 24 + col * (block_w + 24);
        let y = 140 + row * (block_h + 24);
        let _ = write!(
            svg,
            "<rect x=\"{x}\" y=\"{y}\" width=\"{block_w}\" height=\"{block_h}\" rx=\"8\" \
             fill=\"#ffffff\" stroke=\"#cbd2d9\"/>\
             <text x=\"{}\" y=\"{}\" font-size=\"16\" fill=\"#7b8794\">{}</text>",
            x + 16,
            y + 32,
            escape_html(label)
        );
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wireframe_has_block_per_element() {
        let mut screen = ScreenSpec::named("Shopping Cart");
        screen.elements = vec!["cart_items".to_string(), "price_summary".to_string()];
        let svg = wireframe(&screen, "Plant shop");
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Cart Items"));
        assert!(svg.contains("Price Summary"));
        assert_eq!(svg.matches("rx=\"8\"").count(), 2);
    }

    #[test]
    fn test_wireframe_caps_blocks() {
        let mut screen = ScreenSpec::named("Busy");
        screen.elements = (0..20).map(|i| format!("block_{i}")).collect();
        let svg = wireframe(&screen, "Demo");
        assert_eq!(svg.matches("rx=\"8\"").count(), MAX_BLOCKS);
    }
}
