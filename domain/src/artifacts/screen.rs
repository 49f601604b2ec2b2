//! Rendered screen artifacts

use serde::{Deserialize, Serialize};

/// HTML layout for one screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenLayout {
    pub screen_id: String,
    pub screen_name: String,
    pub html_layout: String,
    pub generation_method: String,
}

/// Image mockup for one screen
///
/// `image_source` is a URL for provider-generated images, or an inline
/// `data:` URI for locally drawn SVG wireframes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMockup {
    pub screen_id: String,
    pub screen_name: String,
    pub image_format: String,
    pub image_source: String,
    pub generation_method: String,
    pub prompt_used: String,
}

impl ImageMockup {
    /// Inline SVG body, when the mockup was drawn locally
    pub fn inline_svg(&self) -> Option<&str> {
        self.image_source.strip_prefix(SVG_DATA_URI_PREFIX)
    }
}

/// Prefix of locally drawn SVG wireframes
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;utf8,";
