//! Screen generation mode

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which artifacts the orchestrator produces per screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// HTML layouts only
    #[default]
    Html,
    /// Image mockups only
    Image,
    /// Both
    Hybrid,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Html => "html",
            GenerationMode::Image => "image",
            GenerationMode::Hybrid => "hybrid",
        }
    }

    /// HTML layouts are rendered in every mode except `image`
    pub fn includes_layouts(&self) -> bool {
        !matches!(self, GenerationMode::Image)
    }

    pub fn includes_images(&self) -> bool {
        matches!(self, GenerationMode::Image | GenerationMode::Hybrid)
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(GenerationMode::Html),
            "image" | "images" => Ok(GenerationMode::Image),
            "hybrid" | "both" => Ok(GenerationMode::Hybrid),
            other => Err(DomainError::UnknownGenerationMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flags() {
        assert!(GenerationMode::Html.includes_layouts());
        assert!(!GenerationMode::Html.includes_images());
        assert!(!GenerationMode::Image.includes_layouts());
        assert!(GenerationMode::Hybrid.includes_layouts());
        assert!(GenerationMode::Hybrid.includes_images());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Hybrid".parse::<GenerationMode>().unwrap(), GenerationMode::Hybrid);
        assert_eq!(
            "video".parse::<GenerationMode>(),
            Err(DomainError::UnknownGenerationMode("video".to_string()))
        );
    }
}
