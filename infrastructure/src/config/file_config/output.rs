//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};
use tux_domain::{ConfigIssue, ConfigIssueCode, OutputFormat};

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format: "full", "summary" or "json"
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
    /// Directory to write screen HTML and mockup files into
    pub out_dir: Option<String>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            out_dir: None,
        }
    }
}

impl FileOutputConfig {
    /// Parse the format, returning warnings on failure.
    pub fn parse_format(&self) -> (Option<OutputFormat>, Vec<ConfigIssue>) {
        let Some(raw) = &self.format else {
            return (None, vec![]);
        };
        match raw.parse::<OutputFormat>() {
            Ok(format) => (Some(format), vec![]),
            Err(e) => (
                None,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnknownOutputFormat,
                    format!("output.format: {e}, falling back to 'summary'"),
                )],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_deserialize() {
        let toml_str = r#"
[output]
format = "json"
out_dir = "mockups"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.parse_format().0, Some(OutputFormat::Json));
        assert_eq!(config.output.out_dir.as_deref(), Some("mockups"));
        assert!(config.output.color);
    }

    #[test]
    fn test_unknown_format_warns() {
        let config = FileOutputConfig {
            format: Some("yaml".to_string()),
            ..Default::default()
        };
        let (format, issues) = config.parse_format();
        assert!(format.is_none());
        assert_eq!(issues[0].code, ConfigIssueCode::UnknownOutputFormat);
    }
}
