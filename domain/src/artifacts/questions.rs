//! Clarifying question records

use serde::{Deserialize, Serialize};

/// Input control a question is answered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Select,
    Multiselect,
    Number,
    Textarea,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Select => "select",
            QuestionType::Multiselect => "multiselect",
            QuestionType::Number => "number",
            QuestionType::Textarea => "textarea",
        }
    }

    pub fn has_options(&self) -> bool {
        matches!(self, QuestionType::Select | QuestionType::Multiselect)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
    pub description: Option<String>,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
        }
    }
}

/// A clarifying question shown to the user before synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub category: String,
    pub options: Vec<QuestionOption>,
    pub required: bool,
    pub help_text: Option<String>,
    pub placeholder: Option<String>,
}

impl Question {
    /// The answer assumed when the user gives none: the first option's
    /// label, or an empty string for free-text questions.
    pub fn default_answer(&self) -> String {
        self.options
            .first()
            .map(|o| o.label.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_serializes_type_key() {
        let q = Question {
            id: "platform".to_string(),
            question: "Which platforms?".to_string(),
            kind: QuestionType::Multiselect,
            category: "technical".to_string(),
            options: vec![QuestionOption::new("web", "Web")],
            required: true,
            help_text: None,
            placeholder: None,
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "multiselect");
        assert!(json.get("kind").is_none());
        assert_eq!(q.default_answer(), "Web");
    }
}
