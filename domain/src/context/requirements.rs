//! Requirements derived from answered questions

use crate::artifacts::QuestionSet;
use crate::core::app_idea::AppIdea;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured requirements fed to role analysis and synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub purpose: String,
    pub target_audience: Vec<String>,
    pub goals: Vec<String>,
    pub key_features: Vec<String>,
    /// Every resolved answer, by question id
    pub answers: BTreeMap<String, String>,
}

impl Requirements {
    /// Resolve answers against the question set.
    ///
    /// Unanswered questions take their default answer (the first option).
    /// Answers for ids that are not in the question set are kept verbatim.
    pub fn from_answers(
        app_idea: &AppIdea,
        questions: &QuestionSet,
        answers: &BTreeMap<String, String>,
    ) -> Self {
        let mut resolved = BTreeMap::new();
        for question in &questions.questions {
            let answer = answers
                .get(&question.id)
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| question.default_answer());
            if !answer.is_empty() {
                resolved.insert(question.id.clone(), answer);
            }
        }
        for (id, answer) in answers {
            if !resolved.contains_key(id) && !answer.trim().is_empty() {
                resolved.insert(id.clone(), answer.trim().to_string());
            }
        }

        let collect = |needles: &[&str]| -> Vec<String> {
            resolved
                .iter()
                .filter(|(id, _)| needles.iter().any(|n| id.contains(n)))
                .flat_map(|(_, answer)| split_list(answer))
                .collect()
        };

        Self {
            purpose: app_idea.content().to_string(),
            target_audience: collect(&["audience", "users"]),
            goals: collect(&["goal", "success"]),
            key_features: collect(&["feature", "product", "content", "tracking", "use_case"]),
            answers: resolved,
        }
    }

    /// Audience as a single phrase, if any was given
    pub fn audience_phrase(&self) -> Option<String> {
        if self.target_audience.is_empty() {
            None
        } else {
            Some(self.target_audience.join(", "))
        }
    }
}

fn split_list(answer: &str) -> Vec<String> {
    answer
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
