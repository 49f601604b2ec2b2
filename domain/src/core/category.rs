//! App category classification
//!
//! Local generators and the reconciler's defaults key off a coarse category
//! inferred from the app idea. Matching is on whole lowercase tokens, checked
//! in a fixed precedence order so that an idea mentioning both a marketplace
//! and a community is always classified the same way.

use serde::{Deserialize, Serialize};

/// Coarse app category inferred from an app idea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppCategory {
    Ecommerce,
    Social,
    Health,
    Education,
    Business,
    Gaming,
    #[default]
    General,
}

/// Keyword table in precedence order; the first category with a matching
/// token wins.
const PRECEDENCE: &[(AppCategory, &[&str])] = &[
    (
        AppCategory::Ecommerce,
        &[
            "ecommerce", "commerce", "shop", "shops", "shopping", "store", "stores",
            "storefront", "marketplace", "marketplaces", "retail", "checkout", "cart",
        ],
    ),
    (
        AppCategory::Social,
        &[
            "social", "community", "communities", "network", "networking", "chat",
            "forum", "forums", "messaging", "friends",
        ],
    ),
    (
        AppCategory::Health,
        &[
            "fitness", "health", "healthcare", "workout", "workouts", "exercise",
            "medical", "wellness", "gym", "nutrition",
        ],
    ),
    (
        AppCategory::Education,
        &[
            "education", "educational", "kids", "children", "school", "schools",
            "learning", "course", "courses", "student", "students", "tutoring",
        ],
    ),
    (
        AppCategory::Business,
        &[
            "business", "enterprise", "b2b", "saas", "crm", "invoicing", "startup",
        ],
    ),
    (
        AppCategory::Gaming,
        &["game", "games", "gaming", "play", "gamer"],
    ),
];

impl AppCategory {
    /// Classify free text by keyword precedence
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        PRECEDENCE
            .iter()
            .find(|(_, keywords)| tokens.iter().any(|t| keywords.contains(t)))
            .map(|(category, _)| *category)
            .unwrap_or(AppCategory::General)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppCategory::Ecommerce => "ecommerce",
            AppCategory::Social => "social",
            AppCategory::Health => "health",
            AppCategory::Education => "education",
            AppCategory::Business => "business",
            AppCategory::Gaming => "gaming",
            AppCategory::General => "general",
        }
    }
}

impl std::fmt::Display for AppCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
