//! Category-aware clarifying questions

use crate::artifacts::{Question, QuestionOption, QuestionSet, QuestionType};
use crate::context::ContextHint;
use crate::core::category::AppCategory;
use crate::core::string::slugify;

struct QuestionDef {
    id: &'static str,
    question: &'static str,
    kind: QuestionType,
    category: &'static str,
    options: &'static [&'static str],
    required: bool,
    help_text: Option<&'static str>,
    placeholder: Option<&'static str>,
}

impl QuestionDef {
    fn build(&self) -> Question {
        Question {
            id: self.id.to_string(),
            question: self.question.to_string(),
            kind: self.kind,
            category: self.category.to_string(),
            options: options(self.options),
            required: self.required,
            help_text: self.help_text.map(str::to_string),
            placeholder: self.placeholder.map(str::to_string),
        }
    }
}

const ECOMMERCE: &[QuestionDef] = &[
    QuestionDef {
        id: "product_types",
        question: "What types of products or services will you offer?",
        kind: QuestionType::Multiselect,
        category: "business",
        options: &["Physical Goods", "Digital Products", "Services", "Subscriptions"],
        required: true,
        help_text: None,
        placeholder: None,
    },
    QuestionDef {
        id: "payment_methods",
        question: "Which payment methods do you need?",
        kind: QuestionType::Multiselect,
        category: "technical",
        options: &["Credit/Debit Cards", "PayPal", "Stripe", "Bank Transfer"],
        required: true,
        help_text: None,
        placeholder: None,
    },
];

const SOCIAL: &[QuestionDef] = &[
    QuestionDef {
        id: "social_features",
        question: "What social features are most important?",
        kind: QuestionType::Multiselect,
        category: "features",
        options: &[
            "User Profiles",
            "Direct Messaging",
            "Groups/Communities",
            "Content Sharing",
            "Live Streaming",
        ],
        required: true,
        help_text: None,
        placeholder: None,
    },
    QuestionDef {
        id: "content_moderation",
        question: "How will you handle content moderation?",
        kind: QuestionType::Select,
        category: "business",
        options: &[
            "Automated Filtering",
            "Community Reporting",
            "Manual Review",
            "AI Moderation",
        ],
        required: true,
        help_text: None,
        placeholder: None,
    },
];

const HEALTH: &[QuestionDef] = &[
    QuestionDef {
        id: "tracking_features",
        question: "What tracking features do you need?",
        kind: QuestionType::Multiselect,
        category: "features",
        options: &[
            "Workout Logging",
            "Progress Tracking",
            "Meal Planning",
            "Goal Setting",
            "Social Challenges",
        ],
        required: true,
        help_text: None,
        placeholder: None,
    },
    QuestionDef {
        id: "device_integration",
        question: "Will you integrate with fitness or health devices?",
        kind: QuestionType::Select,
        category: "technical",
        options: &[
            "Yes - Wearables",
            "Yes - Gym Equipment",
            "No Integration",
            "Future Consideration",
        ],
        required: false,
        help_text: None,
        placeholder: None,
    },
];

const GENERIC: &[QuestionDef] = &[
    QuestionDef {
        id: "key_features",
        question: "What are the 3-5 most important features?",
        kind: QuestionType::Textarea,
        category: "features",
        options: &[],
        required: true,
        help_text: Some("Be specific about what users can do"),
        placeholder: Some("List the core features your app must have"),
    },
    QuestionDef {
        id: "user_goals",
        question: "What should users achieve with your app?",
        kind: QuestionType::Textarea,
        category: "business",
        options: &[],
        required: true,
        help_text: None,
        placeholder: Some("Describe the main user goals and outcomes"),
    },
];

const CLOSING: &[QuestionDef] = &[
    QuestionDef {
        id: "design_style",
        question: "What design style best fits your brand?",
        kind: QuestionType::Select,
        category: "design",
        options: &[
            "Modern & Minimal",
            "Bold & Colorful",
            "Professional & Corporate",
            "Playful & Fun",
            "Dark & Elegant",
        ],
        required: true,
        help_text: None,
        placeholder: None,
    },
    QuestionDef {
        id: "platform",
        question: "What platforms will you target?",
        kind: QuestionType::Multiselect,
        category: "technical",
        options: &["Web (Desktop)", "Web (Mobile)", "iOS App", "Android App"],
        required: true,
        help_text: Some("Select all that apply"),
        placeholder: None,
    },
];

/// Audience choices suited to the category
pub fn audience_options(category: AppCategory) -> &'static [&'static str] {
    match category {
        AppCategory::Business => &[
            "Small Businesses",
            "Enterprise Companies",
            "Startups",
            "Freelancers",
            "Agencies",
        ],
        AppCategory::Education => &[
            "Children (6-12)",
            "Teenagers (13-17)",
            "Parents",
            "Teachers",
            "Schools",
        ],
        AppCategory::Health => &[
            "Fitness Enthusiasts",
            "Beginners",
            "Athletes",
            "Health Professionals",
            "Patients",
        ],
        AppCategory::Gaming => &[
            "Casual Gamers",
            "Hardcore Gamers",
            "Mobile Gamers",
            "Families",
            "Competitive Players",
        ],
        AppCategory::Ecommerce => &[
            "Individual Shoppers",
            "Small Sellers",
            "Service Providers",
            "Businesses",
            "Collectors",
        ],
        AppCategory::Social | AppCategory::General => &[
            "General Public",
            "Young Adults (18-34)",
            "Professionals",
            "Students",
            "Seniors",
        ],
    }
}

/// Clarifying questions for the hint's category.
///
/// Always opens with the audience question and closes with design style
/// and platform; the middle pair depends on the category.
pub fn default_questions(hint: &ContextHint) -> QuestionSet {
    let audience = Question {
        id: "target_audience".to_string(),
        question: "Who is your primary target audience?".to_string(),
        kind: QuestionType::Select,
        category: "audience".to_string(),
        options: options(audience_options(hint.category)),
        required: true,
        help_text: Some("This helps us design the right user experience".to_string()),
        placeholder: None,
    };

    let middle = match hint.category {
        AppCategory::Ecommerce => ECOMMERCE,
        AppCategory::Social => SOCIAL,
        AppCategory::Health => HEALTH,
        _ => GENERIC,
    };

    let mut questions = vec![audience];
    questions.extend(middle.iter().chain(CLOSING).map(QuestionDef::build));
    QuestionSet { questions }
}

fn options(labels: &[&str]) -> Vec<QuestionOption> {
    labels
        .iter()
        .map(|label| QuestionOption::new(slugify(label), *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketplace_questions() {
        let hint = ContextHint::from_subject("A pet-sitting marketplace");
        let set = default_questions(&hint);
        let ids: Vec<_> = set.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "target_audience",
                "product_types",
                "payment_methods",
                "design_style",
                "platform"
            ]
        );
    }

    #[test]
    fn test_every_question_is_well_formed() {
        for subject in [
            "A pet-sitting marketplace",
            "A chat app for hikers",
            "A workout planner",
            "A note taking tool",
        ] {
            let set = default_questions(&ContextHint::from_subject(subject));
            for q in &set.questions {
                assert!(!q.question.is_empty());
                assert!(!q.id.is_empty());
                assert_eq!(q.kind.has_options(), !q.options.is_empty(), "{}", q.id);
            }
        }
    }

    #[test]
    fn test_audience_options_follow_category() {
        let hint = ContextHint::from_subject("A B2B invoicing tool");
        let set = default_questions(&hint);
        assert_eq!(set.questions[0].options[0].label, "Small Businesses");
        assert_eq!(set.questions[0].options[0].value, "small_businesses");
    }
}
