//! Specification facets built from templates

use crate::artifacts::{
    ApiEndpoint, ComponentLibrary, DataModel, Entity, EntityAttribute, InteractionPatterns,
    Library, NestedTextMap, ResponsiveRules, ScreenSet, ScreenSpec, SeoRules,
};
use crate::context::ContextHint;
use crate::core::category::AppCategory;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

struct ScreenDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    elements: &'static [&'static str],
    user_flow: &'static str,
    interactions: &'static [&'static str],
    layout_type: &'static str,
}

impl ScreenDef {
    fn build(&self) -> ScreenSpec {
        ScreenSpec {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            elements: strings(self.elements),
            user_flow: self.user_flow.to_string(),
            interactions: strings(self.interactions),
            layout_type: self.layout_type.to_string(),
        }
    }
}

const LANDING: ScreenDef = ScreenDef {
    id: "landing",
    name: "Landing Page",
    description: "First impression with a clear value proposition",
    elements: &["hero_section", "navigation", "cta_button", "features_overview"],
    user_flow: "Entry point for new users",
    interactions: &["smooth_scroll", "hover_effects", "cta_click"],
    layout_type: "single_column",
};

const ECOMMERCE_SCREENS: &[ScreenDef] = &[
    ScreenDef {
        id: "product_list",
        name: "Product Catalog",
        description: "Browse and filter listings",
        elements: &["search_bar", "filters", "product_grid", "sort_options", "pagination"],
        user_flow: "Users browse listings, apply filters and select items",
        interactions: &["filter_toggle", "quick_view", "add_to_cart"],
        layout_type: "grid",
    },
    ScreenDef {
        id: "product_detail",
        name: "Product Details",
        description: "Detailed information about a single listing",
        elements: &["image_gallery", "product_info", "add_to_cart", "reviews", "related_products"],
        user_flow: "Users view details and make a purchase decision",
        interactions: &["image_zoom", "variant_selection", "quantity_change"],
        layout_type: "two_column",
    },
    ScreenDef {
        id: "shopping_cart",
        name: "Shopping Cart",
        description: "Review and modify selected items",
        elements: &["cart_items", "quantity_controls", "price_summary", "checkout_button"],
        user_flow: "Users review the cart and proceed to checkout",
        interactions: &["quantity_update", "remove_item", "apply_coupon"],
        layout_type: "two_column",
    },
];

const SOCIAL_SCREENS: &[ScreenDef] = &[
    ScreenDef {
        id: "feed",
        name: "Activity Feed",
        description: "Main content stream",
        elements: &["post_cards", "create_post", "filters", "trending_topics"],
        user_flow: "Users scroll through content and interact",
        interactions: &["like", "comment", "share", "infinite_scroll"],
        layout_type: "single_column",
    },
    ScreenDef {
        id: "profile",
        name: "User Profile",
        description: "User information and activity",
        elements: &["profile_header", "bio", "activity_tabs", "followers_count"],
        user_flow: "Users view and edit their profile",
        interactions: &["edit_profile", "follow_button", "tab_switching"],
        layout_type: "single_column",
    },
];

const HEALTH_SCREENS: &[ScreenDef] = &[
    ScreenDef {
        id: "dashboard",
        name: "Dashboard",
        description: "Today's activity, goals and streaks",
        elements: &["summary_cards", "goal_progress", "quick_log", "recent_activity"],
        user_flow: "Central hub users open every day",
        interactions: &["card_click", "quick_log", "pull_to_refresh"],
        layout_type: "dashboard",
    },
    ScreenDef {
        id: "activity_log",
        name: "Activity Log",
        description: "Record a workout, meal or measurement",
        elements: &["activity_type_picker", "form_fields", "timer", "save_button"],
        user_flow: "Users log an activity in a few taps",
        interactions: &["type_select", "form_input", "save_entry"],
        layout_type: "form",
    },
    ScreenDef {
        id: "progress",
        name: "Progress",
        description: "Trends over time",
        elements: &["charts", "date_range_picker", "milestones"],
        user_flow: "Users review how they are doing over weeks and months",
        interactions: &["range_switch", "chart_tooltip"],
        layout_type: "dashboard",
    },
];

const EDUCATION_SCREENS: &[ScreenDef] = &[
    ScreenDef {
        id: "course_catalog",
        name: "Course Catalog",
        description: "Browse available courses and lessons",
        elements: &["search_bar", "category_tabs", "course_cards"],
        user_flow: "Learners pick what to study next",
        interactions: &["tab_switching", "card_click"],
        layout_type: "grid",
    },
    ScreenDef {
        id: "lesson",
        name: "Lesson",
        description: "A single lesson with content and exercises",
        elements: &["lesson_content", "progress_bar", "exercise", "next_button"],
        user_flow: "Learners work through a lesson step by step",
        interactions: &["answer_submit", "hint_reveal", "next_step"],
        layout_type: "single_column",
    },
];

const GENERIC_SCREENS: &[ScreenDef] = &[
    ScreenDef {
        id: "dashboard",
        name: "Dashboard",
        description: "Main application interface",
        elements: &["navigation", "summary_cards", "quick_actions", "recent_activity"],
        user_flow: "Central hub for user activities",
        interactions: &["card_click", "navigation", "quick_action_buttons"],
        layout_type: "dashboard",
    },
    ScreenDef {
        id: "settings",
        name: "Settings",
        description: "User preferences and configuration",
        elements: &["settings_menu", "form_fields", "save_button", "danger_zone"],
        user_flow: "Users customize their experience",
        interactions: &["toggle_switches", "form_input", "save_changes"],
        layout_type: "form",
    },
];

/// Landing page plus the category's core screens
pub fn default_screens(hint: &ContextHint) -> ScreenSet {
    let specific = match hint.category {
        AppCategory::Ecommerce => ECOMMERCE_SCREENS,
        AppCategory::Social => SOCIAL_SCREENS,
        AppCategory::Health => HEALTH_SCREENS,
        AppCategory::Education => EDUCATION_SCREENS,
        AppCategory::Business | AppCategory::Gaming | AppCategory::General => GENERIC_SCREENS,
    };
    ScreenSet {
        screens: std::iter::once(&LANDING)
            .chain(specific)
            .map(ScreenDef::build)
            .collect(),
    }
}

fn attribute(name: &str, data_type: &str, required: bool) -> EntityAttribute {
    EntityAttribute {
        name: name.to_string(),
        data_type: data_type.to_string(),
        required,
    }
}

fn entity(name: &str, attributes: Vec<EntityAttribute>, relationships: &[&str]) -> Entity {
    Entity {
        name: name.to_string(),
        attributes,
        relationships: strings(relationships),
    }
}

fn endpoint(method: &str, path: &str, description: &str) -> ApiEndpoint {
    ApiEndpoint {
        method: method.to_string(),
        path: path.to_string(),
        description: description.to_string(),
    }
}

/// User entity and auth endpoints, plus category entities
pub fn default_data_model(hint: &ContextHint) -> DataModel {
    let mut entities = vec![entity(
        "User",
        vec![
            attribute("id", "UUID", true),
            attribute("email", "string", true),
            attribute("username", "string", true),
            attribute("created_at", "timestamp", true),
        ],
        &["has many Sessions"],
    )];
    let mut relationships = vec!["User has many Sessions".to_string()];
    let mut api_endpoints = vec![
        endpoint("POST", "/api/auth/register", "User registration"),
        endpoint("POST", "/api/auth/login", "User login"),
        endpoint("GET", "/api/users/profile", "Get user profile"),
    ];

    match hint.category {
        AppCategory::Ecommerce => {
            entities.push(entity(
                "Product",
                vec![
                    attribute("id", "UUID", true),
                    attribute("name", "string", true),
                    attribute("price", "decimal", true),
                    attribute("stock", "integer", true),
                ],
                &["belongs to Category", "has many Reviews"],
            ));
            entities.push(entity(
                "Order",
                vec![
                    attribute("id", "UUID", true),
                    attribute("user_id", "UUID", true),
                    attribute("total", "decimal", true),
                    attribute("status", "enum", true),
                ],
                &["belongs to User", "has many OrderItems"],
            ));
            relationships.push("User has many Orders".to_string());
            api_endpoints.push(endpoint("GET", "/api/products", "List products"));
            api_endpoints.push(endpoint("POST", "/api/orders", "Create order"));
        }
        AppCategory::Social => {
            entities.push(entity(
                "Post",
                vec![
                    attribute("id", "UUID", true),
                    attribute("author_id", "UUID", true),
                    attribute("body", "text", true),
                    attribute("created_at", "timestamp", true),
                ],
                &["belongs to User", "has many Comments"],
            ));
            relationships.push("User has many Posts".to_string());
            api_endpoints.push(endpoint("GET", "/api/feed", "List feed posts"));
            api_endpoints.push(endpoint("POST", "/api/posts", "Create post"));
        }
        AppCategory::Health => {
            entities.push(entity(
                "Activity",
                vec![
                    attribute("id", "UUID", true),
                    attribute("user_id", "UUID", true),
                    attribute("kind", "enum", true),
                    attribute("recorded_at", "timestamp", true),
                ],
                &["belongs to User"],
            ));
            relationships.push("User has many Activities".to_string());
            api_endpoints.push(endpoint("GET", "/api/activities", "List activities"));
            api_endpoints.push(endpoint("POST", "/api/activities", "Log activity"));
        }
        AppCategory::Education => {
            entities.push(entity(
                "Course",
                vec![
                    attribute("id", "UUID", true),
                    attribute("title", "string", true),
                    attribute("level", "enum", false),
                ],
                &["has many Lessons"],
            ));
            relationships.push("User has many Enrollments".to_string());
            api_endpoints.push(endpoint("GET", "/api/courses", "List courses"));
        }
        AppCategory::Business | AppCategory::Gaming | AppCategory::General => {}
    }

    let mut validation_rules = Map::new();
    validation_rules.insert("email".to_string(), json!("RFC 5322 address, unique"));
    validation_rules.insert("username".to_string(), json!("3-30 characters, unique"));

    DataModel {
        entities,
        relationships,
        api_endpoints,
        validation_rules,
    }
}

type Pairs = &'static [(&'static str, &'static str)];

const BUTTON_PATTERNS: Pairs = &[
    ("hover", "Slight scale (1.02) with shadow"),
    ("active", "Scale down (0.98)"),
    ("disabled", "Opacity 0.5, cursor not-allowed"),
];
const FORM_PATTERNS: Pairs = &[
    ("validation", "Real-time with debounce"),
    ("errors", "Inline, in the error color"),
    ("success", "Checkmark with message"),
];
const CARD_PATTERNS: Pairs = &[
    ("hover", "Elevate with shadow"),
    ("click", "Ripple effect from click point"),
];

const MOBILE_LAYOUT: Pairs = &[("columns", "1"), ("padding", "16px"), ("font_size", "14px")];
const TABLET_LAYOUT: Pairs = &[("columns", "2"), ("padding", "24px"), ("font_size", "16px")];
const DESKTOP_LAYOUT: Pairs = &[("columns", "3"), ("padding", "32px"), ("font_size", "16px")];
const MOBILE_TYPE: Pairs = &[("h1", "24px"), ("h2", "20px"), ("body", "14px")];
const DESKTOP_TYPE: Pairs = &[("h1", "32px"), ("h2", "24px"), ("body", "16px")];

fn text_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn nested(groups: &[(&str, Pairs)]) -> NestedTextMap {
    groups
        .iter()
        .map(|(group, pairs)| (group.to_string(), text_map(pairs)))
        .collect()
}

pub fn default_interaction_patterns(hint: &ContextHint) -> InteractionPatterns {
    let mut micro_interactions = strings(&[
        "Button press feedback",
        "Loading spinners",
        "Success checkmarks",
        "Error shake animation",
        "Tooltip on hover",
    ]);
    match hint.category {
        AppCategory::Ecommerce => micro_interactions.push("Add-to-cart confirmation".to_string()),
        AppCategory::Social => micro_interactions.push("Like burst animation".to_string()),
        AppCategory::Health => micro_interactions.push("Goal reached celebration".to_string()),
        _ => {}
    }

    InteractionPatterns {
        global_patterns: nested(&[
            ("buttons", BUTTON_PATTERNS),
            ("forms", FORM_PATTERNS),
            ("cards", CARD_PATTERNS),
        ]),
        transitions: text_map(&[
            ("page_transition", "Fade 200ms ease-out"),
            ("modal_animation", "Slide up 300ms ease-out"),
            ("tab_switch", "Slide horizontal 150ms"),
        ]),
        micro_interactions,
    }
}

pub fn default_responsive_rules() -> ResponsiveRules {
    ResponsiveRules {
        breakpoints: text_map(&[
            ("mobile", "0-767px"),
            ("tablet", "768px-1023px"),
            ("desktop", "1024px-1439px"),
            ("wide", "1440px+"),
        ]),
        layout_rules: nested(&[
            ("mobile", MOBILE_LAYOUT),
            ("tablet", TABLET_LAYOUT),
            ("desktop", DESKTOP_LAYOUT),
        ]),
        typography: nested(&[("mobile", MOBILE_TYPE), ("desktop", DESKTOP_TYPE)]),
        touch_targets: text_map(&[("minimum", "44px"), ("spacing", "8px")]),
    }
}

pub fn default_seo_rules(hint: &ContextHint) -> SeoRules {
    let mut seo = Map::new();
    seo.insert(
        "meta_tags".to_string(),
        json!(["title", "description", "og:image", "og:title", "og:description"]),
    );
    seo.insert("structured_data".to_string(), json!("Use schema.org markup"));
    seo.insert(
        "content_guidelines".to_string(),
        json!(["Semantic HTML5", "Proper heading hierarchy", "Alt text for images"]),
    );
    if hint.category == AppCategory::Ecommerce {
        seo.insert(
            "product_markup".to_string(),
            json!("schema.org Product and Offer on every listing"),
        );
    }

    let mut performance = Map::new();
    performance.insert(
        "targets".to_string(),
        json!({"fcp": "< 1.8s", "lcp": "< 2.5s", "cls": "< 0.1", "tti": "< 3.8s"}),
    );
    performance.insert(
        "optimization".to_string(),
        json!([
            "Lazy load images",
            "Code splitting",
            "Minimize bundle size",
            "Cache static assets"
        ]),
    );

    let mut image_optimization = Map::new();
    image_optimization.insert("formats".to_string(), json!(["webp", "avif"]));
    image_optimization.insert("responsive_images".to_string(), Value::Bool(true));
    image_optimization.insert("lazy_loading".to_string(), Value::Bool(true));

    SeoRules {
        seo,
        performance,
        image_optimization,
    }
}

fn library(name: &str, reason: &str, pros: &[&str], cons: &[&str]) -> Library {
    Library {
        name: name.to_string(),
        reason: reason.to_string(),
        pros: strings(pros),
        cons: strings(cons),
    }
}

/// Material-UI for business apps, Ant Design otherwise
pub fn default_component_library(hint: &ContextHint) -> ComponentLibrary {
    let primary_name = if hint.category == AppCategory::Business {
        "Material-UI"
    } else {
        "Ant Design"
    };

    let mut component_mapping = Map::new();
    for (element, component) in [
        ("navigation", "Menu"),
        ("forms", "Form"),
        ("cards", "Card"),
        ("modals", "Modal"),
        ("tables", "Table"),
    ] {
        component_mapping.insert(element.to_string(), json!(component));
    }

    ComponentLibrary {
        primary_library: library(
            primary_name,
            "Comprehensive component set with excellent documentation and community support",
            &[
                "Production-ready components",
                "Accessibility built-in",
                "Theming support",
            ],
            &[
                "Learning curve for customization",
                "Bundle size considerations",
            ],
        ),
        alternative_libraries: vec![
            library("Chakra UI", "Modern and highly customizable", &[], &[]),
            library("Tailwind UI", "Utility-first with pre-built components", &[], &[]),
        ],
        component_mapping,
        custom_components: Vec::new(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screens_per_category() {
        let shop = default_screens(&ContextHint::from_subject("An online shop for plants"));
        let ids: Vec<_> = shop.screens.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["landing", "product_list", "product_detail", "shopping_cart"]);

        let general = default_screens(&ContextHint::from_subject("A note taking tool"));
        let ids: Vec<_> = general.screens.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["landing", "dashboard", "settings"]);
    }

    #[test]
    fn test_data_model_always_has_user() {
        for subject in ["An online shop for plants", "A note taking tool"] {
            let model = default_data_model(&ContextHint::from_subject(subject));
            assert_eq!(model.entities[0].name, "User");
            assert!(model.api_endpoints.len() >= 3);
        }
        let shop = default_data_model(&ContextHint::from_subject("An online shop for plants"));
        assert!(shop.entities.iter().any(|e| e.name == "Order"));
    }

    #[test]
    fn test_component_library_choice() {
        let business = default_component_library(&ContextHint::from_subject("A B2B invoicing tool"));
        assert_eq!(business.primary_library.name, "Material-UI");
        let other = default_component_library(&ContextHint::from_subject("A recipe sharing app"));
        assert_eq!(other.primary_library.name, "Ant Design");
    }

    #[test]
    fn test_responsive_breakpoints() {
        let rules = default_responsive_rules();
        assert_eq!(rules.breakpoints["mobile"], "0-767px");
        assert_eq!(rules.breakpoints["wide"], "1440px+");
    }
}
