//! Role insights written from templates

use crate::artifacts::RoleInsights;
use crate::context::ContextHint;
use crate::core::category::AppCategory;

fn designer_focus(category: AppCategory) -> &'static str {
    match category {
        AppCategory::Ecommerce => "make browsing, comparison and checkout feel effortless and trustworthy",
        AppCategory::Social => "make posting and replying fast, and keep the feed readable",
        AppCategory::Health => "keep daily logging to a few taps and celebrate progress visibly",
        AppCategory::Education => "use clear, encouraging visuals with generous touch targets",
        AppCategory::Business => "favour dense but scannable layouts with strong information hierarchy",
        AppCategory::Gaming => "keep menus out of the way and surface rewards and progress",
        AppCategory::General => "focus on intuitive navigation and clear visual hierarchy",
    }
}

fn analyst_metric(category: AppCategory) -> &'static str {
    match category {
        AppCategory::Ecommerce => "conversion rate, average order value and repeat purchases",
        AppCategory::Social => "daily active users, posts per user and retention",
        AppCategory::Health => "logging streaks, goal completion and 30-day retention",
        AppCategory::Education => "lesson completion, time on task and return visits",
        AppCategory::Business => "activation, seats per account and churn",
        AppCategory::Gaming => "session length, day-7 retention and progression",
        AppCategory::General => "user adoption, task completion rates and retention",
    }
}

fn architect_concern(category: AppCategory) -> &'static str {
    match category {
        AppCategory::Ecommerce => "inventory consistency, payment provider integration and PCI scope",
        AppCategory::Social => "feed fan-out, moderation pipelines and real-time messaging",
        AppCategory::Health => "privacy of health data, device sync and offline logging",
        AppCategory::Education => "content delivery, progress tracking and child-safe data handling",
        AppCategory::Business => "multi-tenancy, role-based access control and audit trails",
        AppCategory::Gaming => "low-latency state sync, leaderboards and anti-cheat checks",
        AppCategory::General => "clear data models, API structure and security measures",
    }
}

/// One insight per role, worded for the hint's subject and audience
pub fn default_insights(hint: &ContextHint) -> RoleInsights {
    let subject = &hint.subject;
    let audience = &hint.audience;
    RoleInsights {
        designer: format!(
            "For {subject} targeting {audience}, {}. Use familiar patterns that {audience} \
             expect, with consistent interactions and subtle micro-animations that support \
             usability without overwhelming users.",
            designer_focus(hint.category)
        ),
        analyst: format!(
            "{subject} must address core user needs through well-defined user stories. Key \
             metrics should include {}. Compare against competing products and make sure \
             features align with what {audience} expect.",
            analyst_metric(hint.category)
        ),
        architect: format!(
            "Design a scalable architecture that supports the growth of {subject}. Pay \
             particular attention to {}, and plan for performance optimization and the \
             third-party integrations {audience} are likely to expect.",
            architect_concern(hint.category)
        ),
    }
}
