//! Human-readable rationale for accepted creators.

use std::collections::HashMap;

use creatorscout_core::TargetsConfig;

/// Used for categories with no configured template.
pub const GENERIC_REASON_TEMPLATE: &str = "Active creator. {engagement}.";

const ENGAGEMENT_PLACEHOLDER: &str = "{engagement}";

/// Category rationale templates and tier closing notes, built once per run.
#[derive(Debug, Clone, Default)]
pub struct ReasonTemplates {
    categories: HashMap<String, String>,
    tier_notes: HashMap<String, String>,
}

/// The record fields a rationale depends on.
#[derive(Debug, Clone, Copy)]
pub struct ReasonFacts<'a> {
    pub category: &'a str,
    pub tier: &'a str,
    pub subscriber_count: u64,
    pub avg_views: u64,
}

impl ReasonTemplates {
    #[must_use]
    pub fn from_targets(targets: &TargetsConfig) -> Self {
        let categories = targets
            .categories
            .iter()
            .filter_map(|c| {
                c.reason
                    .as_ref()
                    .filter(|r| !r.trim().is_empty())
                    .map(|r| (c.name.clone(), r.clone()))
            })
            .collect();
        let tier_notes = targets
            .tiers
            .iter()
            .filter(|t| !t.note.trim().is_empty())
            .map(|t| (t.name.clone(), t.note.trim().to_string()))
            .collect();
        Self {
            categories,
            tier_notes,
        }
    }

    /// Category template with the engagement descriptor filled in, followed
    /// by the tier note when the tier has one.
    #[must_use]
    pub fn explain(&self, facts: &ReasonFacts<'_>) -> String {
        let descriptor =
            engagement_descriptor(engagement_ratio(facts.avg_views, facts.subscriber_count));
        let template = self
            .categories
            .get(facts.category)
            .map_or(GENERIC_REASON_TEMPLATE, String::as_str);
        let mut reason = template.replace(ENGAGEMENT_PLACEHOLDER, descriptor);

        if let Some(note) = self.tier_notes.get(facts.tier) {
            if !reason.is_empty() {
                reason.push(' ');
            }
            reason.push_str(note);
        }
        reason
    }
}

/// `avg_views / subscriber_count`, or zero when there are no subscribers.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_ratio(avg_views: u64, subscriber_count: u64) -> f64 {
    if subscriber_count == 0 {
        return 0.0;
    }
    avg_views as f64 / subscriber_count as f64
}

#[must_use]
pub fn engagement_descriptor(ratio: f64) -> &'static str {
    if ratio > 0.10 {
        "Very high engagement rate"
    } else if ratio > 0.05 {
        "Strong engagement rate"
    } else if ratio > 0.02 {
        "Good engagement rate"
    } else {
        "Growing channel"
    }
}
