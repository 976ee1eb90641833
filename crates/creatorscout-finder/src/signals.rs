//! Partnership signals surfaced alongside accepted creators.

use crate::reason::engagement_ratio;
use crate::types::RecentVideoSample;

const CONTACT_WORDS: [&str; 6] = [
    "business",
    "contact",
    "email",
    "collaboration",
    "sponsor",
    "partnership",
];

/// Short notes on how approachable a channel looks for outreach.
#[must_use]
pub fn partnership_signals(
    description: &str,
    subscriber_count: u64,
    sample: &RecentVideoSample,
) -> Vec<String> {
    let mut signals = Vec::new();

    let lowered = description.to_lowercase();
    if CONTACT_WORDS.iter().any(|w| lowered.contains(w)) {
        signals.push("Has business contact info".to_string());
    }

    if !sample.videos.is_empty() {
        signals.push(format!(
            "Active channel ({} recent videos)",
            sample.videos.len()
        ));
    }

    let ratio = engagement_ratio(sample.avg_views, subscriber_count);
    if ratio > 0.10 {
        signals.push("High engagement (>10%)".to_string());
    } else if ratio > 0.05 {
        signals.push("Good engagement (>5%)".to_string());
    }

    signals
}
