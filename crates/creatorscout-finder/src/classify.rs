//! Tier assignment, deduplication, quotas and the engagement floor.

use std::collections::{HashMap, HashSet};

use creatorscout_core::{CategoryConfig, Quota, TargetsConfig, TierBand};
use creatorscout_youtube::ChannelStats;

use crate::format::{format_subscriber_count, format_view_range, truncate_chars};
use crate::reason::{ReasonFacts, ReasonTemplates};
use crate::signals::partnership_signals;
use crate::types::{
    ChannelCandidate, CreatorRecord, RecentVideoSample, Rejection, RECORD_DESCRIPTION_CHARS,
};

/// The band containing `subscribers`.
///
/// Counts at or above the last band's lower bound fall back to the last band,
/// so the top of the ladder is open-ended. `None` means unclassifiable.
#[must_use]
pub fn assign_tier(tiers: &[TierBand], subscribers: u64) -> Option<&TierBand> {
    tiers
        .iter()
        .find(|t| t.contains(subscribers))
        .or_else(|| tiers.last().filter(|top| subscribers >= top.min))
}

/// Acceptance bookkeeping for one run. Only [`RunState::record`] mutates it,
/// and only after a channel has passed every check.
#[derive(Debug, Default)]
pub struct RunState {
    seen_ids: HashSet<String>,
    tier_counts: HashMap<String, u32>,
    category_tier_counts: HashMap<(String, String), u32>,
}

impl RunState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_seen(&self, channel_id: &str) -> bool {
        self.seen_ids.contains(channel_id)
    }

    #[must_use]
    pub fn seen_ids(&self) -> &HashSet<String> {
        &self.seen_ids
    }

    #[must_use]
    pub fn tier_count(&self, tier: &str) -> u32 {
        self.tier_counts.get(tier).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn category_tier_count(&self, category: &str, tier: &str) -> u32 {
        self.category_tier_counts
            .get(&(category.to_string(), tier.to_string()))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn category_count(&self, category: &str) -> u32 {
        self.category_tier_counts
            .iter()
            .filter(|((c, _), _)| c == category)
            .map(|(_, n)| *n)
            .sum()
    }

    pub fn record(&mut self, record: &CreatorRecord) {
        self.seen_ids.insert(record.channel_id.clone());
        *self.tier_counts.entry(record.tier.clone()).or_insert(0) += 1;
        *self
            .category_tier_counts
            .entry((record.category.clone(), record.tier.clone()))
            .or_insert(0) += 1;
    }
}

/// Decides whether candidates become [`CreatorRecord`]s.
#[derive(Debug)]
pub struct Classifier<'a> {
    targets: &'a TargetsConfig,
    reasons: ReasonTemplates,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub fn new(targets: &'a TargetsConfig) -> Self {
        Self {
            targets,
            reasons: ReasonTemplates::from_targets(targets),
        }
    }

    /// Checks that do not need recent-upload statistics: duplicate,
    /// unresolvable, out of range, quota met. Returns the tier on success.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] that applies.
    pub fn screen(
        &self,
        state: &RunState,
        category: &CategoryConfig,
        channel_id: &str,
        stats: Option<&ChannelStats>,
    ) -> Result<&'a TierBand, Rejection> {
        if state.is_seen(channel_id) {
            return Err(Rejection::Duplicate);
        }
        let stats = stats.ok_or(Rejection::Unresolvable)?;

        let targets: &'a TargetsConfig = self.targets;
        let subscribers = stats.subscriber_count;
        if !targets.within_bounds(subscribers) {
            return Err(Rejection::OutOfRange { subscribers });
        }
        let tier = assign_tier(&targets.tiers, subscribers)
            .ok_or(Rejection::OutOfRange { subscribers })?;

        if quota_met(state, category, &tier.name) {
            return Err(Rejection::QuotaMet {
                tier: tier.name.clone(),
            });
        }
        Ok(tier)
    }

    /// Every check, in order, without touching `state`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] that applies.
    pub fn evaluate(
        &self,
        state: &RunState,
        category: &CategoryConfig,
        candidate: &ChannelCandidate,
        stats: Option<&ChannelStats>,
        sample: &RecentVideoSample,
    ) -> Result<CreatorRecord, Rejection> {
        let tier = self.screen(state, category, &candidate.channel_id, stats)?;
        let stats = stats.ok_or(Rejection::Unresolvable)?;

        if sample.avg_views < self.targets.min_avg_views {
            return Err(Rejection::LowEngagement {
                avg_views: sample.avg_views,
            });
        }

        Ok(self.build_record(category, tier, candidate, stats, sample))
    }

    /// [`Classifier::evaluate`], then records the acceptance in `state`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] that applies; `state` is untouched.
    pub fn accept(
        &self,
        state: &mut RunState,
        category: &CategoryConfig,
        candidate: &ChannelCandidate,
        stats: Option<&ChannelStats>,
        sample: &RecentVideoSample,
    ) -> Result<CreatorRecord, Rejection> {
        let record = self.evaluate(state, category, candidate, stats, sample)?;
        state.record(&record);
        Ok(record)
    }

    /// Whether no further channel can be accepted for `category`.
    #[must_use]
    pub fn category_satisfied(&self, state: &RunState, category: &CategoryConfig) -> bool {
        match category.quota() {
            Quota::Flat(target) => state.category_count(&category.name) >= target,
            Quota::PerTier(_) => self
                .targets
                .tiers
                .iter()
                .all(|tier| quota_met(state, category, &tier.name)),
        }
    }

    fn build_record(
        &self,
        category: &CategoryConfig,
        tier: &TierBand,
        candidate: &ChannelCandidate,
        stats: &ChannelStats,
        sample: &RecentVideoSample,
    ) -> CreatorRecord {
        let why_reason = self.reasons.explain(&ReasonFacts {
            category: &category.name,
            tier: &tier.name,
            subscriber_count: stats.subscriber_count,
            avg_views: sample.avg_views,
        });
        let display_name = if stats.title.trim().is_empty() {
            candidate.display_name.clone()
        } else {
            stats.title.clone()
        };
        let description = if stats.description.is_empty() {
            &candidate.short_description
        } else {
            &stats.description
        };

        CreatorRecord {
            channel_id: stats.channel_id.clone(),
            display_name,
            canonical_url: stats.canonical_url.clone(),
            subscriber_count: stats.subscriber_count,
            subscriber_count_formatted: format_subscriber_count(stats.subscriber_count),
            avg_views: sample.avg_views,
            avg_views_formatted: format_view_range(sample.avg_views).to_string(),
            category: category.name.clone(),
            tier: tier.name.clone(),
            why_reason,
            country_code: stats.country_code.clone(),
            video_count: stats.video_count,
            total_view_count: stats.total_view_count,
            description_excerpt: truncate_chars(description, RECORD_DESCRIPTION_CHARS),
            published_at: stats.published_at,
            partnership_signals: partnership_signals(
                &stats.description,
                stats.subscriber_count,
                sample,
            ),
        }
    }
}

/// A tier missing from a per-tier quota map has a target of zero.
fn quota_met(state: &RunState, category: &CategoryConfig, tier: &str) -> bool {
    match category.quota() {
        Quota::Flat(target) => state.category_count(&category.name) >= target,
        Quota::PerTier(per_tier) => {
            let target = per_tier.get(tier).copied().unwrap_or(0);
            state.category_tier_count(&category.name, tier) >= target
        }
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
