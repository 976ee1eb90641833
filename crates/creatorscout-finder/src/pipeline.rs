//! The sequential search run: plan, discover, enrich, classify.

use std::collections::BTreeMap;

use creatorscout_core::{AppConfig, CategoryConfig, TargetsConfig};
use creatorscout_youtube::{RateLimiter, VideoPlatform};

use crate::classify::{Classifier, RunState};
use crate::discover::discover;
use crate::enrich::{get_recent_video_stats, get_stats};
use crate::planner::plan;
use crate::types::{CreatorRecord, Rejection, SearchTask};

/// Tunables for a run that do not belong to the campaign targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderSettings {
    pub search_max_results: u32,
    pub recent_video_sample: u32,
    pub relevance_language: Option<String>,
}

impl Default for FinderSettings {
    fn default() -> Self {
        Self {
            search_max_results: 30,
            recent_video_sample: 10,
            relevance_language: None,
        }
    }
}

impl From<&AppConfig> for FinderSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            search_max_results: config.search_max_results,
            recent_video_sample: config.recent_video_sample,
            relevance_language: config.relevance_language.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub target: u32,
    pub accepted: u32,
    /// Accepted count per tier, in tier order, including zeros.
    pub per_tier: Vec<(String, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSummary {
    pub name: String,
    pub target_count: u32,
    pub accepted: u32,
}

/// Aggregate counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub categories: Vec<CategorySummary>,
    pub tiers: Vec<TierSummary>,
    /// Rejections keyed by [`Rejection::label`].
    pub rejections: BTreeMap<&'static str, u32>,
    pub keywords_searched: u32,
    pub keywords_skipped: u32,
    pub candidates_found: u32,
    pub accepted: u32,
}

impl RunSummary {
    fn reject(&mut self, rejection: &Rejection) {
        *self.rejections.entry(rejection.label()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn rejected(&self) -> u32 {
        self.rejections.values().sum()
    }

    fn fill_counts(&mut self, targets: &TargetsConfig, state: &RunState) {
        self.categories = targets
            .categories
            .iter()
            .map(|category| CategorySummary {
                name: category.name.clone(),
                target: category.quota().total(),
                accepted: state.category_count(&category.name),
                per_tier: targets
                    .tiers
                    .iter()
                    .map(|tier| {
                        (
                            tier.name.clone(),
                            state.category_tier_count(&category.name, &tier.name),
                        )
                    })
                    .collect(),
            })
            .collect();
        self.tiers = targets
            .tiers
            .iter()
            .map(|tier| TierSummary {
                name: tier.name.clone(),
                target_count: tier.target_count,
                accepted: state.tier_count(&tier.name),
            })
            .collect();
    }
}

/// Accepted records in acceptance order, plus the run summary.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub records: Vec<CreatorRecord>,
    pub summary: RunSummary,
}

/// Runs the creator search against a [`VideoPlatform`].
///
/// `call_limiter` is waited on between platform calls; `accept_limiter`
/// after each accepted creator.
pub struct Finder<P, L> {
    platform: P,
    call_limiter: L,
    accept_limiter: L,
    settings: FinderSettings,
}

impl<P, L> Finder<P, L>
where
    P: VideoPlatform,
    L: RateLimiter,
{
    pub fn new(platform: P, call_limiter: L, accept_limiter: L, settings: FinderSettings) -> Self {
        Self {
            platform,
            call_limiter,
            accept_limiter,
            settings,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Searches every category in configuration order.
    ///
    /// Platform failures never abort the run; they shrink the result set.
    /// A fresh [`RunState`] is used per call.
    pub async fn run(&self, targets: &TargetsConfig) -> RunOutcome {
        let classifier = Classifier::new(targets);
        let mut state = RunState::new();
        let mut outcome = RunOutcome::default();
        let tasks = plan(targets);

        for category in &targets.categories {
            tracing::info!(
                category = %category.name,
                target = category.quota().total(),
                "searching category"
            );
            for task in tasks.iter().filter(|t| t.category == category.name) {
                if classifier.category_satisfied(&state, category) {
                    outcome.summary.keywords_skipped += 1;
                    continue;
                }
                self.search_keyword(&classifier, &mut state, category, task, &mut outcome)
                    .await;
            }
            tracing::info!(
                category = %category.name,
                accepted = state.category_count(&category.name),
                target = category.quota().total(),
                "category complete"
            );
        }

        outcome.summary.fill_counts(targets, &state);
        tracing::info!(
            accepted = outcome.summary.accepted,
            rejected = outcome.summary.rejected(),
            keywords = outcome.summary.keywords_searched,
            "search run complete"
        );
        outcome
    }

    async fn search_keyword(
        &self,
        classifier: &Classifier<'_>,
        state: &mut RunState,
        category: &CategoryConfig,
        task: &SearchTask,
        outcome: &mut RunOutcome,
    ) {
        outcome.summary.keywords_searched += 1;
        let candidates = discover(
            &self.platform,
            &self.call_limiter,
            &task.keyword,
            self.settings.search_max_results,
            self.settings.relevance_language.as_deref(),
            state.seen_ids(),
        )
        .await;
        tracing::debug!(
            keyword = %task.keyword,
            candidates = candidates.len(),
            "keyword discovered"
        );
        outcome.summary.candidates_found += u32::try_from(candidates.len()).unwrap_or(u32::MAX);
        if candidates.is_empty() {
            return;
        }

        let ids: Vec<String> = candidates.iter().map(|c| c.channel_id.clone()).collect();
        let stats = get_stats(&self.platform, &self.call_limiter, &ids).await;

        for candidate in &candidates {
            if classifier.category_satisfied(state, category) {
                break;
            }
            let channel_stats = stats.get(&candidate.channel_id);

            // Cheap checks first so quota-met and out-of-range channels cost
            // no upload lookups.
            if let Err(rejection) =
                classifier.screen(state, category, &candidate.channel_id, channel_stats)
            {
                log_rejection(&candidate.channel_id, &rejection);
                outcome.summary.reject(&rejection);
                continue;
            }

            let sample = get_recent_video_stats(
                &self.platform,
                &self.call_limiter,
                &candidate.channel_id,
                self.settings.recent_video_sample,
            )
            .await;

            match classifier.accept(state, category, candidate, channel_stats, &sample) {
                Ok(record) => {
                    tracing::debug!(
                        channel_id = %record.channel_id,
                        tier = %record.tier,
                        subscribers = record.subscriber_count,
                        avg_views = record.avg_views,
                        "creator accepted"
                    );
                    outcome.summary.accepted += 1;
                    outcome.records.push(record);
                    self.accept_limiter.wait_before_next_call().await;
                }
                Err(rejection) => {
                    log_rejection(&candidate.channel_id, &rejection);
                    outcome.summary.reject(&rejection);
                }
            }
        }
    }
}

fn log_rejection(channel_id: &str, rejection: &Rejection) {
    tracing::debug!(channel_id, reason = rejection.label(), detail = ?rejection, "candidate rejected");
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
