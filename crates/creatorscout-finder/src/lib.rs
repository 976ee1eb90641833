//! Creator discovery pipeline.
//!
//! Categories from the campaign targets are expanded into keyword searches
//! ([`planner`]), each search pages through channel results ([`discover`]),
//! candidates are enriched in bulk ([`enrich`]) and then screened, tiered and
//! explained ([`classify`], [`reason`]). [`pipeline::Finder`] drives the whole
//! run sequentially against any [`creatorscout_youtube::VideoPlatform`].

pub mod classify;
pub mod discover;
pub mod enrich;
pub mod format;
pub mod pipeline;
pub mod planner;
pub mod reason;
pub mod signals;
pub mod types;

#[cfg(test)]
mod testing;

pub use classify::{assign_tier, Classifier, RunState};
pub use discover::discover;
pub use enrich::{get_recent_video_stats, get_stats};
pub use format::{format_subscriber_count, format_view_range};
pub use pipeline::{CategorySummary, Finder, FinderSettings, RunOutcome, RunSummary, TierSummary};
pub use planner::plan;
pub use reason::{engagement_descriptor, engagement_ratio, ReasonFacts, ReasonTemplates};
pub use signals::partnership_signals;
pub use types::{ChannelCandidate, CreatorRecord, RecentVideoSample, Rejection, SearchTask};
