use chrono::{DateTime, Utc};
use creatorscout_youtube::{ChannelHit, VideoStats};

use crate::format::truncate_chars;

/// Search descriptions are cut to this many characters.
pub const CANDIDATE_DESCRIPTION_CHARS: usize = 500;

/// Record description excerpts are cut to this many characters.
pub const RECORD_DESCRIPTION_CHARS: usize = 200;

/// One keyword search to run on behalf of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTask {
    pub category: String,
    pub keyword: String,
}

/// A channel surfaced by keyword search, before statistics are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCandidate {
    pub channel_id: String,
    pub display_name: String,
    pub short_description: String,
}

impl From<ChannelHit> for ChannelCandidate {
    fn from(hit: ChannelHit) -> Self {
        Self {
            channel_id: hit.channel_id,
            display_name: hit.title,
            short_description: truncate_chars(&hit.description, CANDIDATE_DESCRIPTION_CHARS),
        }
    }
}

/// View statistics for a channel's most recent uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentVideoSample {
    /// Integer-truncated mean of `videos[].views`; zero when empty.
    pub avg_views: u64,
    pub videos: Vec<VideoStats>,
}

impl RecentVideoSample {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_videos(videos: Vec<VideoStats>) -> Self {
        let avg_views = if videos.is_empty() {
            0
        } else {
            let total: u128 = videos.iter().map(|v| u128::from(v.views)).sum();
            let mean = total / videos.len() as u128;
            u64::try_from(mean).unwrap_or(u64::MAX)
        };
        Self { avg_views, videos }
    }
}

/// An accepted creator. Built once by the classifier and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorRecord {
    pub channel_id: String,
    pub display_name: String,
    pub canonical_url: String,
    pub subscriber_count: u64,
    pub subscriber_count_formatted: String,
    pub avg_views: u64,
    pub avg_views_formatted: String,
    pub category: String,
    pub tier: String,
    pub why_reason: String,
    pub country_code: String,
    pub video_count: u64,
    pub total_view_count: u64,
    pub description_excerpt: String,
    pub published_at: Option<DateTime<Utc>>,
    pub partnership_signals: Vec<String>,
}

/// Why a candidate was not accepted. Checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Duplicate,
    Unresolvable,
    OutOfRange { subscribers: u64 },
    QuotaMet { tier: String },
    LowEngagement { avg_views: u64 },
}

impl Rejection {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Rejection::Duplicate => "duplicate",
            Rejection::Unresolvable => "unresolvable",
            Rejection::OutOfRange { .. } => "out_of_range",
            Rejection::QuotaMet { .. } => "quota_met",
            Rejection::LowEngagement { .. } => "low_engagement",
        }
    }
}
