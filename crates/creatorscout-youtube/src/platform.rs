//! The platform capability the creator pipeline depends on.
//!
//! [`VideoPlatform`] is implemented by [`crate::YoutubeClient`] for real runs
//! and by in-memory fakes in tests. Every method may fail with a
//! [`YoutubeError`]; callers decide how to degrade.

use chrono::{DateTime, Utc};

use crate::error::YoutubeError;
use crate::types::{ChannelResource, VideoResource};

/// Largest page size `search.list` accepts.
pub const MAX_SEARCH_PAGE_SIZE: u32 = 50;

/// Largest number of ids `channels.list` and `videos.list` accept per call.
pub const MAX_IDS_PER_REQUEST: usize = 50;

const CHANNEL_URL_BASE: &str = "https://www.youtube.com";

/// One page request against the keyword channel search.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSearch<'a> {
    pub query: &'a str,
    pub page_size: u32,
    pub page_token: Option<&'a str>,
    /// ISO 639-1 code passed as `relevanceLanguage`.
    pub relevance_language: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHit {
    pub channel_id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub items: Vec<ChannelHit>,
    pub next_page_token: Option<String>,
}

/// Aggregate statistics for one channel from a bulk lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelStats {
    pub channel_id: String,
    pub title: String,
    pub subscriber_count: u64,
    pub total_view_count: u64,
    pub video_count: u64,
    /// ISO 3166 code, or `"Unknown"` when the channel does not declare one.
    pub country_code: String,
    pub canonical_url: String,
    pub custom_url: Option<String>,
    pub description: String,
    /// Space-separated branding keywords.
    pub keywords: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl ChannelStats {
    /// Public URL for a channel: the custom handle when one is set, the
    /// `/channel/<id>` form otherwise.
    #[must_use]
    pub fn canonical_url_for(channel_id: &str, custom_url: Option<&str>) -> String {
        match custom_url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(handle) => format!("{CHANNEL_URL_BASE}/{handle}"),
            None => format!("{CHANNEL_URL_BASE}/channel/{channel_id}"),
        }
    }
}

impl From<ChannelResource> for ChannelStats {
    fn from(resource: ChannelResource) -> Self {
        let snippet = resource.snippet;
        let canonical_url =
            Self::canonical_url_for(&resource.id, snippet.custom_url.as_deref());
        let keywords = resource
            .branding_settings
            .and_then(|b| b.channel)
            .and_then(|c| c.keywords)
            .unwrap_or_default();

        Self {
            channel_id: resource.id,
            title: snippet.title,
            subscriber_count: resource.statistics.subscriber_count,
            total_view_count: resource.statistics.view_count,
            video_count: resource.statistics.video_count,
            country_code: snippet
                .country
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            canonical_url,
            custom_url: snippet.custom_url,
            description: snippet.description,
            keywords,
            published_at: snippet.published_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStats {
    pub video_id: String,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<VideoResource> for VideoStats {
    fn from(resource: VideoResource) -> Self {
        Self {
            video_id: resource.id,
            title: resource.snippet.title,
            views: resource.statistics.view_count,
            likes: resource.statistics.like_count,
            comments: resource.statistics.comment_count,
            published_at: resource.snippet.published_at,
        }
    }
}

/// Read-only video platform operations used by the discovery pipeline.
#[allow(async_fn_in_trait)]
pub trait VideoPlatform {
    /// One page of keyword search restricted to channels.
    async fn search_channels(&self, search: &ChannelSearch<'_>)
        -> Result<SearchPage, YoutubeError>;

    /// Bulk statistics for up to [`MAX_IDS_PER_REQUEST`] channels. Ids the
    /// platform cannot resolve are absent from the result.
    async fn channel_statistics(&self, ids: &[String])
        -> Result<Vec<ChannelStats>, YoutubeError>;

    /// The uploads playlist of a channel, `None` if the channel has none.
    async fn uploads_playlist_id(&self, channel_id: &str)
        -> Result<Option<String>, YoutubeError>;

    /// Most recent video ids in a playlist, newest first.
    async fn playlist_video_ids(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError>;

    /// Bulk statistics for up to [`MAX_IDS_PER_REQUEST`] videos.
    async fn video_statistics(&self, ids: &[String]) -> Result<Vec<VideoStats>, YoutubeError>;
}
