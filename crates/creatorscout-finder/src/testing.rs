//! In-memory `VideoPlatform` for pipeline tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use creatorscout_core::{CategoryConfig, TargetsConfig, TierBand};
use creatorscout_youtube::{
    ChannelHit, ChannelSearch, ChannelStats, SearchPage, VideoPlatform, VideoStats, YoutubeError,
};

fn platform_error() -> YoutubeError {
    YoutubeError::Api {
        status: 503,
        reason: "backendError".to_string(),
        message: "simulated outage".to_string(),
    }
}

/// Keyword searches return pre-seeded pages; the page token is the index of
/// the next page.
#[derive(Default)]
pub(crate) struct FakePlatform {
    pages: HashMap<String, Vec<Vec<ChannelHit>>>,
    failing_pages: HashSet<(String, usize)>,
    channels: HashMap<String, ChannelStats>,
    uploads: HashMap<String, Vec<VideoStats>>,
    failing_stats: Cell<bool>,
    pub(crate) search_calls: Cell<usize>,
    pub(crate) stats_batches: RefCell<Vec<usize>>,
    pub(crate) recent_lookups: Cell<usize>,
    pub(crate) searched_keywords: RefCell<Vec<String>>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a search results page for `keyword` listing `ids`.
    pub(crate) fn page(mut self, keyword: &str, ids: &[&str]) -> Self {
        let hits = ids
            .iter()
            .map(|id| ChannelHit {
                channel_id: (*id).to_string(),
                title: format!("Channel {id}"),
                description: format!("About {id}"),
            })
            .collect();
        self.pages
            .entry(keyword.to_string())
            .or_default()
            .push(hits);
        self
    }

    /// Makes page `index` of `keyword` fail.
    pub(crate) fn fail_page(mut self, keyword: &str, index: usize) -> Self {
        self.failing_pages.insert((keyword.to_string(), index));
        self
    }

    pub(crate) fn fail_stats(self) -> Self {
        self.failing_stats.set(true);
        self
    }

    /// Registers a channel whose recent uploads all have `avg_views` views.
    pub(crate) fn channel(mut self, id: &str, subscribers: u64, avg_views: u64) -> Self {
        self.channels.insert(id.to_string(), stats(id, subscribers));
        let videos = (0..3)
            .map(|n| VideoStats {
                video_id: format!("{id}-v{n}"),
                title: format!("Upload {n}"),
                views: avg_views,
                likes: avg_views / 20,
                comments: avg_views / 100,
                published_at: None,
            })
            .collect();
        self.uploads.insert(id.to_string(), videos);
        self
    }

    /// Registers a channel that has statistics but no uploads playlist.
    pub(crate) fn channel_without_uploads(mut self, id: &str, subscribers: u64) -> Self {
        self.channels.insert(id.to_string(), stats(id, subscribers));
        self
    }
}

pub(crate) fn stats(id: &str, subscribers: u64) -> ChannelStats {
    ChannelStats {
        channel_id: id.to_string(),
        title: format!("Channel {id}"),
        subscriber_count: subscribers,
        total_view_count: subscribers * 40,
        video_count: 120,
        country_code: "US".to_string(),
        canonical_url: ChannelStats::canonical_url_for(id, None),
        custom_url: None,
        description: format!("Tutorials from {id}. Business email in about page."),
        keywords: String::new(),
        published_at: None,
    }
}

impl VideoPlatform for FakePlatform {
    async fn search_channels(&self, search: &ChannelSearch<'_>) -> Result<SearchPage, YoutubeError> {
        self.search_calls.set(self.search_calls.get() + 1);
        self.searched_keywords
            .borrow_mut()
            .push(search.query.to_string());

        let index: usize = search
            .page_token
            .and_then(|t| t.parse().ok())
            .unwrap_or(0);
        if self
            .failing_pages
            .contains(&(search.query.to_string(), index))
        {
            return Err(platform_error());
        }

        let Some(pages) = self.pages.get(search.query) else {
            return Ok(SearchPage::default());
        };
        let Some(hits) = pages.get(index) else {
            return Ok(SearchPage::default());
        };

        let page_size = usize::try_from(search.page_size).unwrap_or(usize::MAX);
        Ok(SearchPage {
            items: hits.iter().take(page_size).cloned().collect(),
            next_page_token: (index + 1 < pages.len()).then(|| (index + 1).to_string()),
        })
    }

    async fn channel_statistics(&self, ids: &[String]) -> Result<Vec<ChannelStats>, YoutubeError> {
        self.stats_batches.borrow_mut().push(ids.len());
        if self.failing_stats.get() {
            return Err(platform_error());
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.channels.get(id).cloned())
            .collect())
    }

    async fn uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>, YoutubeError> {
        self.recent_lookups.set(self.recent_lookups.get() + 1);
        Ok(self
            .uploads
            .contains_key(channel_id)
            .then(|| format!("uploads:{channel_id}")))
    }

    async fn playlist_video_ids(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError> {
        let channel_id = playlist_id.trim_start_matches("uploads:");
        let limit = usize::try_from(max_results).unwrap_or(usize::MAX);
        Ok(self
            .uploads
            .get(channel_id)
            .map(|videos| {
                videos
                    .iter()
                    .take(limit)
                    .map(|v| v.video_id.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn video_statistics(&self, ids: &[String]) -> Result<Vec<VideoStats>, YoutubeError> {
        Ok(self
            .uploads
            .values()
            .flatten()
            .filter(|v| ids.contains(&v.video_id))
            .cloned()
            .collect())
    }
}

pub(crate) fn band(name: &str, min: u64, max: Option<u64>, note: &str) -> TierBand {
    TierBand {
        name: name.to_string(),
        min,
        max,
        target_count: 0,
        note: note.to_string(),
    }
}

pub(crate) fn gaming_category(keywords: &[&str], target: u32) -> CategoryConfig {
    CategoryConfig {
        name: "Gaming Content Creators".to_string(),
        description: "Let's-play and game review channels.".to_string(),
        reason: Some("Creates gaming content. {engagement}. Audience loves new tools.".to_string()),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        target: Some(target),
        target_per_tier: None,
    }
}

/// Nano `[1000, 10000)`, Micro `[10000, 500000)`, Macro `[500000, 50M)` with
/// a 1000-subscriber floor.
pub(crate) fn targets(categories: Vec<CategoryConfig>) -> TargetsConfig {
    TargetsConfig {
        min_subscribers: 1000,
        max_subscribers: None,
        min_avg_views: 100,
        tiers: vec![
            band("Nano", 1000, Some(10_000), "Highly responsive to partnerships."),
            band("Micro", 10_000, Some(500_000), "Good reach."),
            band("Macro", 500_000, Some(50_000_000), "Brand amplification."),
        ],
        categories,
    }
}
