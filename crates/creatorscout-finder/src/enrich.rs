//! Bulk channel statistics and recent-upload sampling.

use std::collections::HashMap;

use creatorscout_youtube::{
    ChannelStats, RateLimiter, VideoPlatform, YoutubeError, MAX_IDS_PER_REQUEST,
};

use crate::types::RecentVideoSample;

/// Fetches statistics for `channel_ids` in batches of at most 50.
///
/// A failing batch is logged and skipped. Ids the platform cannot resolve
/// are absent from the returned map; callers treat absence as "drop".
pub async fn get_stats<P, L>(
    platform: &P,
    limiter: &L,
    channel_ids: &[String],
) -> HashMap<String, ChannelStats>
where
    P: VideoPlatform,
    L: RateLimiter,
{
    let mut stats = HashMap::with_capacity(channel_ids.len());

    for batch in channel_ids.chunks(MAX_IDS_PER_REQUEST) {
        match platform.channel_statistics(batch).await {
            Ok(items) => {
                for item in items {
                    stats.insert(item.channel_id.clone(), item);
                }
            }
            Err(e) => {
                tracing::warn!(
                    batch_size = batch.len(),
                    error = %e,
                    "channel statistics batch failed; skipping"
                );
            }
        }
        limiter.wait_before_next_call().await;
    }

    stats
}

/// Average views over a channel's `sample_size` most recent uploads.
///
/// Any failure along the way (no uploads playlist, empty playlist, platform
/// error) yields [`RecentVideoSample::empty`].
pub async fn get_recent_video_stats<P, L>(
    platform: &P,
    limiter: &L,
    channel_id: &str,
    sample_size: u32,
) -> RecentVideoSample
where
    P: VideoPlatform,
    L: RateLimiter,
{
    match fetch_recent_videos(platform, limiter, channel_id, sample_size).await {
        Ok(sample) => sample,
        Err(e) => {
            tracing::debug!(channel_id, error = %e, "recent video lookup failed");
            RecentVideoSample::empty()
        }
    }
}

async fn fetch_recent_videos<P, L>(
    platform: &P,
    limiter: &L,
    channel_id: &str,
    sample_size: u32,
) -> Result<RecentVideoSample, YoutubeError>
where
    P: VideoPlatform,
    L: RateLimiter,
{
    let uploads = platform.uploads_playlist_id(channel_id).await?;
    limiter.wait_before_next_call().await;
    let Some(uploads) = uploads else {
        return Ok(RecentVideoSample::empty());
    };

    let mut video_ids = platform.playlist_video_ids(&uploads, sample_size).await?;
    limiter.wait_before_next_call().await;
    video_ids.truncate(
        usize::try_from(sample_size)
            .unwrap_or(MAX_IDS_PER_REQUEST)
            .min(MAX_IDS_PER_REQUEST),
    );
    if video_ids.is_empty() {
        return Ok(RecentVideoSample::empty());
    }

    let videos = platform.video_statistics(&video_ids).await?;
    limiter.wait_before_next_call().await;
    Ok(RecentVideoSample::from_videos(videos))
}

#[cfg(test)]
mod tests {
    use creatorscout_youtube::FixedDelay;

    use super::*;
    use crate::testing::FakePlatform;

    #[tokio::test]
    async fn stats_are_fetched_in_batches_of_fifty() {
        let mut platform = FakePlatform::new();
        let ids: Vec<String> = (0..120).map(|i| format!("UC{i}")).collect();
        for id in &ids {
            platform = platform.channel(id, 5_000, 600);
        }

        let stats = get_stats(&platform, &FixedDelay::none(), &ids).await;

        assert_eq!(stats.len(), 120);
        assert_eq!(*platform.stats_batches.borrow(), vec![50, 50, 20]);
    }

    #[tokio::test]
    async fn unresolved_ids_are_absent() {
        let platform = FakePlatform::new().channel("UCa", 5_000, 600);
        let ids = vec!["UCa".to_string(), "UCgone".to_string()];

        let stats = get_stats(&platform, &FixedDelay::none(), &ids).await;

        assert!(stats.contains_key("UCa"));
        assert!(!stats.contains_key("UCgone"));
    }

    #[tokio::test]
    async fn failing_batch_yields_empty_map() {
        let platform = FakePlatform::new().channel("UCa", 5_000, 600).fail_stats();
        let stats = get_stats(&platform, &FixedDelay::none(), &["UCa".to_string()]).await;
        assert!(stats.is_empty());
    }

    #[tokio::test]
    async fn no_ids_means_no_requests() {
        let platform = FakePlatform::new();
        let stats = get_stats(&platform, &FixedDelay::none(), &[]).await;
        assert!(stats.is_empty());
        assert!(platform.stats_batches.borrow().is_empty());
    }

    #[tokio::test]
    async fn recent_sample_averages_uploads() {
        let platform = FakePlatform::new().channel("UCa", 5_000, 600);
        let sample = get_recent_video_stats(&platform, &FixedDelay::none(), "UCa", 10).await;
        assert_eq!(sample.avg_views, 600);
        assert_eq!(sample.videos.len(), 3);
    }

    #[tokio::test]
    async fn recent_sample_respects_sample_size() {
        let platform = FakePlatform::new().channel("UCa", 5_000, 600);
        let sample = get_recent_video_stats(&platform, &FixedDelay::none(), "UCa", 2).await;
        assert_eq!(sample.videos.len(), 2);
    }

    #[tokio::test]
    async fn missing_uploads_playlist_falls_back_to_empty() {
        let platform = FakePlatform::new().channel_without_uploads("UCa", 5_000);
        let sample = get_recent_video_stats(&platform, &FixedDelay::none(), "UCa", 10).await;
        assert_eq!(sample, RecentVideoSample::empty());
    }
}
