//! Keyword channel discovery with token pagination.

use std::collections::HashSet;

use creatorscout_youtube::{ChannelSearch, RateLimiter, VideoPlatform, MAX_SEARCH_PAGE_SIZE};

use crate::types::ChannelCandidate;

/// Upper bound on pages requested per keyword, in case the platform keeps
/// returning continuation tokens for pages of already-seen channels.
pub(crate) const MAX_SEARCH_PAGES: usize = 10;

/// Searches `keyword` and returns up to `max_results` channels not present in
/// `already_seen`.
///
/// Pages are requested `min(50, remaining)` at a time while the platform
/// returns a continuation token. A failing page ends pagination for this
/// keyword; whatever was collected before it is returned.
pub async fn discover<P, L>(
    platform: &P,
    limiter: &L,
    keyword: &str,
    max_results: u32,
    relevance_language: Option<&str>,
    already_seen: &HashSet<String>,
) -> Vec<ChannelCandidate>
where
    P: VideoPlatform,
    L: RateLimiter,
{
    let max_results = usize::try_from(max_results).unwrap_or(usize::MAX);
    let mut candidates: Vec<ChannelCandidate> = Vec::new();
    let mut in_this_search: HashSet<String> = HashSet::new();
    let mut page_token: Option<String> = None;

    for page_number in 0..MAX_SEARCH_PAGES {
        let remaining = max_results.saturating_sub(candidates.len());
        if remaining == 0 {
            break;
        }
        if page_number > 0 {
            limiter.wait_before_next_call().await;
        }

        let search = ChannelSearch {
            query: keyword,
            page_size: u32::try_from(remaining)
                .unwrap_or(MAX_SEARCH_PAGE_SIZE)
                .min(MAX_SEARCH_PAGE_SIZE),
            page_token: page_token.as_deref(),
            relevance_language,
        };

        let page = match platform.search_channels(&search).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    keyword,
                    page = page_number,
                    collected = candidates.len(),
                    error = %e,
                    "channel search failed; keeping results collected so far"
                );
                break;
            }
        };

        for hit in page.items {
            if candidates.len() >= max_results {
                break;
            }
            if already_seen.contains(&hit.channel_id)
                || !in_this_search.insert(hit.channel_id.clone())
            {
                continue;
            }
            candidates.push(ChannelCandidate::from(hit));
        }

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    tracing::debug!(keyword, found = candidates.len(), "keyword search complete");
    candidates
}
