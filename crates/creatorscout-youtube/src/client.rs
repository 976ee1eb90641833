//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key management, URL construction and typed
//! response deserialization. Non-2xx responses are decoded from the
//! `{"error": {...}}` envelope and surfaced as [`YoutubeError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::YoutubeError;
use crate::platform::{
    ChannelHit, ChannelSearch, ChannelStats, SearchPage, VideoPlatform, VideoStats,
    MAX_IDS_PER_REQUEST, MAX_SEARCH_PAGE_SIZE,
};
use crate::types::{
    ChannelResource, ErrorEnvelope, ListResponse, PlaylistItem, SearchResult, VideoResource,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Client for the `YouTube` Data API.
///
/// Use [`YoutubeClient::new`] for production or [`YoutubeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the `v3` segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Builds the request URL for `endpoint` with the API key and
    /// percent-encoded query parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request and decodes the body as `T`.
    ///
    /// `context` names the call in error messages; the URL itself is never
    /// included because it carries the API key.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, YoutubeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !status.is_success() {
            let err = Self::api_error(status.as_u16(), &body);
            tracing::debug!(call = context, status = status.as_u16(), error = %err, "youtube api error");
            return Err(err);
        }
        tracing::debug!(call = context, bytes = body.len(), "youtube api response");

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Decodes an error envelope, falling back to the raw status when the
    /// body is not the documented shape.
    fn api_error(status: u16, body: &str) -> YoutubeError {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => YoutubeError::Api {
                status,
                reason: envelope
                    .error
                    .errors
                    .into_iter()
                    .map(|d| d.reason)
                    .find(|r| !r.is_empty())
                    .unwrap_or_else(|| "unknown".to_string()),
                message: envelope.error.message,
            },
            Err(_) => YoutubeError::Api {
                status,
                reason: "unknown".to_string(),
                message: body.chars().take(200).collect(),
            },
        }
    }

    fn check_batch(ids: &[String]) -> Result<(), YoutubeError> {
        if ids.len() > MAX_IDS_PER_REQUEST {
            return Err(YoutubeError::TooManyIds {
                count: ids.len(),
                limit: MAX_IDS_PER_REQUEST,
            });
        }
        Ok(())
    }
}

impl VideoPlatform for YoutubeClient {
    async fn search_channels(&self, search: &ChannelSearch<'_>) -> Result<SearchPage, YoutubeError> {
        let page_size = search.page_size.clamp(1, MAX_SEARCH_PAGE_SIZE).to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("type", "channel"),
            ("q", search.query),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = search.page_token {
            params.push(("pageToken", token));
        }
        if let Some(language) = search.relevance_language {
            params.push(("relevanceLanguage", language));
        }

        let url = self.build_url("search", &params)?;
        let response: ListResponse<SearchResult> = self
            .get_json(url, &format!("search(q={})", search.query))
            .await?;

        Ok(SearchPage {
            items: response
                .items
                .into_iter()
                .map(|item| ChannelHit {
                    channel_id: item.snippet.channel_id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                })
                .collect(),
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn channel_statistics(&self, ids: &[String]) -> Result<Vec<ChannelStats>, YoutubeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Self::check_batch(ids)?;

        let joined = ids.join(",");
        let url = self.build_url(
            "channels",
            &[
                ("part", "statistics,snippet,contentDetails,brandingSettings"),
                ("id", joined.as_str()),
                ("maxResults", "50"),
            ],
        )?;
        let response: ListResponse<ChannelResource> = self
            .get_json(url, &format!("channels(ids={})", ids.len()))
            .await?;

        if response.items.len() < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                returned = response.items.len(),
                "some channel ids did not resolve"
            );
        }
        Ok(response.items.into_iter().map(ChannelStats::from).collect())
    }

    async fn uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>, YoutubeError> {
        let url = self.build_url(
            "channels",
            &[("part", "contentDetails"), ("id", channel_id)],
        )?;
        let response: ListResponse<ChannelResource> = self
            .get_json(url, &format!("channels(id={channel_id})"))
            .await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|c| c.content_details)
            .and_then(|d| d.related_playlists.uploads)
            .filter(|p| !p.is_empty()))
    }

    async fn playlist_video_ids(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError> {
        let max_results = max_results.clamp(1, MAX_SEARCH_PAGE_SIZE).to_string();
        let url = self.build_url(
            "playlistItems",
            &[
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", max_results.as_str()),
            ],
        )?;
        let response: ListResponse<PlaylistItem> = self
            .get_json(url, &format!("playlistItems(playlistId={playlist_id})"))
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| item.content_details.video_id)
            .collect())
    }

    async fn video_statistics(&self, ids: &[String]) -> Result<Vec<VideoStats>, YoutubeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Self::check_batch(ids)?;

        let joined = ids.join(",");
        let url = self.build_url(
            "videos",
            &[("part", "statistics,snippet"), ("id", joined.as_str())],
        )?;
        let response: ListResponse<VideoResource> = self
            .get_json(url, &format!("videos(ids={})", ids.len()))
            .await?;

        Ok(response.items.into_iter().map(VideoStats::from).collect())
    }
}
