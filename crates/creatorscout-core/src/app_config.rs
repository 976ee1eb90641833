use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: Option<String>,
    pub api_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Pause between search pages and bulk statistics batches.
    pub page_delay_ms: u64,
    /// Pause after each accepted channel.
    pub accept_delay_ms: u64,
    pub search_max_results: u32,
    pub recent_video_sample: u32,
    pub relevance_language: Option<String>,
    /// `None` means the built-in campaign targets are used.
    pub targets_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("accept_delay_ms", &self.accept_delay_ms)
            .field("search_max_results", &self.search_max_results)
            .field("recent_video_sample", &self.recent_video_sample)
            .field("relevance_language", &self.relevance_language)
            .field("targets_path", &self.targets_path)
            .finish()
    }
}
