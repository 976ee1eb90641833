//! Client for the `YouTube` Data API v3 and the platform capability the
//! creator pipeline is written against.

pub mod client;
pub mod error;
pub mod platform;
pub mod rate_limit;
pub mod types;

pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use platform::{
    ChannelHit, ChannelSearch, ChannelStats, SearchPage, VideoPlatform, VideoStats,
    MAX_IDS_PER_REQUEST, MAX_SEARCH_PAGE_SIZE,
};
pub use rate_limit::{FixedDelay, RateLimiter};
