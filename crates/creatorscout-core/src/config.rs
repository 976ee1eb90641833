use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_USER_AGENT: &str = "creatorscout/0.1 (creator-discovery)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Blank values count as unset so an empty line in `.env` behaves like a
    // missing key.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let youtube_api_key = optional("YOUTUBE_API_KEY");
    let api_base_url = or_default("CREATORSCOUT_API_BASE_URL", DEFAULT_API_BASE_URL);
    let log_level = or_default("CREATORSCOUT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("CREATORSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CREATORSCOUT_USER_AGENT", DEFAULT_USER_AGENT);
    let page_delay_ms = parse_u64("CREATORSCOUT_PAGE_DELAY_MS", "100")?;
    let accept_delay_ms = parse_u64("CREATORSCOUT_ACCEPT_DELAY_MS", "300")?;

    let search_max_results = parse_u32("CREATORSCOUT_SEARCH_MAX_RESULTS", "30")?;
    if search_max_results == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CREATORSCOUT_SEARCH_MAX_RESULTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let recent_video_sample = parse_u32("CREATORSCOUT_RECENT_VIDEO_SAMPLE", "10")?;
    if !(1..=50).contains(&recent_video_sample) {
        return Err(ConfigError::InvalidEnvVar {
            var: "CREATORSCOUT_RECENT_VIDEO_SAMPLE".to_string(),
            reason: format!("{recent_video_sample} is outside 1..=50"),
        });
    }

    // Present-but-empty disables the language filter; absent keeps the default.
    let relevance_language = match lookup("CREATORSCOUT_RELEVANCE_LANGUAGE") {
        Ok(v) if v.trim().is_empty() => None,
        Ok(v) => Some(v.trim().to_string()),
        Err(_) => Some("en".to_string()),
    };

    let targets_path = optional("CREATORSCOUT_TARGETS_PATH").map(PathBuf::from);

    Ok(AppConfig {
        youtube_api_key,
        api_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        page_delay_ms,
        accept_delay_ms,
        search_max_results,
        recent_video_sample,
        relevance_language,
        targets_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
