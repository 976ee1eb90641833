//! Campaign targets: subscriber tiers, content categories and their quotas.
//!
//! Targets are static for a run. They are read from YAML once at startup and
//! validated before any network activity happens.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_TARGETS_YAML: &str = include_str!("../../../config/targets.yaml");

/// One subscriber-count band. `min` is inclusive, `max` exclusive.
///
/// The last band in [`TargetsConfig::tiers`] is open-ended: counts at or
/// above its `min` belong to it even past `max`, which only documents the
/// nominal ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBand {
    pub name: String,
    pub min: u64,
    #[serde(default)]
    pub max: Option<u64>,
    /// Overall number of creators wanted in this band across all categories.
    #[serde(default)]
    pub target_count: u32,
    /// Closing sentence appended to the rationale of records in this band.
    #[serde(default)]
    pub note: String,
}

impl TierBand {
    #[must_use]
    pub fn contains(&self, subscribers: u64) -> bool {
        subscribers >= self.min && self.max.is_none_or(|max| subscribers < max)
    }

    /// Name without the parenthesised range, e.g. `"Mid-Tier"` for
    /// `"Mid-Tier (100K-500K subs)"`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name
            .split('(')
            .next()
            .map_or(self.name.as_str(), str::trim)
    }

    /// Filename-safe slug of [`TierBand::short_name`], e.g. `"mid-tier"`.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(self.short_name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Rationale template; `{engagement}` is replaced with the engagement
    /// descriptor.
    #[serde(default)]
    pub reason: Option<String>,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub target: Option<u32>,
    #[serde(default)]
    pub target_per_tier: Option<BTreeMap<String, u32>>,
}

/// How many creators a category wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota<'a> {
    Flat(u32),
    PerTier(&'a BTreeMap<String, u32>),
}

impl Quota<'_> {
    /// Sum of all targets in this quota.
    #[must_use]
    pub fn total(&self) -> u32 {
        match self {
            Quota::Flat(n) => *n,
            Quota::PerTier(map) => map.values().sum(),
        }
    }
}

impl CategoryConfig {
    /// The category's quota. Validation guarantees exactly one of `target`
    /// and `target_per_tier` is set; an unvalidated config with neither
    /// yields a flat quota of zero.
    #[must_use]
    pub fn quota(&self) -> Quota<'_> {
        match (&self.target_per_tier, self.target) {
            (Some(per_tier), _) => Quota::PerTier(per_tier),
            (None, Some(n)) => Quota::Flat(n),
            (None, None) => Quota::Flat(0),
        }
    }

    /// Filename-safe slug of the category name.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Lowercases `name`, turns spaces into single hyphens and drops anything
/// else that is not ASCII alphanumeric or a hyphen.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c == ' ' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn default_min_avg_views() -> u64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsConfig {
    /// Channels below this subscriber count are never accepted.
    #[serde(default)]
    pub min_subscribers: u64,
    /// Channels above this subscriber count are never accepted. `None` means
    /// no upper bound.
    #[serde(default)]
    pub max_subscribers: Option<u64>,
    /// Engagement floor: channels whose recent uploads average fewer views
    /// are rejected.
    #[serde(default = "default_min_avg_views")]
    pub min_avg_views: u64,
    pub tiers: Vec<TierBand>,
    pub categories: Vec<CategoryConfig>,
}

impl TargetsConfig {
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn tier(&self, name: &str) -> Option<&TierBand> {
        self.tiers.iter().find(|t| t.name == name)
    }

    /// Whether `subscribers` lies within the global `[min, max]` bounds.
    #[must_use]
    pub fn within_bounds(&self, subscribers: u64) -> bool {
        subscribers >= self.min_subscribers
            && self.max_subscribers.is_none_or(|max| subscribers <= max)
    }
}

/// The built-in campaign targets shipped with the binary.
///
/// # Errors
///
/// Returns `ConfigError` if the embedded file fails to parse or validate.
pub fn default_targets() -> Result<TargetsConfig, ConfigError> {
    parse_targets(DEFAULT_TARGETS_YAML)
}

/// Load and validate targets from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_targets(path: &Path) -> Result<TargetsConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TargetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_targets(&content)
}

/// Parse and validate targets from a YAML string.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_targets(yaml: &str) -> Result<TargetsConfig, ConfigError> {
    let targets: TargetsConfig = serde_yaml::from_str(yaml)?;
    validate_targets(&targets)?;
    Ok(targets)
}

fn validate_targets(targets: &TargetsConfig) -> Result<(), ConfigError> {
    if let Some(max) = targets.max_subscribers {
        if max < targets.min_subscribers {
            return Err(ConfigError::Validation(format!(
                "max_subscribers {max} is below min_subscribers {}",
                targets.min_subscribers
            )));
        }
    }

    validate_tiers(&targets.tiers)?;
    let tier_names: HashSet<&str> = targets.tiers.iter().map(|t| t.name.as_str()).collect();

    if targets.categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category is required".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();
    for category in &targets.categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(category.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{}'",
                category.name
            )));
        }

        // Slugs name the per-category export files.
        let slug = category.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no letters or digits to build a file name from",
                category.name
            )));
        }
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "category '{}' has duplicate slug '{slug}'",
                category.name
            )));
        }

        if category.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no keywords",
                category.name
            )));
        }

        match (&category.target, &category.target_per_tier) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(format!(
                    "category '{}' sets both target and target_per_tier",
                    category.name
                )));
            }
            (None, None) => {
                return Err(ConfigError::Validation(format!(
                    "category '{}' needs either target or target_per_tier",
                    category.name
                )));
            }
            (None, Some(per_tier)) => {
                if let Some(unknown) = per_tier.keys().find(|k| !tier_names.contains(k.as_str()))
                {
                    return Err(ConfigError::Validation(format!(
                        "category '{}' has a quota for unknown tier '{unknown}'",
                        category.name
                    )));
                }
            }
            (Some(_), None) => {}
        }
    }

    Ok(())
}

fn validate_tiers(tiers: &[TierBand]) -> Result<(), ConfigError> {
    if tiers.is_empty() {
        return Err(ConfigError::Validation(
            "at least one tier is required".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();
    for tier in tiers {
        if tier.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tier name must be non-empty".to_string(),
            ));
        }
        if !seen_names.insert(tier.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate tier name: '{}'",
                tier.name
            )));
        }
        let slug = tier.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "tier '{}' has no letters or digits to build a file name from",
                tier.name
            )));
        }
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "tier '{}' has duplicate slug '{slug}'",
                tier.name
            )));
        }
        if let Some(max) = tier.max {
            if max <= tier.min {
                return Err(ConfigError::Validation(format!(
                    "tier '{}' has max {max} not above min {}",
                    tier.name, tier.min
                )));
            }
        }
    }

    // Bands must tile the axis: no gaps, no overlaps.
    for pair in tiers.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if lower.max != Some(upper.min) {
            return Err(ConfigError::Validation(format!(
                "tier '{}' must end where '{}' begins ({})",
                lower.name, upper.name, upper.min
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "targets_test.rs"]
mod tests;
