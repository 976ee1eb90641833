//! Display strings for exported records.

/// Upper bounds (exclusive) and labels for the average-view buckets. Anything
/// at or above the last bound is `1M+`.
const VIEW_BUCKETS: [(u64, &str); 9] = [
    (1_000, "0-1K"),
    (5_000, "1K-5K"),
    (10_000, "5K-10K"),
    (20_000, "10K-20K"),
    (50_000, "20K-50K"),
    (100_000, "50K-100K"),
    (300_000, "100K-300K"),
    (500_000, "300K-500K"),
    (1_000_000, "500K-1M"),
];

/// Compact subscriber count: `2.24M`, `184.0K`, or the plain number below
/// one thousand.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_subscriber_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.2}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Bucketed range label for an average view count.
#[must_use]
pub fn format_view_range(avg_views: u64) -> &'static str {
    VIEW_BUCKETS
        .iter()
        .find(|(upper, _)| avg_views < *upper)
        .map_or("1M+", |(_, label)| *label)
}

/// First `max_chars` characters of `text`, never splitting a code point.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
