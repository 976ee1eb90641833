//! CSV export of accepted creators.
//!
//! One run produces a flat table, a detailed table, and one flat table per
//! category and per tier, all next to the requested output path.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local, Utc};
use creatorscout_core::TargetsConfig;
use creatorscout_finder::CreatorRecord;
use serde::Serialize;

pub(crate) const FLAT_COLUMNS: [&str; 7] = [
    "Channel name",
    "Link",
    "Subscribers",
    "Avg Views",
    "Content Category",
    "Subscriber Category",
    "Why this Creator",
];

pub(crate) const DETAILED_COLUMNS: [&str; 16] = [
    "Channel name",
    "Link",
    "Subscribers",
    "Subscribers (Raw)",
    "Avg Views",
    "Avg Views (Raw)",
    "Content Category",
    "Subscriber Category",
    "Why this Creator",
    "Country",
    "Video Count",
    "Total Views",
    "Created",
    "Description",
    "Partnership Signals",
    "Channel ID",
];

/// Field order must match [`FLAT_COLUMNS`].
#[derive(Debug, Serialize)]
struct FlatRow<'a> {
    channel_name: &'a str,
    link: &'a str,
    subscribers: &'a str,
    avg_views: &'a str,
    content_category: &'a str,
    subscriber_category: &'a str,
    why_this_creator: &'a str,
}

impl<'a> From<&'a CreatorRecord> for FlatRow<'a> {
    fn from(record: &'a CreatorRecord) -> Self {
        Self {
            channel_name: &record.display_name,
            link: &record.canonical_url,
            subscribers: &record.subscriber_count_formatted,
            avg_views: &record.avg_views_formatted,
            content_category: &record.category,
            subscriber_category: &record.tier,
            why_this_creator: &record.why_reason,
        }
    }
}

/// Field order must match [`DETAILED_COLUMNS`].
#[derive(Debug, Serialize)]
struct DetailedRow<'a> {
    channel_name: &'a str,
    link: &'a str,
    subscribers: &'a str,
    subscribers_raw: u64,
    avg_views: &'a str,
    avg_views_raw: u64,
    content_category: &'a str,
    subscriber_category: &'a str,
    why_this_creator: &'a str,
    country: &'a str,
    video_count: u64,
    total_views: u64,
    created: String,
    description: &'a str,
    partnership_signals: String,
    channel_id: &'a str,
}

impl<'a> From<&'a CreatorRecord> for DetailedRow<'a> {
    fn from(record: &'a CreatorRecord) -> Self {
        Self {
            channel_name: &record.display_name,
            link: &record.canonical_url,
            subscribers: &record.subscriber_count_formatted,
            subscribers_raw: record.subscriber_count,
            avg_views: &record.avg_views_formatted,
            avg_views_raw: record.avg_views,
            content_category: &record.category,
            subscriber_category: &record.tier,
            why_this_creator: &record.why_reason,
            country: &record.country_code,
            video_count: record.video_count,
            total_views: record.total_view_count,
            created: fmt_created(record.published_at),
            description: &record.description_excerpt,
            partnership_signals: record.partnership_signals.join("; "),
            channel_id: &record.channel_id,
        }
    }
}

fn fmt_created(published_at: Option<DateTime<Utc>>) -> String {
    published_at.map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string())
}

/// Writes the header row followed by one row per record. The header is
/// written even when there are no records.
fn write_rows<'a, W, R, T>(writer: W, columns: &[&str], records: R) -> anyhow::Result<()>
where
    W: io::Write,
    R: IntoIterator<Item = &'a CreatorRecord>,
    T: Serialize + From<&'a CreatorRecord>,
{
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(columns)?;
    for record in records {
        csv.serialize(T::from(record))?;
    }
    csv.flush()?;
    Ok(())
}

/// Flat table with the fixed seven-column layout.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub(crate) fn write_flat<'a, W, R>(writer: W, records: R) -> anyhow::Result<()>
where
    W: io::Write,
    R: IntoIterator<Item = &'a CreatorRecord>,
{
    write_rows::<W, R, FlatRow<'a>>(writer, &FLAT_COLUMNS, records)
}

/// Every record field, raw numbers next to formatted ones.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub(crate) fn write_detailed<'a, W, R>(writer: W, records: R) -> anyhow::Result<()>
where
    W: io::Write,
    R: IntoIterator<Item = &'a CreatorRecord>,
{
    write_rows::<W, R, DetailedRow<'a>>(writer, &DETAILED_COLUMNS, records)
}

/// `creators_<YYYYmmdd_HHMMSS>.csv` in the working directory.
pub(crate) fn default_output_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("creators_{}.csv", now.format("%Y%m%d_%H%M%S")))
}

/// File names derived from the main output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportPaths {
    pub(crate) flat: PathBuf,
    stem: PathBuf,
}

impl ExportPaths {
    pub(crate) fn new(output: &Path) -> Self {
        let flat = if output.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")) {
            output.to_path_buf()
        } else {
            let mut name = output.as_os_str().to_owned();
            name.push(".csv");
            PathBuf::from(name)
        };
        Self {
            stem: flat.with_extension(""),
            flat,
        }
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.stem.as_os_str().to_owned();
        name.push(suffix);
        name.push(".csv");
        PathBuf::from(name)
    }

    pub(crate) fn detailed(&self) -> PathBuf {
        self.with_suffix("_detailed")
    }

    pub(crate) fn category(&self, slug: &str) -> PathBuf {
        self.with_suffix(&format!("_category_{slug}"))
    }

    pub(crate) fn tier(&self, slug: &str) -> PathBuf {
        self.with_suffix(&format!("_tier_{slug}"))
    }
}

fn create(path: &Path) -> anyhow::Result<File> {
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

/// Writes every export file and returns their paths in write order.
///
/// Segment files are written for every configured category and tier, even
/// when they hold no rows.
///
/// # Errors
///
/// Returns an error if the output directory or any file cannot be written.
pub(crate) fn export_all(
    output: &Path,
    targets: &TargetsConfig,
    records: &[CreatorRecord],
) -> anyhow::Result<Vec<PathBuf>> {
    let paths = ExportPaths::new(output);
    if let Some(parent) = paths.flat.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut written = Vec::new();

    write_flat(create(&paths.flat)?, records)?;
    written.push(paths.flat.clone());

    let detailed = paths.detailed();
    write_detailed(create(&detailed)?, records)?;
    written.push(detailed);

    for category in &targets.categories {
        let path = paths.category(&category.slug());
        write_flat(
            create(&path)?,
            records.iter().filter(|r| r.category == category.name),
        )?;
        written.push(path);
    }

    for tier in &targets.tiers {
        let path = paths.tier(&tier.slug());
        write_flat(
            create(&path)?,
            records.iter().filter(|r| r.tier == tier.name),
        )?;
        written.push(path);
    }

    tracing::info!(files = written.len(), records = records.len(), "export complete");
    Ok(written)
}
