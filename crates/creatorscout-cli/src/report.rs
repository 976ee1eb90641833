//! Console output: the run banner and the end-of-run summary.

use std::fmt;
use std::path::PathBuf;

use creatorscout_core::TargetsConfig;
use creatorscout_finder::RunSummary;

const RULE: &str = "======================================================================";

pub(crate) const MISSING_KEY_HELP: &str = "\
error: YOUTUBE_API_KEY is not set

To get an API key:
  1. Open https://console.cloud.google.com/
  2. Create a project (or select an existing one)
  3. APIs & Services > Library: enable \"YouTube Data API v3\"
  4. APIs & Services > Credentials: Create Credentials > API Key
  5. Export it as YOUTUBE_API_KEY or add it to .env";

/// Tier targets and categories, printed before searching starts.
pub(crate) struct Banner<'a>(pub(crate) &'a TargetsConfig);

impl fmt::Display for Banner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets = self.0;
        writeln!(f, "{RULE}")?;
        writeln!(f, "creatorscout: YouTube creator search")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "\nTier targets:")?;
        for tier in &targets.tiers {
            writeln!(f, "  {}: {} creators", tier.name, tier.target_count)?;
        }
        let total: u32 = targets.tiers.iter().map(|t| t.target_count).sum();
        writeln!(f, "  Total: {total} creators")?;
        writeln!(f, "\nCategories:")?;
        for category in &targets.categories {
            let target = category.quota().total();
            if category.description.is_empty() {
                writeln!(f, "  {} (target {target})", category.name)?;
            } else {
                writeln!(
                    f,
                    "  {} (target {target}): {}",
                    category.name, category.description
                )?;
            }
        }
        write!(f, "{RULE}")
    }
}

/// Accepted counts by category and tier, rejections, and written files.
pub(crate) struct Summary<'a> {
    pub(crate) summary: &'a RunSummary,
    pub(crate) files: &'a [PathBuf],
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;
        writeln!(f, "\n{RULE}")?;
        writeln!(f, "Search complete")?;
        writeln!(f, "{RULE}")?;

        writeln!(f, "\nOutput files:")?;
        for file in self.files {
            writeln!(f, "  {}", file.display())?;
        }

        writeln!(f, "\nTotal creators found: {}", summary.accepted)?;
        writeln!(
            f,
            "Keywords searched: {} (skipped {}), candidates: {}",
            summary.keywords_searched, summary.keywords_skipped, summary.candidates_found
        )?;

        writeln!(f, "\nBy category:")?;
        for category in &summary.categories {
            writeln!(
                f,
                "  {}: {}/{}",
                category.name, category.accepted, category.target
            )?;
            for (tier, n) in category.per_tier.iter().filter(|(_, n)| *n > 0) {
                writeln!(f, "    {tier}: {n}")?;
            }
        }

        writeln!(f, "\nBy tier:")?;
        for tier in &summary.tiers {
            writeln!(
                f,
                "  {}: {}/{}",
                tier.name, tier.accepted, tier.target_count
            )?;
        }

        if !summary.rejections.is_empty() {
            writeln!(f, "\nRejected:")?;
            for (reason, n) in &summary.rejections {
                writeln!(f, "  {reason}: {n}")?;
            }
        }
        Ok(())
    }
}
