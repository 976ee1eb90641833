//! Expands campaign categories into an ordered list of keyword searches.

use creatorscout_core::TargetsConfig;

use crate::types::SearchTask;

/// One task per (category, keyword), in configuration order. Blank keywords
/// are skipped, as are repeats of a keyword within the same category.
#[must_use]
pub fn plan(targets: &TargetsConfig) -> Vec<SearchTask> {
    let mut tasks = Vec::new();
    for category in &targets.categories {
        let mut seen: Vec<String> = Vec::new();
        for keyword in &category.keywords {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                continue;
            }
            let normalised = keyword.to_lowercase();
            if seen.contains(&normalised) {
                continue;
            }
            seen.push(normalised);
            tasks.push(SearchTask {
                category: category.name.clone(),
                keyword: keyword.to_string(),
            });
        }
    }
    tasks
}
