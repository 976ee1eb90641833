mod export;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use creatorscout_core::TargetsConfig;
use creatorscout_finder::{Finder, FinderSettings};
use creatorscout_youtube::{FixedDelay, YoutubeClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "creatorscout")]
#[command(about = "Find YouTube creators for a campaign and export them to CSV")]
struct Cli {
    /// Main CSV output path; detailed and segmented files are written next to it
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Campaign targets YAML (overrides `CREATORSCOUT_TARGETS_PATH`)
    #[arg(long)]
    targets: Option<PathBuf>,
}

fn load_campaign(path: Option<&Path>) -> anyhow::Result<TargetsConfig> {
    match path {
        Some(path) => creatorscout_core::load_targets(path)
            .with_context(|| format!("invalid targets file {}", path.display())),
        None => creatorscout_core::default_targets().context("invalid built-in targets"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = creatorscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let Some(api_key) = config.youtube_api_key.as_deref() else {
        eprintln!("{}", report::MISSING_KEY_HELP);
        return Ok(ExitCode::FAILURE);
    };

    let targets = load_campaign(cli.targets.as_deref().or(config.targets_path.as_deref()))?;

    let client = YoutubeClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.api_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build YouTube client: {e}"))?;

    println!("{}", report::Banner(&targets));

    let finder = Finder::new(
        client,
        FixedDelay::from_millis(config.page_delay_ms),
        FixedDelay::from_millis(config.accept_delay_ms),
        FinderSettings::from(&config),
    );
    let outcome = finder.run(&targets).await;

    let output = cli
        .output
        .unwrap_or_else(|| export::default_output_path(chrono::Local::now()));
    let files = export::export_all(&output, &targets, &outcome.records)?;

    print!(
        "{}",
        report::Summary {
            summary: &outcome.summary,
            files: &files,
        }
    );
    Ok(ExitCode::SUCCESS)
}
