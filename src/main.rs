//! # Daily Econ Digest
//!
//! Collects today's Korean economic news and YouTube videos, groups the news
//! by topic, and writes a blog-ready draft in Markdown and HTML.
//!
//! ## Usage
//!
//! ```sh
//! daily_econ_digest [--overwrite]
//! ```
//!
//! ## Architecture
//!
//! One run is a straight pipeline:
//! 1. **Collecting**: Naver news search per keyword, YouTube search per channel
//!    (with Korean transcripts)
//! 2. **Formatting**: topic grouping, keyword ranking, tags, both renderings
//! 3. **Storing**: `drafts/{date}.md` and `drafts/{date}.html`
//! 4. **Notifying**: one multipart email to the configured Gmail account
//!
//! Each stage is optional in the sense that missing credentials disable it
//! with a warning; a failure inside a stage is logged and never stops the run.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collectors;
mod config;
mod formatter;
mod models;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;
use collectors::naver::NaverNewsCollector;
use collectors::youtube::YouTubeCollector;
use config::Settings;
use outputs::drafts::DraftStore;
use outputs::email::GmailNotifier;
use pipeline::RunReport;
use utils::today_local;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_econ_digest starting up");

    let args = Cli::parse();
    debug!(overwrite = args.overwrite, "Parsed CLI arguments");

    let settings = Settings::from_env();
    settings.warn_disabled();

    let news = match &settings.naver {
        Some(credentials) => Some(NaverNewsCollector::new(
            credentials.clone(),
            settings.news_keywords.clone(),
        )?),
        None => None,
    };
    let videos = match &settings.youtube_api_key {
        Some(api_key) => Some(YouTubeCollector::new(
            api_key.clone(),
            settings.channel_ids.clone(),
        )?),
        None => None,
    };
    let store = DraftStore::new(settings.drafts_dir.clone());
    let notifier = settings.mail.clone().map(GmailNotifier::new);

    let today = today_local();
    info!(%today, drafts_dir = %store.dir().display(), "Starting run");

    let report = pipeline::run(
        &news,
        &videos,
        &store,
        &notifier,
        settings.format_options(),
        today,
        args.overwrite,
    )
    .await;

    match &report {
        RunReport::NothingCollected => {
            warn!("No news or videos collected today; nothing to publish");
        }
        RunReport::Completed {
            articles,
            videos,
            saved,
            delivery,
        } => {
            info!(
                articles,
                videos,
                saved = saved.len(),
                ?delivery,
                "Run summary"
            );
            for path in saved {
                info!(path = %path.display(), "Saved draft");
            }
            if saved.is_empty() {
                warn!("No draft files were saved; pass --overwrite to replace existing drafts");
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
