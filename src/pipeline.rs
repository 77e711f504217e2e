//! One end-to-end run: collect, format, store, notify.
//!
//! Stages run strictly in sequence. The only early exit is when both
//! collectors come back empty; after a draft exists, notification is attempted
//! whatever the store reported.

use crate::collectors::{NewsSource, VideoSource};
use crate::formatter::{FormatOptions, format_draft};
use crate::outputs::{Delivery, DraftNotifier, DraftSink};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    NothingCollected,
    Completed {
        articles: usize,
        videos: usize,
        saved: Vec<PathBuf>,
        delivery: Delivery,
    },
}

/// Execute a full run for `today`.
#[instrument(level = "info", skip_all, fields(%today, overwrite = overwrite))]
pub async fn run<N, V, S, M>(
    news: &N,
    videos: &V,
    store: &S,
    notifier: &M,
    options: FormatOptions<'_>,
    today: NaiveDate,
    overwrite: bool,
) -> RunReport
where
    N: NewsSource,
    V: VideoSource,
    S: DraftSink,
    M: DraftNotifier,
{
    let articles = news.collect_news(today).await;
    let collected_videos = videos.collect_videos(today).await;
    info!(
        articles = articles.len(),
        videos = collected_videos.len(),
        "Collection finished"
    );

    if articles.is_empty() && collected_videos.is_empty() {
        info!("Nothing collected today; no draft produced");
        return RunReport::NothingCollected;
    }

    let draft = format_draft(today, &articles, &collected_videos, options);

    let saved = match store.save(&draft, overwrite).await {
        Ok(saved) => saved,
        Err(e) => {
            error!(error = %e, "Failed to store draft");
            Vec::new()
        }
    };

    let delivery = notifier.notify(&draft).await;

    RunReport::Completed {
        articles: articles.len(),
        videos: collected_videos.len(),
        saved,
        delivery,
    }
}
