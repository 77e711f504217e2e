//! Collectors that pull today's raw material from upstream APIs.
//!
//! # Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Naver News | [`naver`] | Search API (JSON) | One request per keyword; needs client id/secret |
//! | YouTube | [`youtube`] | Data API v3 search (JSON) | One request per channel; needs API key |
//! | YouTube captions | [`transcript`] | Watch page + timed-text XML | Best effort, Korean only |
//!
//! # Common Patterns
//!
//! Each collector:
//! - Issues its requests strictly one after another with a 10 second timeout
//! - Logs and skips a failed keyword/channel/video instead of failing the run
//! - Keeps the response-to-record conversion in a pure function so it can be
//!   tested against JSON fixtures
//!
//! A collector whose credentials are missing is simply not constructed; the
//! `Option<T>` implementations below then yield nothing.

pub mod naver;
pub mod transcript;
pub mod youtube;

use crate::models::{Article, Video};
use chrono::NaiveDate;
use std::time::Duration;

/// Per-request timeout shared by every collector.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can produce today's news articles.
pub trait NewsSource {
    /// Collect articles dated `today`. Never fails; problems are logged.
    async fn collect_news(&self, today: NaiveDate) -> Vec<Article>;
}

/// Something that can produce today's videos.
pub trait VideoSource {
    /// Collect videos published on `today`. Never fails; problems are logged.
    async fn collect_videos(&self, today: NaiveDate) -> Vec<Video>;
}

impl<T: NewsSource> NewsSource for Option<T> {
    async fn collect_news(&self, today: NaiveDate) -> Vec<Article> {
        match self {
            Some(source) => source.collect_news(today).await,
            None => Vec::new(),
        }
    }
}

impl<T: VideoSource> VideoSource for Option<T> {
    async fn collect_videos(&self, today: NaiveDate) -> Vec<Video> {
        match self {
            Some(source) => source.collect_videos(today).await,
            None => Vec::new(),
        }
    }
}

/// HTTP client shared by the collectors, with the per-request timeout applied.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
