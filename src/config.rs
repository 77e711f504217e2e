//! Run configuration: optional credentials from the environment plus the
//! fixed in-code tables (search keywords, channels, taxonomy, limits).
//!
//! Credentials are read once at start-up. A credential that is unset or blank
//! disables the component that needs it; [`Settings::warn_disabled`] reports
//! each disabled component exactly once.

use crate::formatter::FormatOptions;
use crate::formatter::topics::Taxonomy;
use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Search keywords sent to the news API, one request each.
pub const NEWS_KEYWORDS: &[&str] = &[
    "증시", "환율", "금리", "부동산", "코스피", "코스닥", "경제", "조선주", "반도체", "재테크",
];

/// Tracked YouTube channels.
pub const YOUTUBE_CHANNEL_IDS: &[&str] = &[
    "UCF8AeLlUbEpKju6v1H6p8Eg",
    "UCsJ6RuBiTVWRX156FVbeaGg",
    "UCJo6G1u0e_-wS-JQn3T-zEw",
    "UChlv4GSd7OQl3js-jkLOnFA",
    "UCntrdZrZwXiPxdObi5MHqBw",
];

pub const MAX_ARTICLES_PER_TOPIC: usize = 3;

/// How many ranked keywords the draft shows.
pub const KEYWORD_LIMIT: usize = 12;

pub const DRAFTS_DIR: &str = "drafts";

/// Client id/secret pair for the Naver search API.
#[derive(Clone, PartialEq)]
pub struct NaverCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for NaverCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaverCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Gmail account used as both sender and recipient.
#[derive(Clone, PartialEq)]
pub struct MailCredentials {
    pub address: String,
    pub app_password: String,
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("address", &self.address)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

/// Everything a run needs to know before it starts.
#[derive(Debug, Clone)]
pub struct Settings {
    pub naver: Option<NaverCredentials>,
    pub youtube_api_key: Option<String>,
    pub mail: Option<MailCredentials>,
    pub news_keywords: Vec<String>,
    pub channel_ids: Vec<String>,
    pub taxonomy: Taxonomy,
    pub max_articles_per_topic: usize,
    pub keyword_limit: usize,
    pub drafts_dir: PathBuf,
}

impl Settings {
    /// Load `.env` (if any) and read credentials from the process environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) => debug!(error = %e, "No .env file loaded"),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let naver = match (get("NAVER_CLIENT_ID"), get("NAVER_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(NaverCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };
        let mail = match (get("GMAIL_ADDRESS"), get("GMAIL_APP_PASSWORD")) {
            (Some(address), Some(app_password)) => Some(MailCredentials {
                address,
                app_password,
            }),
            _ => None,
        };

        Self {
            naver,
            youtube_api_key: get("YOUTUBE_API_KEY"),
            mail,
            news_keywords: NEWS_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            channel_ids: YOUTUBE_CHANNEL_IDS.iter().map(|s| s.to_string()).collect(),
            taxonomy: Taxonomy::economy(),
            max_articles_per_topic: MAX_ARTICLES_PER_TOPIC,
            keyword_limit: KEYWORD_LIMIT,
            drafts_dir: PathBuf::from(DRAFTS_DIR),
        }
    }

    pub fn format_options(&self) -> FormatOptions<'_> {
        FormatOptions {
            taxonomy: &self.taxonomy,
            max_articles_per_topic: self.max_articles_per_topic,
            keyword_limit: self.keyword_limit,
        }
    }

    /// Emit one warning per component that will be skipped this run.
    pub fn warn_disabled(&self) {
        if self.naver.is_none() {
            warn!("NAVER_CLIENT_ID / NAVER_CLIENT_SECRET not set; news collection disabled");
        }
        if self.youtube_api_key.is_none() {
            warn!("YOUTUBE_API_KEY not set; video collection disabled");
        }
        if self.mail.is_none() {
            warn!("GMAIL_ADDRESS / GMAIL_APP_PASSWORD not set; email delivery disabled");
        }
    }
}
