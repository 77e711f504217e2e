//! YouTube Data API collector.
//!
//! For each tracked channel, asks the `search` endpoint for at most five
//! videos published since local midnight, newest first, then tries to attach
//! a Korean transcript to each one.
//!
//! # Response Shape
//!
//! ```text
//! { "items": [ { "id": { "kind": "youtube#video", "videoId": "..." },
//!                "snippet": { "publishedAt": "...", "title": "...",
//!                             "description": "...", "channelTitle": "..." } } ] }
//! ```
//!
//! The same video returned for two channels is kept twice; entries are only
//! filtered on having a video id.

use super::transcript::TranscriptFetcher;
use super::{VideoSource, http_client};
use crate::models::Video;
use crate::utils::{decode_entities, start_of_day_utc, truncate_for_log};
use chrono::NaiveDate;
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Videos requested per channel.
const MAX_RESULTS: u32 = 5;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: ItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
struct ItemId {
    #[serde(default, rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
}

/// Collects today's uploads for a fixed list of channels.
#[derive(Debug)]
pub struct YouTubeCollector {
    client: reqwest::Client,
    api_key: String,
    channel_ids: Vec<String>,
    transcripts: TranscriptFetcher,
}

impl YouTubeCollector {
    pub fn new(api_key: String, channel_ids: Vec<String>) -> Result<Self, reqwest::Error> {
        let client = http_client()?;
        Ok(Self {
            transcripts: TranscriptFetcher::new(client.clone()),
            client,
            api_key,
            channel_ids,
        })
    }

    #[instrument(level = "debug", skip(self))]
    async fn search(&self, channel_id: &str, published_after: &str) -> Result<Vec<SearchItem>, Box<dyn Error>> {
        let url = Url::parse_with_params(
            SEARCH_URL,
            &[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("order", "date"),
                ("publishedAfter", published_after),
                ("maxResults", &MAX_RESULTS.to_string()),
                ("type", "video"),
                ("key", self.api_key.as_str()),
            ],
        )?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!(
                "video search returned {}: {}",
                status,
                truncate_for_log(&body, 300)
            )
            .into());
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.items)
    }
}

impl VideoSource for YouTubeCollector {
    #[instrument(level = "info", skip_all, fields(%today, channels = self.channel_ids.len()))]
    async fn collect_videos(&self, today: NaiveDate) -> Vec<Video> {
        let published_after = published_after(today);
        let mut videos = Vec::new();

        for channel_id in &self.channel_ids {
            let items = match self.search(channel_id, &published_after).await {
                Ok(items) => items,
                Err(e) => {
                    error!(%channel_id, error = %e, "Video search failed; skipping channel");
                    continue;
                }
            };
            debug!(%channel_id, returned = items.len(), "Video search finished");

            for mut video in videos_from_items(items) {
                video.transcript = match self.transcripts.fetch(&video.video_id).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(video_id = %video.video_id, error = %e, "Transcript unavailable");
                        String::new()
                    }
                };
                videos.push(video);
            }
        }

        info!(count = videos.len(), "Collected videos");
        videos
    }
}

/// Local midnight of `today` as the `publishedAfter` RFC 3339 UTC value.
pub fn published_after(today: NaiveDate) -> String {
    start_of_day_utc(today)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

/// Turn search hits into videos with empty transcripts, dropping hits that
/// carry no video id.
fn videos_from_items(items: Vec<SearchItem>) -> Vec<Video> {
    items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id.filter(|id| !id.trim().is_empty())?;
            Some(Video {
                title: decode_entities(&item.snippet.title),
                description: item.snippet.description,
                video_id,
                channel_title: decode_entities(&item.snippet.channel_title),
                published_at: item.snippet.published_at,
                transcript: String::new(),
            })
        })
        .collect()
}
