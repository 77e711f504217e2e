//! Korean caption fetching for YouTube videos.
//!
//! The watch page embeds a `"captionTracks":[...]` JSON array; the Korean
//! track's `baseUrl` serves timed-text XML:
//!
//! ```text
//! <transcript><text start="0.0" dur="2.1">오늘 시장은</text>...</transcript>
//! ```
//!
//! Segment text is usually escaped twice (`&amp;#39;`), so each segment is
//! decoded again after XML parsing.

use crate::utils::decode_entities;
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, instrument};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const CAPTION_MARKER: &str = "\"captionTracks\":";
const LANGUAGE: &str = "ko";

#[derive(Debug, Clone, Deserialize)]
pub struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(default, rename = "languageCode")]
    pub language_code: String,
}

#[derive(Debug, Default, Deserialize)]
struct TimedText {
    #[serde(rename = "text", default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Default, Deserialize)]
struct Segment {
    #[serde(rename = "$text", default)]
    text: String,
}

/// Fetches caption text over a shared client.
#[derive(Debug, Clone)]
pub struct TranscriptFetcher {
    client: reqwest::Client,
}

impl TranscriptFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Korean transcript for `video_id` as one line of text.
    ///
    /// Returns an empty string when the video has no Korean track.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, video_id: &str) -> Result<String, Box<dyn Error>> {
        let page = self
            .client
            .get(format!("{}{}", WATCH_URL, video_id))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let Some(caption_url) = korean_caption_url(&page) else {
            debug!("No Korean caption track");
            return Ok(String::new());
        };

        let xml = self
            .client
            .get(caption_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(transcript_from_xml(&xml)?)
    }
}

/// Caption tracks advertised by a watch page. Empty when the page has none
/// or the array cannot be parsed.
pub fn caption_tracks(page: &str) -> Vec<CaptionTrack> {
    let Some(start) = page.find(CAPTION_MARKER) else {
        return Vec::new();
    };
    let rest = &page[start + CAPTION_MARKER.len()..];

    serde_json::Deserializer::from_str(rest)
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .and_then(Result::ok)
        .unwrap_or_default()
}

/// First Korean track, if any.
pub fn korean_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks.iter().find(|t| t.language_code == LANGUAGE)
}

/// Timed-text URL of the watch page's Korean track, if it has one.
pub fn korean_caption_url(page: &str) -> Option<String> {
    let tracks = caption_tracks(page);
    korean_track(&tracks).map(|track| track.base_url.clone())
}

/// Join the segments of a timed-text document into single-spaced text.
pub fn transcript_from_xml(xml: &str) -> Result<String, quick_xml::DeError> {
    let doc: TimedText = quick_xml::de::from_str(xml)?;
    let text = doc
        .segments
        .iter()
        .map(|s| decode_entities(&s.text))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
}
