//! Data models shared by the collectors, the formatter and the outputs.
//!
//! This module defines the records that flow through one run of the pipeline:
//! - [`Article`]: a cleaned news search result
//! - [`Video`]: a YouTube upload with its (possibly empty) transcript
//! - [`Topic`]: one entry of the classification taxonomy
//! - [`Draft`]: the rendered Markdown and HTML documents for a single day
//!
//! All records are created fresh on every run and never mutated after
//! collection.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// A news article returned by the news search API, after markup stripping.
///
/// The `title` is the deduplication key within a run: two search results with
/// the same cleaned title produce a single `Article`.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Headline with HTML tags removed and entities decoded.
    pub title: String,
    /// Summary snippet with HTML tags removed and entities decoded.
    pub description: String,
    /// Publisher URL (`originallink`), or the portal URL when absent.
    pub link: String,
    /// Publication time in the local (UTC+9) zone, `None` if unparsable.
    pub published: Option<DateTime<FixedOffset>>,
    /// The search keyword that surfaced this article.
    pub source_keyword: String,
}

impl Article {
    /// Title and description joined by a space, as used for topic matching.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// A video uploaded today by one of the tracked channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub title: String,
    pub description: String,
    /// YouTube video id; never empty.
    pub video_id: String,
    pub channel_title: String,
    /// Raw `publishedAt` value from the search API (RFC 3339, UTC).
    pub published_at: String,
    /// Korean captions joined by single spaces; empty when unavailable.
    pub transcript: String,
}

impl Video {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.video_id)
    }
}

/// One bucket of the topic taxonomy.
///
/// Triggers are matched case-insensitively as substrings of an article's
/// title and description. The order of triggers within a topic does not
/// affect the result; the order of topics within a [`Taxonomy`] does.
///
/// [`Taxonomy`]: crate::formatter::topics::Taxonomy
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub name: String,
    pub icon: Option<String>,
    pub triggers: Vec<String>,
}

impl Topic {
    pub fn new(name: &str, icon: Option<&str>, triggers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.map(str::to_string),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Heading text, prefixed with the icon when one is configured.
    pub fn heading(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{} {}", icon, self.name),
            None => self.name.clone(),
        }
    }
}

/// The rendered output of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// The run date in the local (UTC+9) zone.
    pub date: NaiveDate,
    pub markdown: String,
    pub html: String,
}

impl Draft {
    /// `YYYY-MM-DD`, used for file names and the mail subject.
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Title shared by both renderings and the notification subject.
    pub fn title(&self) -> String {
        format!("[{}] 오늘의 경제 뉴스 정리", self.date_label())
    }
}
