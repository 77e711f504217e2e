//! Turning collected articles and videos into a [`Draft`].
//!
//! # Submodules
//!
//! - [`topics`]: the taxonomy, topic grouping and tag generation
//! - [`keywords`]: weighted keyword ranking
//! - [`markdown`]: the Markdown rendering
//! - [`html`]: the HTML rendering, with inline styles for pasting into a blog editor
//!
//! Both renderers read from the same [`DraftView`] so the two documents stay
//! structurally equivalent.

pub mod html;
pub mod keywords;
pub mod markdown;
pub mod topics;

use crate::models::{Article, Draft, Video};
use chrono::NaiveDate;
use keywords::Keyword;
use topics::{Taxonomy, TopicGroup};
use tracing::{debug, info, instrument};

/// Character budget for article descriptions.
pub const DESCRIPTION_BUDGET: usize = 80;

/// Character budget for video transcripts.
pub const TRANSCRIPT_BUDGET: usize = 300;

pub const VIDEO_SECTION_TITLE: &str = "오늘의 경제 유튜브";
pub const KEYWORD_SECTION_TITLE: &str = "오늘의 키워드";
pub const TAG_LABEL: &str = "태그";
pub const CHANNEL_LABEL: &str = "채널";

/// Formatting knobs that are fixed per deployment but injectable for tests.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions<'a> {
    pub taxonomy: &'a Taxonomy,
    pub max_articles_per_topic: usize,
    pub keyword_limit: usize,
}

/// Everything a renderer needs, computed once.
#[derive(Debug)]
pub struct DraftView<'a> {
    pub title: String,
    pub keywords: Vec<Keyword>,
    pub groups: Vec<TopicGroup<'a>>,
    pub videos: &'a [Video],
    pub tags: Vec<String>,
}

impl<'a> DraftView<'a> {
    pub fn build(
        date: NaiveDate,
        articles: &'a [Article],
        videos: &'a [Video],
        options: FormatOptions<'a>,
    ) -> Self {
        Self {
            title: format!("[{}] 오늘의 경제 뉴스 정리", date.format("%Y-%m-%d")),
            keywords: keywords::extract_keywords(articles, videos, options.keyword_limit),
            groups: topics::group_by_topic(articles, options.taxonomy, options.max_articles_per_topic),
            videos,
            tags: topics::generate_tags(articles, videos, options.taxonomy),
        }
    }
}

/// Classify, rank and render today's collection into both formats.
#[instrument(level = "info", skip_all, fields(%date, articles = articles.len(), videos = videos.len()))]
pub fn format_draft(
    date: NaiveDate,
    articles: &[Article],
    videos: &[Video],
    options: FormatOptions<'_>,
) -> Draft {
    let view = DraftView::build(date, articles, videos, options);
    debug!(
        groups = view.groups.len(),
        keywords = view.keywords.len(),
        tags = view.tags.len(),
        "Built draft view"
    );

    let draft = Draft {
        date,
        markdown: markdown::render(&view),
        html: html::render(&view),
    };
    info!(
        markdown_bytes = draft.markdown.len(),
        html_bytes = draft.html.len(),
        "Rendered draft"
    );
    draft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str) -> Article {
        Article {
            title: title.to_string(),
            description: description.to_string(),
            link: "https://news.example.com/a".to_string(),
            published: None,
            source_keyword: "코스피".to_string(),
        }
    }

    #[test]
    fn test_format_draft_single_article_scenario() {
        let taxonomy = Taxonomy::economy();
        let options = FormatOptions {
            taxonomy: &taxonomy,
            max_articles_per_topic: 3,
            keyword_limit: 12,
        };
        let date = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
        let articles = vec![article("코스피 2600 돌파", "")];

        let view = DraftView::build(date, &articles, &[], options);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].topic.name, "증시");
        assert_eq!(view.keywords[0].word, "코스피");
        assert_eq!(view.keywords[0].weight, 2);
        assert!(view.tags.contains(&"증시".to_string()));

        let draft = format_draft(date, &articles, &[], options);
        assert_eq!(draft.date, date);
        assert!(draft.markdown.contains("## 📈 증시"));
        assert!(draft.html.contains("📈 증시"));
        assert!(draft.markdown.contains("코스피 2600 돌파"));
    }
}
