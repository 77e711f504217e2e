//! Markdown rendering of a draft.
//!
//! Layout:
//!
//! ```text
//! # [2025-05-06] 오늘의 경제 뉴스 정리
//!
//! ---
//!
//! ## 오늘의 키워드          (only when keywords exist)
//! `코스피` `반도체` ...
//!
//! ## 📈 증시                (one per non-empty topic, 기타 last)
//! - **[title](link)** - description...
//!
//! ## 오늘의 경제 유튜브      (only when videos exist)
//! ### video title
//! 채널: channel
//! [![영상 보기](thumb)](watch)
//! > transcript...           (only when a transcript exists)
//!
//! **태그**: a, b, c
//! ```

use super::{
    CHANNEL_LABEL, DESCRIPTION_BUDGET, DraftView, KEYWORD_SECTION_TITLE, TAG_LABEL,
    TRANSCRIPT_BUDGET, VIDEO_SECTION_TITLE,
};
use crate::utils::truncate_chars;
use std::fmt::Write;

/// Render the view as Markdown. Lines are joined with `\n` and the document
/// ends with a single trailing newline.
pub fn render(view: &DraftView<'_>) -> String {
    let mut md = String::new();

    // writeln! into a String cannot fail
    let _ = writeln!(md, "# {}\n\n---\n", view.title);

    if !view.keywords.is_empty() {
        let line = view
            .keywords
            .iter()
            .map(|k| format!("`{}`", k.word))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(md, "## {}\n\n{}\n\n---\n", KEYWORD_SECTION_TITLE, line);
    }

    for group in &view.groups {
        let _ = writeln!(md, "## {}\n", group.topic.heading());
        for article in &group.articles {
            let _ = write!(md, "- **[{}]({})**", article.title, article.link);
            if !article.description.is_empty() {
                let _ = write!(md, " - {}", truncate_chars(&article.description, DESCRIPTION_BUDGET));
            }
            md.push('\n');
        }
        md.push_str("\n---\n\n");
    }

    if !view.videos.is_empty() {
        let _ = writeln!(md, "## {}\n", VIDEO_SECTION_TITLE);
        for video in view.videos {
            let _ = writeln!(md, "### {}", video.title);
            let _ = writeln!(md, "{}: {}\n", CHANNEL_LABEL, video.channel_title);
            let _ = writeln!(
                md,
                "[![영상 보기]({})]({})\n",
                video.thumbnail_url(),
                video.watch_url()
            );
            if !video.transcript.is_empty() {
                let _ = writeln!(md, "> {}\n", truncate_chars(&video.transcript, TRANSCRIPT_BUDGET));
            }
        }
        md.push_str("---\n\n");
    }

    let _ = writeln!(md, "**{}**: {}", TAG_LABEL, view.tags.join(", "));
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::FormatOptions;
    use crate::formatter::topics::Taxonomy;
    use crate::models::{Article, Video};
    use chrono::NaiveDate;

    fn article(title: &str, description: &str) -> Article {
        Article {
            title: title.to_string(),
            description: description.to_string(),
            link: "https://news.example.com/1".to_string(),
            published: None,
            source_keyword: "증시".to_string(),
        }
    }

    fn video(transcript: &str) -> Video {
        Video {
            title: "오늘 시장 정리".to_string(),
            description: String::new(),
            video_id: "abc123".to_string(),
            channel_title: "경제채널".to_string(),
            published_at: "2025-05-06T01:00:00Z".to_string(),
            transcript: transcript.to_string(),
        }
    }

    fn render_with(articles: &[Article], videos: &[Video]) -> String {
        let taxonomy = Taxonomy::economy();
        let options = FormatOptions {
            taxonomy: &taxonomy,
            max_articles_per_topic: 3,
            keyword_limit: 12,
        };
        let date = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
        render(&DraftView::build(date, articles, videos, options))
    }

    #[test]
    fn test_header_and_article_bullet() {
        let md = render_with(&[article("코스피 2600 돌파", "외국인 순매수")], &[]);
        assert!(md.starts_with("# [2025-05-06] 오늘의 경제 뉴스 정리\n\n---\n"));
        assert!(md.contains("## 📈 증시\n\n- **[코스피 2600 돌파](https://news.example.com/1)** - 외국인 순매수\n"));
        assert!(md.ends_with("**태그**: 경제뉴스, 오늘의경제, 경제정리, 주식, 투자, 증시\n"));
    }

    #[test]
    fn test_keyword_section() {
        let md = render_with(&[article("코스피 2600 돌파", "")], &[]);
        assert!(md.contains("## 오늘의 키워드\n\n`코스피` `돌파`\n"));
    }

    #[test]
    fn test_long_description_truncated_at_budget() {
        let description: String = "가 ".repeat(48).chars().take(95).collect();
        assert_eq!(description.chars().count(), 95);

        let md = render_with(&[article("코스피 상승", &description)], &[]);
        let kept: String = description.chars().take(80).collect();
        assert!(md.contains(&format!(" - {}...\n", kept)));
        assert!(!md.contains(&description));
    }

    #[test]
    fn test_empty_description_has_no_separator() {
        let md = render_with(&[article("코스피 상승", "")], &[]);
        assert!(md.contains("- **[코스피 상승](https://news.example.com/1)**\n"));
    }

    #[test]
    fn test_video_without_transcript_has_no_blockquote() {
        let md = render_with(&[], &[video("")]);
        assert!(md.contains("## 오늘의 경제 유튜브"));
        assert!(md.contains("### 오늘 시장 정리\n채널: 경제채널\n"));
        assert!(md.contains(
            "[![영상 보기](https://img.youtube.com/vi/abc123/mqdefault.jpg)](https://www.youtube.com/watch?v=abc123)"
        ));
        assert!(!md.contains("\n> "));
    }

    #[test]
    fn test_video_transcript_truncated() {
        let transcript = "나".repeat(350);
        let md = render_with(&[], &[video(&transcript)]);
        assert!(md.contains(&format!("> {}...\n", "나".repeat(300))));
    }

    #[test]
    fn test_missing_sections_are_omitted() {
        let md = render_with(&[], &[]);
        assert!(!md.contains("오늘의 키워드"));
        assert!(!md.contains("오늘의 경제 유튜브"));
        assert!(!md.contains("## "));
        assert!(md.contains("**태그**"));
    }
}
