//! Naver News search collector.
//!
//! Queries the [Naver search API](https://developers.naver.com/docs/serviceapi/search/news/news.md)
//! once per configured keyword, newest first, and keeps only items dated today
//! in the local zone.
//!
//! # Response Shape
//!
//! ```text
//! { "items": [ { "title": "<b>코스피</b> ...", "originallink": "...", "link": "...",
//!                "description": "...", "pubDate": "Tue, 06 May 2025 09:30:00 +0900" } ] }
//! ```
//!
//! Titles and descriptions carry `<b>` highlight tags and HTML entities, both
//! of which are removed before the title is used as the deduplication key.

use super::{NewsSource, http_client};
use crate::config::NaverCredentials;
use crate::models::Article;
use crate::utils::{local_offset, strip_markup, truncate_for_log};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use tracing::{debug, error, info, instrument};

const SEARCH_URL: &str = "https://openapi.naver.com/v1/search/news.json";

/// Results requested per keyword.
const PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<NewsItem>,
}

/// One raw search hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub originallink: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "pubDate")]
    pub pub_date: String,
}

/// Collects today's articles for a fixed list of search keywords.
#[derive(Debug)]
pub struct NaverNewsCollector {
    client: reqwest::Client,
    credentials: NaverCredentials,
    keywords: Vec<String>,
}

impl NaverNewsCollector {
    pub fn new(credentials: NaverCredentials, keywords: Vec<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http_client()?,
            credentials,
            keywords,
        })
    }

    /// Fetch one page of results for `keyword`.
    #[instrument(level = "debug", skip(self))]
    async fn search(&self, keyword: &str) -> Result<Vec<NewsItem>, Box<dyn Error>> {
        let url = format!(
            "{}?query={}&display={}&sort=date",
            SEARCH_URL,
            urlencoding::encode(keyword),
            PAGE_SIZE
        );

        let response = self
            .client
            .get(&url)
            .header("X-Naver-Client-Id", &self.credentials.client_id)
            .header("X-Naver-Client-Secret", &self.credentials.client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!(
                "news search returned {}: {}",
                status,
                truncate_for_log(&body, 300)
            )
            .into());
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.items)
    }
}

impl NewsSource for NaverNewsCollector {
    #[instrument(level = "info", skip_all, fields(%today, keywords = self.keywords.len()))]
    async fn collect_news(&self, today: NaiveDate) -> Vec<Article> {
        let mut seen_titles = HashSet::new();
        let mut articles = Vec::new();

        for keyword in &self.keywords {
            match self.search(keyword).await {
                Ok(items) => {
                    let returned = items.len();
                    let kept = select_articles(items, keyword, today, &mut seen_titles);
                    debug!(%keyword, returned, kept = kept.len(), "News search finished");
                    articles.extend(kept);
                }
                Err(e) => {
                    error!(%keyword, error = %e, "News search failed; skipping keyword");
                }
            }
        }

        info!(count = articles.len(), "Collected news articles");
        articles
    }
}

/// Parse an RFC 2822 `pubDate` into the local zone.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&local_offset()))
}

/// Convert raw hits for `keyword` into articles.
///
/// Items whose date parses to a day other than `today` are dropped; items
/// whose date does not parse are kept. Titles already present in
/// `seen_titles` are dropped, and every kept title is added to it.
pub fn select_articles(
    items: Vec<NewsItem>,
    keyword: &str,
    today: NaiveDate,
    seen_titles: &mut HashSet<String>,
) -> Vec<Article> {
    let mut articles = Vec::new();

    for item in items {
        let published = parse_pub_date(&item.pub_date);
        if let Some(published) = published {
            if published.date_naive() != today {
                continue;
            }
        }

        let title = strip_markup(&item.title);
        if !seen_titles.insert(title.clone()) {
            continue;
        }

        let link = if item.originallink.is_empty() {
            item.link
        } else {
            item.originallink
        };

        articles.push(Article {
            title,
            description: strip_markup(&item.description),
            link,
            published,
            source_keyword: keyword.to_string(),
        });
    }

    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()
    }

    fn item(title: &str, pub_date: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            originallink: String::new(),
            link: "https://n.news.naver.com/1".to_string(),
            description: "설명".to_string(),
            pub_date: pub_date.to_string(),
        }
    }

    #[test]
    fn test_parse_response_fixture() {
        let json = r#"{
            "lastBuildDate": "Tue, 06 May 2025 10:00:00 +0900",
            "total": 2,
            "items": [
                {
                    "title": "<b>코스피</b> 2600 &quot;돌파&quot;",
                    "originallink": "https://press.example.com/1",
                    "link": "https://n.news.naver.com/1",
                    "description": "외국인 &amp; 기관 <b>순매수</b>",
                    "pubDate": "Tue, 06 May 2025 09:30:00 +0900"
                }
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let mut seen = HashSet::new();
        let articles = select_articles(parsed.items, "코스피", today(), &mut seen);

        assert_eq!(articles.len(), 1);
        let article = &articles[0];
        assert_eq!(article.title, "코스피 2600 \"돌파\"");
        assert_eq!(article.description, "외국인 & 기관 순매수");
        assert_eq!(article.link, "https://press.example.com/1");
        assert_eq!(article.source_keyword, "코스피");
        assert_eq!(article.published.unwrap().offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_falls_back_to_portal_link() {
        let mut seen = HashSet::new();
        let articles = select_articles(
            vec![item("환율 상승", "Tue, 06 May 2025 09:30:00 +0900")],
            "환율",
            today(),
            &mut seen,
        );
        assert_eq!(articles[0].link, "https://n.news.naver.com/1");
    }

    #[test]
    fn test_drops_other_days_in_local_zone() {
        let mut seen = HashSet::new();
        let articles = select_articles(
            vec![
                // 23:30 UTC on the 5th is 08:30 KST on the 6th
                item("오늘 기사", "Mon, 05 May 2025 23:30:00 +0000"),
                item("어제 기사", "Mon, 05 May 2025 23:30:00 +0900"),
            ],
            "경제",
            today(),
            &mut seen,
        );
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["오늘 기사"]);
    }

    #[test]
    fn test_keeps_items_with_unparsable_dates() {
        let mut seen = HashSet::new();
        let articles = select_articles(vec![item("날짜 없음", "not a date")], "경제", today(), &mut seen);
        assert_eq!(articles.len(), 1);
        assert!(articles[0].published.is_none());
    }

    #[test]
    fn test_dedups_by_cleaned_title_across_keywords() {
        let mut seen = HashSet::new();
        let date = "Tue, 06 May 2025 09:30:00 +0900";
        let first = select_articles(vec![item("<b>금리</b> 동결", date)], "금리", today(), &mut seen);
        let second = select_articles(
            vec![item("금리 동결", date), item("금리 동결", date)],
            "경제",
            today(),
            &mut seen,
        );
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut seen = HashSet::new();
        let date = "Tue, 06 May 2025 09:30:00 +0900";
        let articles = select_articles(
            vec![item("ETF 순유입", date), item("etf 순유입", date)],
            "재테크",
            today(),
            &mut seen,
        );
        assert_eq!(articles.len(), 2);
    }

    #[test]
    fn test_missing_fields_default() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"items":[{"title":"제목"}]}"#).unwrap();
        assert_eq!(parsed.items[0].title, "제목");
        assert!(parsed.items[0].pub_date.is_empty());

        let empty: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.items.is_empty());
    }
}
