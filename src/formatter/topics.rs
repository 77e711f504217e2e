//! Topic classification and tag generation.
//!
//! Articles are assigned to the first topic (in declaration order) whose
//! triggers occur in the article's lowercased title and description. Articles
//! matching nothing fall into the catch-all topic, which always renders last.

use crate::models::{Article, Topic, Video};
use itertools::Itertools;

/// Tags every draft starts with, in this order.
pub const BASE_TAGS: &[&str] = &["경제뉴스", "오늘의경제", "경제정리", "주식", "투자"];

/// An ordered topic table plus the catch-all bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    topics: Vec<Topic>,
    other: Topic,
}

/// One non-empty bucket of the grouped output.
#[derive(Debug)]
pub struct TopicGroup<'a> {
    pub topic: &'a Topic,
    pub articles: Vec<&'a Article>,
}

impl Taxonomy {
    pub fn new(topics: Vec<Topic>, other: Topic) -> Self {
        Self { topics, other }
    }

    /// The economic news taxonomy used in production.
    pub fn economy() -> Self {
        Self::new(
            vec![
                Topic::new("증시", Some("📈"), &["증시", "코스피", "코스닥", "주식", "상장", "종목", "주가"]),
                Topic::new("환율", Some("💱"), &["환율", "달러", "엔화", "위안", "원화"]),
                Topic::new("금리", Some("🏦"), &["금리", "기준금리", "한은", "한국은행", "통화정책"]),
                Topic::new("부동산", Some("🏠"), &["부동산", "아파트", "전세", "매매", "분양", "주택"]),
                Topic::new(
                    "조선주",
                    Some("🚢"),
                    &["조선주", "조선업", "조선소", "한화오션", "HD현대중공업", "삼성중공업", "수주"],
                ),
                Topic::new(
                    "반도체",
                    Some("💾"),
                    &["반도체", "삼성전자", "SK하이닉스", "HBM", "파운드리", "메모리", "AI칩"],
                ),
                Topic::new("재테크", Some("💰"), &["재테크", "저축", "적금", "ETF", "펀드", "절세", "연금"]),
                Topic::new("경제 일반", Some("🌐"), &["경제", "GDP", "물가", "인플레이션", "수출", "수입"]),
            ],
            Topic::new("기타", Some("📌"), &[]),
        )
    }

    /// Position of the first declared topic with a trigger in `text`, or
    /// `None` for the catch-all.
    pub fn classify_index(&self, text: &str) -> Option<usize> {
        let lowered = text.to_lowercase();
        self.topics
            .iter()
            .position(|topic| triggers_match(topic, &lowered))
    }

    /// Every topic with a trigger in `text`, in declaration order.
    pub fn all_matches<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a Topic> + 'a {
        let lowered = text.to_lowercase();
        self.topics
            .iter()
            .filter(move |topic| triggers_match(topic, &lowered))
    }
}

fn triggers_match(topic: &Topic, lowered_text: &str) -> bool {
    topic
        .triggers
        .iter()
        .any(|trigger| lowered_text.contains(&trigger.to_lowercase()))
}

/// Group articles by topic, keeping at most `max_per_topic` per bucket.
///
/// Buckets follow the taxonomy's declaration order with the catch-all last;
/// empty buckets are dropped. Within a bucket articles keep collection order,
/// so truncation drops the latest-collected ones.
pub fn group_by_topic<'a>(
    articles: &'a [Article],
    taxonomy: &'a Taxonomy,
    max_per_topic: usize,
) -> Vec<TopicGroup<'a>> {
    let mut buckets: Vec<Vec<&Article>> = vec![Vec::new(); taxonomy.topics.len()];
    let mut other: Vec<&Article> = Vec::new();

    for article in articles {
        match taxonomy.classify_index(&article.searchable_text()) {
            Some(index) => buckets[index].push(article),
            None => other.push(article),
        }
    }

    taxonomy
        .topics
        .iter()
        .zip(buckets)
        .chain(std::iter::once((&taxonomy.other, other)))
        .filter(|(_, bucket)| !bucket.is_empty())
        .map(|(topic, mut bucket)| {
            bucket.truncate(max_per_topic);
            TopicGroup {
                topic,
                articles: bucket,
            }
        })
        .collect()
}

/// Build the tag line: [`BASE_TAGS`] first, then the sorted set of matched
/// topic names and channel titles.
///
/// Topic matching here looks at every article and every matching topic, so a
/// topic counts even when its articles were dropped by the per-topic cap or
/// claimed by an earlier topic during grouping.
pub fn generate_tags(articles: &[Article], videos: &[Video], taxonomy: &Taxonomy) -> Vec<String> {
    let topic_tags = articles.iter().flat_map(|article| {
        taxonomy
            .all_matches(&article.searchable_text())
            .map(|topic| topic.name.clone())
            .collect::<Vec<_>>()
    });
    let channel_tags = videos
        .iter()
        .map(|video| video.channel_title.trim().to_string())
        .filter(|title| !title.is_empty());

    BASE_TAGS
        .iter()
        .map(|tag| tag.to_string())
        .chain(topic_tags.chain(channel_tags).unique().sorted())
        .collect()
}
