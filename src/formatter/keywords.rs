//! Ranking of "today's keywords" by weighted word frequency.
//!
//! Words are pulled from article titles (weight 2), article descriptions
//! (weight 1) and video titles (weight 1). Candidates are Hangul runs of two
//! or more syllables, stretches of two or more uppercase Latin letters
//! (acronyms such as `HBM`, also inside `HBMs`), and all-lowercase Latin runs
//! of four or more letters. Descriptions only contribute Hangul and acronym
//! tokens.

use crate::models::{Article, Video};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

const TITLE_WEIGHT: u32 = 2;
const DESCRIPTION_WEIGHT: u32 = 1;
const VIDEO_TITLE_WEIGHT: u32 = 1;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[가-힣]+|[A-Za-z]+").unwrap());
static ACRONYM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{2,}").unwrap());

/// Words too generic to be worth surfacing.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // news boilerplate
        "기자", "뉴스", "속보", "종합", "단독", "특징주", "포토", "영상", "오늘", "내일", "어제",
        "올해", "지난해", "이번", "최근", "현재", "전망", "관련", "대한", "위해", "통해", "대해",
        "때문", "이후", "이상", "이하", "가운데", "것으로", "했다", "한다", "있다", "없다", "된다",
        "밝혔다", "말했다", "예정", "우리", "그리고", "하지만", "또한", "경우", "정도", "이날",
        // latin filler
        "this", "that", "with", "from", "have", "will", "what", "your", "about", "news", "http",
        "https", "www",
    ]
    .into_iter()
    .collect()
});

/// A ranked keyword and its accumulated weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub word: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenScope {
    /// Hangul, acronyms and lowercase words.
    Full,
    /// Hangul and acronyms only.
    Restricted,
}

fn is_hangul(c: char) -> bool {
    ('가'..='힣').contains(&c)
}

/// Split `text` into candidate keywords, dropping stop-words.
fn tokenize(text: &str, scope: TokenScope) -> impl Iterator<Item = &str> {
    WORD_RE
        .find_iter(text)
        .flat_map(move |m| candidates(m.as_str(), scope))
        .filter(|word| !STOP_WORDS.contains(*word))
}

/// Candidates inside one Hangul or Latin run. A Latin run that is not all
/// lowercase contributes only its uppercase stretches (`ETFs` gives `ETF`).
fn candidates(run: &str, scope: TokenScope) -> Vec<&str> {
    if run.chars().all(is_hangul) {
        if run.chars().count() >= 2 { vec![run] } else { Vec::new() }
    } else if run.chars().all(|c| c.is_ascii_lowercase()) {
        if scope == TokenScope::Full && run.len() >= 4 { vec![run] } else { Vec::new() }
    } else {
        ACRONYM_RE.find_iter(run).map(|m| m.as_str()).collect()
    }
}

/// Weighted counter that remembers first-encounter order.
#[derive(Default)]
struct Tally {
    order: Vec<Keyword>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, word: &str, weight: u32) {
        match self.index.get(word) {
            Some(&i) => self.order[i].weight += weight,
            None => {
                self.index.insert(word.to_string(), self.order.len());
                self.order.push(Keyword {
                    word: word.to_string(),
                    weight,
                });
            }
        }
    }

    fn add_all(&mut self, text: &str, scope: TokenScope, weight: u32) {
        for word in tokenize(text, scope) {
            self.add(word, weight);
        }
    }

    fn top(mut self, limit: usize) -> Vec<Keyword> {
        // sort_by is stable, so equal weights keep encounter order
        self.order.sort_by(|a, b| b.weight.cmp(&a.weight));
        self.order.truncate(limit);
        self.order
    }
}

/// Rank the most frequent keywords across today's articles and videos.
///
/// Encounter order is: each article's title then its description, in
/// collection order, followed by the video titles.
pub fn extract_keywords(articles: &[Article], videos: &[Video], limit: usize) -> Vec<Keyword> {
    let mut tally = Tally::default();
    for article in articles {
        tally.add_all(&article.title, TokenScope::Full, TITLE_WEIGHT);
        tally.add_all(&article.description, TokenScope::Restricted, DESCRIPTION_WEIGHT);
    }
    for video in videos {
        tally.add_all(&video.title, TokenScope::Full, VIDEO_TITLE_WEIGHT);
    }
    tally.top(limit)
}
