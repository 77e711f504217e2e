//! Utility functions for local-time computation, text cleanup and truncation.
//!
//! This module provides helper functions used throughout the application:
//! - The fixed UTC+9 zone and "today" / "start of today" in that zone
//! - Markup stripping and entity decoding for API text fields
//! - HTML escaping for the HTML renderer
//! - Character-budget truncation for rendered descriptions and log output

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use once_cell::sync::Lazy;
use quick_xml::escape::resolve_html5_entity;
use regex::{Captures, Regex};

/// Offset of the local zone (KST) in seconds east of UTC.
const LOCAL_OFFSET_SECS: i32 = 9 * 3600;

/// Marker appended to text cut at a character budget.
pub const ELLIPSIS: &str = "...";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}));").unwrap()
});

/// The fixed UTC+9 zone used for every "today" computation.
pub fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(LOCAL_OFFSET_SECS).unwrap_or(Utc.fix())
}

/// Current calendar date in the local zone, regardless of the host zone.
pub fn today_local() -> NaiveDate {
    Utc::now().with_timezone(&local_offset()).date_naive()
}

/// Local midnight of `date`, expressed in UTC.
///
/// # Examples
///
/// ```ignore
/// // 2025-05-06 00:00 KST is 2025-05-05 15:00 UTC
/// let start = start_of_day_utc(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap());
/// assert_eq!(start.to_rfc3339(), "2025-05-05T15:00:00+00:00");
/// ```
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    local_offset()
        .from_local_datetime(&midnight)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Decode HTML entities (`&quot;`, `&#39;`, `&amp;` ...) in `text`, one
/// level deep.
///
/// Only entity references are touched; markup, comments and line endings
/// pass through unchanged. Unknown names and invalid code points are left
/// as written.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse().ok().and_then(char::from_u32).map(String::from)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
            } else {
                caps.get(3)
                    .and_then(|name| resolve_html5_entity(name.as_str()))
                    .map(str::to_string)
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Decode entities, then remove anything that looks like a tag, then trim.
///
/// Tags are removed after decoding so that escaped markup such as
/// `&lt;b&gt;` is stripped too.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_markup("<b>코스피</b> &quot;급등&quot;"), "코스피 \"급등\"");
/// ```
pub fn strip_markup(text: &str) -> String {
    let decoded = decode_entities(text);
    TAG_RE.replace_all(&decoded, "").trim().to_string()
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep the first `max_chars` characters of `text`, appending [`ELLIPSIS`]
/// when anything was cut.
///
/// Counts Unicode scalar values so Hangul is never split mid-character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("가나다라", 2), "가나...");
/// assert_eq!(truncate_chars("가나", 2), "가나");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes (backing off to a character
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        // each Hangul syllable is three bytes in UTF-8
        let result = truncate_for_log("가나다", 4);
        assert_eq!(result, "가…(+6 bytes)");
    }

    #[test]
    fn test_truncate_chars_cuts_at_exact_budget() {
        let description = "가".repeat(95);
        let result = truncate_chars(&description, 80);
        assert_eq!(result, format!("{}...", "가".repeat(80)));
        assert_eq!(result.chars().count(), 83);
    }

    #[test]
    fn test_truncate_chars_keeps_short_text() {
        assert_eq!(truncate_chars("가나다", 3), "가나다");
        assert_eq!(truncate_chars("", 80), "");
    }

    #[test]
    fn test_strip_markup_removes_tags_and_entities() {
        assert_eq!(
            strip_markup("<b>코스피</b> &quot;급등&quot; &amp; 외국인"),
            "코스피 \"급등\" & 외국인"
        );
    }

    #[test]
    fn test_strip_markup_removes_escaped_tags() {
        assert_eq!(strip_markup("&lt;b&gt;환율&lt;/b&gt; 1400원"), "환율 1400원");
    }

    #[test]
    fn test_strip_markup_trims() {
        assert_eq!(strip_markup("  금리 동결  "), "금리 동결");
    }

    #[test]
    fn test_strip_markup_keeps_text_after_unclosed_markup() {
        assert_eq!(strip_markup("<!-- 코스피 상승"), "<!-- 코스피 상승");
        assert_eq!(strip_markup("환율 <a 급등"), "환율 <a 급등");
    }

    #[test]
    fn test_decode_entities_only_touches_references() {
        assert_eq!(decode_entities("줄\r\n바꿈 &amp; A & B"), "줄\r\n바꿈 & A & B");
        assert_eq!(decode_entities("&#x41;&#66;&nbsp;&bogus; &#xFFFFFF;"), "AB\u{a0}&bogus; &#xFFFFFF;");
        assert_eq!(decode_entities("&amp;#39;"), "&#39;");
    }

    #[test]
    fn test_decode_entities_plain_text_untouched() {
        assert_eq!(decode_entities("반도체 수출"), "반도체 수출");
        assert_eq!(decode_entities("It&#39;s"), "It's");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">A & B's</a>"),
            "&lt;a href=&quot;x&quot;&gt;A &amp; B&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_start_of_day_utc() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
        let start = start_of_day_utc(date);
        assert_eq!(
            start.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            "2025-05-05T15:00:00Z"
        );
    }

    #[test]
    fn test_local_offset_is_utc_plus_nine() {
        assert_eq!(local_offset().local_minus_utc(), 9 * 3600);
    }
}
