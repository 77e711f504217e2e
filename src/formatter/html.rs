//! HTML rendering of a draft, styled for pasting into a blog editor.
//!
//! Every value that came from an upstream API (titles, descriptions, links,
//! channel names, transcripts, tags, keywords) is escaped with
//! [`escape_html`] before it is written, including inside attributes.

use super::{
    CHANNEL_LABEL, DESCRIPTION_BUDGET, DraftView, KEYWORD_SECTION_TITLE, TAG_LABEL,
    TRANSCRIPT_BUDGET, VIDEO_SECTION_TITLE,
};
use crate::utils::{escape_html, truncate_chars};

const STYLE: &[&str] = &[
    "  body { font-family: 'Noto Sans KR', sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.8; color: #333; }",
    "  h1 { color: #03c75a; border-bottom: 3px solid #03c75a; padding-bottom: 10px; }",
    "  h2 { color: #1a1a1a; margin-top: 30px; padding: 8px 12px; background: #f5f5f5; border-left: 4px solid #03c75a; }",
    "  h3 { color: #333; margin-top: 20px; }",
    "  blockquote { background: #fafafa; border-left: 3px solid #ddd; margin: 10px 0; padding: 10px 15px; color: #666; }",
    "  a { color: #03c75a; text-decoration: none; }",
    "  a:hover { text-decoration: underline; }",
    "  .keyword { display: inline-block; border: 1px solid #03c75a; color: #03c75a; padding: 2px 10px; border-radius: 12px; margin: 3px; font-size: 14px; }",
    "  .video-card { border: 1px solid #eee; border-radius: 8px; padding: 15px; margin: 10px 0; }",
    "  .video-card img { width: 100%; max-width: 480px; border-radius: 4px; }",
    "  .tags { margin-top: 30px; padding: 10px; background: #f0f0f0; border-radius: 5px; }",
    "  .tag { display: inline-block; background: #03c75a; color: white; padding: 3px 10px; border-radius: 12px; margin: 3px; font-size: 13px; }",
    "  hr { border: none; border-top: 1px solid #eee; margin: 25px 0; }",
];

/// Render the view as a standalone HTML document.
pub fn render(view: &DraftView<'_>) -> String {
    let title = escape_html(&view.title);
    let mut parts: Vec<String> = vec![
        "<!DOCTYPE html>".to_string(),
        "<html lang=\"ko\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"UTF-8\">".to_string(),
        format!("<title>{}</title>", title),
        "<style>".to_string(),
    ];
    parts.extend(STYLE.iter().map(|line| line.to_string()));
    parts.push("</style>".to_string());
    parts.push("</head>".to_string());
    parts.push("<body>".to_string());
    parts.push(format!("<h1>{}</h1>", title));

    if !view.keywords.is_empty() {
        parts.push("<section class=\"keywords\">".to_string());
        parts.push(format!("<h2>{}</h2>", KEYWORD_SECTION_TITLE));
        parts.push(
            view.keywords
                .iter()
                .map(|k| format!("<span class=\"keyword\">{}</span>", escape_html(&k.word)))
                .collect::<Vec<_>>()
                .join(""),
        );
        parts.push("</section>".to_string());
        parts.push("<hr>".to_string());
    }

    for group in &view.groups {
        parts.push("<section class=\"topic\">".to_string());
        parts.push(format!("<h2>{}</h2>", escape_html(&group.topic.heading())));
        parts.push("<ul>".to_string());
        for article in &group.articles {
            let mut item = format!(
                "<li><a href=\"{}\" target=\"_blank\"><strong>{}</strong></a>",
                escape_html(&article.link),
                escape_html(&article.title)
            );
            if !article.description.is_empty() {
                item.push_str(" - ");
                item.push_str(&escape_html(&truncate_chars(
                    &article.description,
                    DESCRIPTION_BUDGET,
                )));
            }
            item.push_str("</li>");
            parts.push(item);
        }
        parts.push("</ul>".to_string());
        parts.push("</section>".to_string());
        parts.push("<hr>".to_string());
    }

    if !view.videos.is_empty() {
        parts.push("<section class=\"videos\">".to_string());
        parts.push(format!("<h2>{}</h2>", VIDEO_SECTION_TITLE));
        for video in view.videos {
            let video_title = escape_html(&video.title);
            parts.push("<article class=\"video-card\">".to_string());
            parts.push(format!("<h3>{}</h3>", video_title));
            parts.push(format!(
                "<p>{}: {}</p>",
                CHANNEL_LABEL,
                escape_html(&video.channel_title)
            ));
            parts.push(format!(
                "<a href=\"{}\" target=\"_blank\"><img src=\"{}\" alt=\"{}\"></a>",
                escape_html(&video.watch_url()),
                escape_html(&video.thumbnail_url()),
                video_title
            ));
            if !video.transcript.is_empty() {
                parts.push(format!(
                    "<blockquote>{}</blockquote>",
                    escape_html(&truncate_chars(&video.transcript, TRANSCRIPT_BUDGET))
                ));
            }
            parts.push("</article>".to_string());
        }
        parts.push("</section>".to_string());
        parts.push("<hr>".to_string());
    }

    parts.push("<footer class=\"tags\">".to_string());
    parts.push(format!("<strong>{}: </strong>", TAG_LABEL));
    for tag in &view.tags {
        parts.push(format!("<span class=\"tag\">{}</span>", escape_html(tag)));
    }
    parts.push("</footer>".to_string());
    parts.push("</body>".to_string());
    parts.push("</html>".to_string());

    let mut html = parts.join("\n");
    html.push('\n');
    html
}
