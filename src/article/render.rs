//! HTML and Markdown renderings of a draft.
//!
//! Both functions are pure: the same draft and timestamp always produce the
//! same bytes.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

use crate::article::draft::ArticleDraft;

const STYLESHEET: &str = "\
      body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; color: #333; }
      h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }
      .excerpt { font-size: 1.2em; color: #7f8c8d; margin-bottom: 30px; font-style: italic; border-left: 4px solid #3498db; padding-left: 20px; }
      .featured-image { width: 600px; height: 300px; object-fit: cover; display: block; margin: 20px auto; border-radius: 8px; }
      .content { line-height: 1.8; font-size: 1.1em; }
      .content p { margin-bottom: 1.5em; }
      .metadata-info { margin-top: 40px; padding: 20px; background: #f8f9fa; border-radius: 8px; border-left: 4px solid #28a745; }
";

/// Escape text for inclusion in HTML element content or attribute values.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Split content into trimmed, non-empty paragraphs on newline runs.
pub fn paragraphs(content: &str) -> impl Iterator<Item = &str> {
    content.lines().map(str::trim).filter(|p| !p.is_empty())
}

/// Human-readable creation time used in the HTML footer.
fn display_time(created_at: DateTime<Utc>) -> String {
    created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// ISO-8601 timestamp with millisecond precision.
pub fn iso_timestamp(created_at: DateTime<Utc>) -> String {
    created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render the standalone HTML document for an article.
pub fn render_html(draft: &ArticleDraft, created_at: DateTime<Utc>) -> String {
    let title = escape_html(&draft.title);
    let body = paragraphs(&draft.content)
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  <title>{title}</title>\n  <style>\n{STYLESHEET}  </style>\n</head>\n<body>\n  <h1>{title}</h1>\n  <div class=\"excerpt\">{excerpt}</div>\n",
        excerpt = escape_html(&draft.excerpt),
    );
    if let Some(image) = draft.image.as_deref().filter(|i| !i.is_empty()) {
        let _ = writeln!(
            html,
            "  <img src=\"{}\" alt=\"Featured Image\" class=\"featured-image\">",
            escape_html(image)
        );
    }
    let _ = write!(
        html,
        "  <div class=\"content\">{body}</div>\n  <div class=\"metadata-info\">\n    <p>Created: {created}</p>\n  </div>\n</body>\n</html>\n",
        created = display_time(created_at),
    );
    html
}

/// Render the Markdown document for an article.
pub fn render_markdown(draft: &ArticleDraft, created_at: DateTime<Utc>) -> String {
    format!(
        "# {}\n\n> {}\n\n{}\n\n---\n*Created: {}*\n*Type: Article*",
        draft.title,
        draft.excerpt,
        draft.content,
        iso_timestamp(created_at)
    )
}
