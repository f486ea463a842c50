//! HTML rendering.
//!
//! All user- and engine-sourced text passes through `escape_text` or
//! `escape_highlight` before it is written into markup.

use super::types::SearchPage;
use crate::backend::query::{HIGHLIGHT_POST, HIGHLIGHT_PRE};
use axum::http::StatusCode;
use std::fmt::Write;

const LANDING_HTML: &str = include_str!("landing.html");

const RESULTS_STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 0; padding: 0; background-color: #f8f9fa; color: #333; }
        .container { max-width: 800px; margin: 2rem auto; padding: 1rem; background: #fff; border: 1px solid #ddd; border-radius: 5px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }
        h2 { text-align: center; color: #007bff; }
        .summary { text-align: center; color: #666; font-size: 0.9rem; }
        .results { margin-top: 1.5rem; }
        .result-item { padding: 1rem; margin-bottom: 1rem; border-bottom: 1px solid #ddd; }
        .result-item:last-child { border-bottom: none; }
        .result-item strong { color: #007bff; font-size: 1.2rem; }
        em { background-color: yellow; font-weight: bold; font-style: normal; }
        a { color: #007bff; text-decoration: none; }
        a:hover { text-decoration: underline; }
        .pagination { text-align: center; margin-top: 1rem; }
"#;

pub fn render_landing() -> &'static str {
    LANDING_HTML
}

/// Escape plain text for an HTML text node.
pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escape a highlight fragment, then restore the engine's highlight markers.
///
/// Anything else in the fragment that looks like markup stays escaped.
pub fn escape_highlight(fragment: &str) -> String {
    let escaped = html_escape::encode_text(fragment);
    escaped
        .replace(&*html_escape::encode_text(HIGHLIGHT_PRE), HIGHLIGHT_PRE)
        .replace(&*html_escape::encode_text(HIGHLIGHT_POST), HIGHLIGHT_POST)
}

/// Relative link to another page of the same search.
pub fn page_link(query: &str, page: u64) -> String {
    format!("/search?query={}&page={}", urlencoding::encode(query), page)
}

pub fn render_results(page: &SearchPage) -> String {
    let query = escape_text(&page.query);
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Search Results</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h2>Search Results for: <strong>{query}</strong></h2>
        <p class="summary">{found} result(s), page {page}</p>
        <div class="results">
"#,
        style = RESULTS_STYLE,
        query = query,
        found = page.num_found,
        page = page.page,
    );

    if page.documents.is_empty() {
        html.push_str("            <p>No results found.</p>\n");
    } else {
        for doc in &page.documents {
            let _ = write!(
                html,
                r#"            <div class="result-item" data-id="{id}">
                <strong>{title}</strong>: {content}
                <br><small>Relevance Score: {score}</small>
            </div>
"#,
                id = html_escape::encode_double_quoted_attribute(&doc.id),
                title = doc.title_html,
                content = doc.content_html,
                score = escape_text(&doc.score_label()),
            );
        }
    }

    html.push_str("        </div>\n        <div class=\"pagination\">\n");
    if let Some(previous) = page.pagination.previous {
        let _ = writeln!(
            html,
            r#"            <a href="{}">Previous Page</a>"#,
            html_escape::encode_double_quoted_attribute(&page_link(&page.query, previous))
        );
    }
    if let Some(next) = page.pagination.next {
        let _ = writeln!(
            html,
            r#"            <a href="{}">Next Page</a>"#,
            html_escape::encode_double_quoted_attribute(&page_link(&page.query, next))
        );
    }
    html.push_str("        </div>\n    </div>\n</body>\n</html>\n");

    html
}

pub fn render_error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{code} {title}</title>
</head>
<body>
    <h2>{code} {title}</h2>
    <p>{message}</p>
    <p><a href="/">Back to search</a></p>
</body>
</html>
"#,
        code = status.as_u16(),
        title = escape_text(title),
        message = escape_text(message),
    )
}
