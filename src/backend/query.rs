//! Select Request Model
//!
//! Builds the parameter set for Solr's `select` handler. The front end always asks
//! for the same thing: match the user's text in `title` or `content`, return a fixed
//! field list, and highlight hits in both fields.

/// Results per page. Also the `rows` value sent to Solr.
pub const PAGE_SIZE: usize = 10;

/// Fields searched and highlighted.
pub const SEARCH_FIELDS: [&str; 2] = ["title", "content"];

/// Stored fields returned for each document (`fl`).
pub const RETURN_FIELDS: &str = "id,title,content,score";

/// Markers Solr wraps around highlighted terms. Requested explicitly so the
/// renderer knows exactly which tags to let through.
pub const HIGHLIGHT_PRE: &str = "<em>";
pub const HIGHLIGHT_POST: &str = "</em>";

/// Characters with meaning in the standard/lucene query parser.
const SPECIAL_CHARS: &[char] = &[
    '\\', '+', '-', '!', '(', ')', ':', '^', '[', ']', '"', '{', '}', '~', '*', '?', '|', '&',
    ';', '/',
];

/// A single `select` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    /// Fully formed Solr query string (`q`).
    pub q: String,
    /// Offset of the first document (`start`).
    pub start: usize,
    /// Page length (`rows`).
    pub rows: usize,
}

impl SelectQuery {
    /// OR-match `term` against every search field: `title:(term) OR content:(term)`.
    pub fn match_any_field(term: &str, start: usize, rows: usize) -> Self {
        let escaped = escape_query_term(term);
        let q = SEARCH_FIELDS
            .iter()
            .map(|field| format!("{}:({})", field, escaped))
            .collect::<Vec<_>>()
            .join(" OR ");

        Self { q, start, rows }
    }

    /// Query-string pairs for the HTTP request, highlighting included.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.clone()),
            ("q.op", "OR".to_string()),
            ("hl", "true".to_string()),
            ("hl.fl", SEARCH_FIELDS.join(",")),
            ("hl.simple.pre", HIGHLIGHT_PRE.to_string()),
            ("hl.simple.post", HIGHLIGHT_POST.to_string()),
            ("start", self.start.to_string()),
            ("rows", self.rows.to_string()),
            ("fl", RETURN_FIELDS.to_string()),
            ("wt", "json".to_string()),
        ]
    }
}

/// Backslash-escape query parser syntax so user text is matched literally.
///
/// Whitespace separates terms inside the field group, which `q.op=OR` then
/// combines. Bare `AND`/`OR`/`NOT` words are lowercased so they are searched
/// for rather than parsed as operators.
pub fn escape_query_term(term: &str) -> String {
    term.split_whitespace()
        .map(|word| match word {
            "AND" | "OR" | "NOT" => word.to_lowercase(),
            _ => {
                let mut out = String::with_capacity(word.len());
                for c in word.chars() {
                    if SPECIAL_CHARS.contains(&c) {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
