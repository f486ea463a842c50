use super::render::{escape_highlight, escape_text};
use crate::backend::{HighlightMap, PAGE_SIZE, ResultDocument, SearchOutcome, SelectQuery};
use crate::error::AppError;
use serde::Deserialize;

/// Inclusive bounds on the query length, counted in characters.
pub const MIN_QUERY_CHARS: usize = 3;
pub const MAX_QUERY_CHARS: usize = 50;

pub const NO_TITLE: &str = "No Title";
pub const NO_CONTENT: &str = "No Content";
pub const NO_SCORE: &str = "No Score";

/// Raw `/search` query string, before validation.
///
/// `page` is signed so that `0` and negatives reach `validate` and get a
/// proper message instead of a generic extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

impl SearchParams {
    pub fn validate(self) -> Result<SearchRequest, AppError> {
        let len = self.query.chars().count();
        if !(MIN_QUERY_CHARS..=MAX_QUERY_CHARS).contains(&len) {
            return Err(AppError::Validation(format!(
                "query must be between {} and {} characters (got {})",
                MIN_QUERY_CHARS, MAX_QUERY_CHARS, len
            )));
        }
        if self.query.trim().is_empty() {
            return Err(AppError::Validation(
                "query must contain at least one non-whitespace character".to_string(),
            ));
        }
        if self.page < 1 {
            return Err(AppError::Validation(format!(
                "page must be greater than or equal to 1 (got {})",
                self.page
            )));
        }

        Ok(SearchRequest {
            query: self.query,
            page: self.page as u64,
        })
    }
}

/// A validated search: the query text and a 1-based page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u64,
}

impl SearchRequest {
    /// Index of the first result on this page: `(page - 1) * PAGE_SIZE`.
    pub fn offset(&self) -> usize {
        usize::try_from(self.page - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(PAGE_SIZE)
    }

    pub fn to_select(&self) -> SelectQuery {
        SelectQuery::match_any_field(&self.query, self.offset(), PAGE_SIZE)
    }
}

/// A result ready for rendering. `title_html` and `content_html` are already
/// escaped; only highlight markers survive as markup.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayDocument {
    pub id: String,
    pub title_html: String,
    pub content_html: String,
    pub score: Option<f64>,
}

impl DisplayDocument {
    pub fn score_label(&self) -> String {
        match self.score {
            Some(score) => score.to_string(),
            None => NO_SCORE.to_string(),
        }
    }
}

/// Previous/next page numbers, when those links should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

impl Pagination {
    /// `returned` is the number of docs the engine sent back, id-less ones
    /// included. A full page is taken to mean more results may follow.
    pub fn for_page(page: u64, returned: usize) -> Self {
        Self {
            previous: (page > 1).then(|| page - 1),
            next: (returned == PAGE_SIZE).then(|| page.saturating_add(1)),
        }
    }
}

/// Everything the results template needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub query: String,
    pub page: u64,
    pub num_found: u64,
    pub documents: Vec<DisplayDocument>,
    pub pagination: Pagination,
}

impl SearchPage {
    pub fn build(request: &SearchRequest, outcome: &SearchOutcome) -> Self {
        Self {
            query: request.query.clone(),
            page: request.page,
            num_found: outcome.num_found,
            documents: display_documents(outcome),
            pagination: Pagination::for_page(request.page, outcome.docs.len()),
        }
    }
}

/// Shape engine results for display, in engine order.
///
/// Documents without an id are dropped: they cannot be matched to highlight data.
pub fn display_documents(outcome: &SearchOutcome) -> Vec<DisplayDocument> {
    outcome
        .docs
        .iter()
        .filter_map(|doc| display_document(doc, outcome))
        .collect()
}

fn display_document(doc: &ResultDocument, outcome: &SearchOutcome) -> Option<DisplayDocument> {
    let id = doc.id.as_ref()?;
    let hl = &outcome.highlighting;

    Some(DisplayDocument {
        id: id.clone(),
        title_html: display_field(doc.title.as_deref(), NO_TITLE, fragments(hl, id, "title")),
        content_html: display_field(
            doc.content.as_deref(),
            NO_CONTENT,
            fragments(hl, id, "content"),
        ),
        score: doc.score,
    })
}

fn fragments<'a>(hl: &'a HighlightMap, id: &str, field: &str) -> Option<&'a Vec<String>> {
    hl.get(id).and_then(|fields| fields.get(field))
}

fn display_field(raw: Option<&[String]>, default: &str, fragments: Option<&Vec<String>>) -> String {
    match (fragments, raw) {
        (Some(fragments), _) => escape_highlight(&fragments.join(" ")),
        (None, Some(values)) => escape_text(&values.join(" ")),
        (None, None) => escape_text(default),
    }
}
