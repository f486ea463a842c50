//! Solr Response Types
//!
//! Decoding is deliberately lenient. Solr returns a single-valued field as a bare
//! scalar and a multi-valued field as an array, and document ids may be numeric;
//! all of these are normalised here so the rendering layer only ever sees strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Highlight fragments keyed by document id, then by field name.
pub type HighlightMap = HashMap<String, HashMap<String, Vec<String>>>;

/// One document from `response.docs`.
///
/// Every field is optional: the front end substitutes defaults for missing
/// `title`/`content`/`score`, and drops documents without an `id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultDocument {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub content: Option<Vec<String>>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Body of a `select` request made with `wt=json`.
#[derive(Debug, Deserialize)]
pub struct SelectResponse {
    pub response: SelectBody,
    /// Absent when highlighting was not requested or nothing matched.
    #[serde(default)]
    pub highlighting: HighlightMap,
}

#[derive(Debug, Deserialize)]
pub struct SelectBody {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<ResultDocument>,
}

/// Solr's error envelope, e.g. `{"error": {"msg": "...", "code": 400}}`.
/// Only `msg` is kept; the status already comes from the HTTP response.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub msg: Option<String>,
}

/// What a backend hands back for one page of results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// Documents in engine order, including any without an id.
    pub docs: Vec<ResultDocument>,
    pub highlighting: HighlightMap,
    /// Total hits reported by the engine across all pages.
    pub num_found: u64,
}

impl From<SelectResponse> for SearchOutcome {
    fn from(resp: SelectResponse) -> Self {
        Self {
            docs: resp.response.docs,
            highlighting: resp.highlighting,
            num_found: resp.response.num_found,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(items.into_iter().map(scalar_to_string).collect()),
        Some(other) => Some(vec![scalar_to_string(other)]),
    })
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
