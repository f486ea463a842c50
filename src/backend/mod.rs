//! Search Engine Client Module
//!
//! Everything needed to ask an Apache Solr core for a page of results.
//!
//! ## Overview
//! The front end never ranks or stores anything itself. Each search is translated into
//! one `select` request; the engine returns matching documents, their relevance scores,
//! and per-field highlight fragments.
//!
//! ## Submodules
//! - **`client`**: The `SearchBackend` trait and its HTTP implementation, `SolrClient`.
//! - **`query`**: Builds the `select` parameters and escapes user text for Solr's query syntax.
//! - **`types`**: Wire types decoded from Solr's JSON response.

pub mod client;
pub mod query;
pub mod types;

pub use client::{SearchBackend, SolrClient};
pub use query::{PAGE_SIZE, SelectQuery};
pub use types::{HighlightMap, ResultDocument, SearchOutcome};

#[cfg(test)]
mod tests;
