//! Search Front End Module
//!
//! The user-facing half of the application: a landing page with a search form, and a
//! results page built from one Solr `select` call.
//!
//! ## Request Flow
//! 1. **Validation**: `query` must be 3 to 50 characters and `page` at least 1. Bad input
//!    is rejected before the engine is contacted.
//! 2. **Query**: The page number becomes a `start` offset and the text is OR-matched against
//!    `title` and `content`, with highlighting requested for both.
//! 3. **Shaping**: Documents without an id are dropped; highlight fragments replace raw
//!    field values where the engine supplied them.
//! 4. **Rendering**: Results, or "No results found.", plus previous/next links.
//!
//! ## Submodules
//! - **`handlers`**: Axum handlers for `/` and `/search`.
//! - **`render`**: HTML output and escaping.
//! - **`types`**: Parameter validation, display types, and pagination.

pub mod handlers;
pub mod render;
pub mod types;
