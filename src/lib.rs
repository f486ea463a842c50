//! Solr Search Front End Library
//!
//! This library crate holds everything the binary (`main.rs`) wires together.
//! The application is a thin HTML layer in front of an Apache Solr core: it owns
//! no index, no ranking, and no persistent state.
//!
//! ## Architecture Modules
//! - **`app`**: Shared request state (`AppState`), the Axum router, and the health probe.
//! - **`backend`**: The search engine client. Defines the `SearchBackend` seam, the
//!   `select` request model, and the `SolrClient` that speaks Solr's JSON protocol.
//! - **`config`**: Command line / environment configuration.
//! - **`error`**: Error types for the client and the HTTP layer.
//! - **`search`**: The landing and search handlers, request validation, result shaping,
//!   and HTML rendering.

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod search;
