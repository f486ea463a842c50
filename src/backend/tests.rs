//! Backend Module Tests
//!
//! Validates the Solr client from request construction through response decoding.
//!
//! ## Test Scopes
//! - **Query Building**: Escaping of user text and the exact `select` parameter set.
//! - **Decoding**: Lenient handling of the field shapes Solr actually returns.
//! - **Client**: End-to-end requests against a throw-away Axum server standing in for Solr.

#[cfg(test)]
mod tests {
    use crate::backend::client::{SearchBackend, SolrClient};
    use crate::backend::query::{SelectQuery, escape_query_term};
    use crate::backend::types::{SearchOutcome, SelectResponse};
    use crate::error::{AppError, BackendError};
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::{Json, Router, routing::get};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn spawn_fake_solr(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/solr/search_core", addr)
    }

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    // ============================================================
    // QUERY TESTS - escape_query_term
    // ============================================================

    #[test]
    fn test_escape_plain_word_unchanged() {
        assert_eq!(escape_query_term("cat"), "cat");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_query_term("c++"), "c\\+\\+");
        assert_eq!(escape_query_term("title:x"), "title\\:x");
        assert_eq!(escape_query_term("(a)"), "\\(a\\)");
        assert_eq!(escape_query_term("\"quoted\""), "\\\"quoted\\\"");
        assert_eq!(escape_query_term("a/b"), "a\\/b");
    }

    #[test]
    fn test_escape_collapses_whitespace() {
        assert_eq!(escape_query_term("  rust   lang "), "rust lang");
    }

    #[test]
    fn test_escape_lowercases_operators() {
        assert_eq!(escape_query_term("cats AND dogs"), "cats and dogs");
        assert_eq!(escape_query_term("NOT OR"), "not or");
        // Only whole words are operators
        assert_eq!(escape_query_term("ANDROID"), "ANDROID");
    }

    // ============================================================
    // QUERY TESTS - SelectQuery
    // ============================================================

    #[test]
    fn test_match_any_field_builds_or_query() {
        let query = SelectQuery::match_any_field("cat", 0, 10);

        assert_eq!(query.q, "title:(cat) OR content:(cat)");
        assert_eq!(query.start, 0);
        assert_eq!(query.rows, 10);
    }

    #[test]
    fn test_match_any_field_escapes_term() {
        let query = SelectQuery::match_any_field("a:b", 20, 10);

        assert_eq!(query.q, "title:(a\\:b) OR content:(a\\:b)");
        assert_eq!(query.start, 20);
    }

    #[test]
    fn test_to_params_requests_highlighting() {
        let params = SelectQuery::match_any_field("cat", 30, 10).to_params();

        assert_eq!(param(&params, "q"), Some("title:(cat) OR content:(cat)"));
        assert_eq!(param(&params, "q.op"), Some("OR"));
        assert_eq!(param(&params, "hl"), Some("true"));
        assert_eq!(param(&params, "hl.fl"), Some("title,content"));
        assert_eq!(param(&params, "hl.simple.pre"), Some("<em>"));
        assert_eq!(param(&params, "hl.simple.post"), Some("</em>"));
        assert_eq!(param(&params, "start"), Some("30"));
        assert_eq!(param(&params, "rows"), Some("10"));
        assert_eq!(param(&params, "fl"), Some("id,title,content,score"));
        assert_eq!(param(&params, "wt"), Some("json"));
    }

    // ============================================================
    // DECODING TESTS
    // ============================================================

    #[test]
    fn test_decode_multi_valued_fields() {
        let json = r#"{
            "response": {"numFound": 42, "start": 0, "docs": [
                {"id": "d1", "title": ["Cats", "Dogs"], "content": ["About pets"], "score": 1.5}
            ]},
            "highlighting": {"d1": {"title": ["<em>Cats</em>"]}}
        }"#;

        let resp: SelectResponse = serde_json::from_str(json).expect("decode failed");
        let outcome: SearchOutcome = resp.into();

        assert_eq!(outcome.num_found, 42);
        assert_eq!(outcome.docs.len(), 1);
        let doc = &outcome.docs[0];
        assert_eq!(doc.id.as_deref(), Some("d1"));
        assert_eq!(doc.title, Some(vec!["Cats".to_string(), "Dogs".to_string()]));
        assert_eq!(doc.content, Some(vec!["About pets".to_string()]));
        assert_eq!(doc.score, Some(1.5));
        assert_eq!(outcome.highlighting["d1"]["title"], vec!["<em>Cats</em>"]);
    }

    #[test]
    fn test_decode_single_valued_fields() {
        let json = r#"{"response": {"numFound": 1, "docs": [
            {"id": 7, "title": "Solo", "content": 12}
        ]}}"#;

        let resp: SelectResponse = serde_json::from_str(json).unwrap();
        let doc = &resp.response.docs[0];

        assert_eq!(doc.id.as_deref(), Some("7"));
        assert_eq!(doc.title, Some(vec!["Solo".to_string()]));
        assert_eq!(doc.content, Some(vec!["12".to_string()]));
        assert_eq!(doc.score, None);
    }

    #[test]
    fn test_decode_missing_fields_and_highlighting() {
        let json = r#"{"response": {"numFound": 2, "docs": [{"title": ["No id"]}, {"id": ""}]}}"#;

        let resp: SelectResponse = serde_json::from_str(json).unwrap();

        assert!(resp.highlighting.is_empty());
        assert_eq!(resp.response.docs.len(), 2);
        // Missing and empty ids both count as absent
        assert!(resp.response.docs.iter().all(|d| d.id.is_none()));
        assert_eq!(resp.response.docs[1].title, None);
    }

    #[test]
    fn test_decode_rejects_non_select_body() {
        let result = serde_json::from_str::<SelectResponse>(r#"{"status": "OK"}"#);
        assert!(result.is_err());
    }

    // ============================================================
    // CLIENT TESTS - construction
    // ============================================================

    #[test]
    fn test_client_resolves_endpoints_under_core() {
        let client =
            SolrClient::new("http://localhost:8983/solr/search_core", Duration::from_secs(1))
                .unwrap();

        assert_eq!(
            client.select_url().as_str(),
            "http://localhost:8983/solr/search_core/select"
        );
        assert_eq!(
            client.ping_url().as_str(),
            "http://localhost:8983/solr/search_core/admin/ping"
        );
    }

    #[test]
    fn test_client_accepts_trailing_slash() {
        let client =
            SolrClient::new("http://localhost:8983/solr/books/", Duration::from_secs(1)).unwrap();

        assert_eq!(
            client.select_url().as_str(),
            "http://localhost:8983/solr/books/select"
        );
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        let result = SolrClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(BackendError::InvalidUrl(_))));
    }

    // ============================================================
    // CLIENT TESTS - against a fake Solr
    // ============================================================

    async fn fake_select(
        State(captured): State<Captured>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        captured.lock().unwrap().push(params);
        Json(serde_json::json!({
            "responseHeader": {"status": 0},
            "response": {"numFound": 11, "start": 10, "docs": [
                {"id": "d11", "title": ["Eleventh"], "content": ["Body"], "score": 0.25}
            ]},
            "highlighting": {"d11": {"content": ["<em>Body</em>"]}}
        }))
    }

    #[tokio::test]
    async fn test_search_sends_params_and_decodes() {
        // ARRANGE
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/solr/search_core/select", get(fake_select))
            .with_state(captured.clone());
        let url = spawn_fake_solr(router).await;
        let client = SolrClient::new(&url, Duration::from_secs(5)).unwrap();

        // ACT
        let outcome = client
            .search(&SelectQuery::match_any_field("body text", 10, 10))
            .await
            .expect("search failed");

        // ASSERT: decoded response
        assert_eq!(outcome.num_found, 11);
        assert_eq!(outcome.docs.len(), 1);
        assert_eq!(outcome.docs[0].id.as_deref(), Some("d11"));
        assert_eq!(outcome.highlighting["d11"]["content"], vec!["<em>Body</em>"]);

        // ASSERT: request parameters reached the engine intact
        let seen = captured.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["q"], "title:(body text) OR content:(body text)");
        assert_eq!(seen[0]["start"], "10");
        assert_eq!(seen[0]["rows"], "10");
        assert_eq!(seen[0]["hl"], "true");
        assert_eq!(seen[0]["hl.fl"], "title,content");
        assert_eq!(seen[0]["fl"], "id,title,content,score");
    }

    #[tokio::test]
    async fn test_search_maps_solr_error_status() {
        let router = Router::new().route(
            "/solr/search_core/select",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                        "error": {"msg": "undefined field foo", "code": 400}
                    })),
                )
                    .into_response()
            }),
        );
        let url = spawn_fake_solr(router).await;
        let client = SolrClient::new(&url, Duration::from_secs(5)).unwrap();

        let result = client.search(&SelectQuery::match_any_field("cat", 0, 10)).await;

        match result {
            Err(BackendError::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "undefined field foo");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_missing_core_is_status_error() {
        // No routes: every path is a 404 with an empty body
        let url = spawn_fake_solr(Router::new()).await;
        let client = SolrClient::new(&url, Duration::from_secs(5)).unwrap();

        let result = client.search(&SelectQuery::match_any_field("cat", 0, 10)).await;

        match result {
            Err(BackendError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "no response body");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_malformed_body_is_decode_error() {
        let router = Router::new().route(
            "/solr/search_core/select",
            get(|| async { "<html>not json</html>" }),
        );
        let url = spawn_fake_solr(router).await;
        let client = SolrClient::new(&url, Duration::from_secs(5)).unwrap();

        let result = client.search(&SelectQuery::match_any_field("cat", 0, 10)).await;

        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[tokio::test]
    async fn test_search_unreachable_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            SolrClient::new(&format!("http://{}/solr/core", addr), Duration::from_secs(2)).unwrap();
        let result = client.search(&SelectQuery::match_any_field("cat", 0, 10)).await;

        assert!(matches!(result, Err(BackendError::Transport(_))));
    }

    #[tokio::test]
    async fn test_search_slow_engine_hits_client_timeout() {
        // ARRANGE: engine that takes far longer than the client allows
        let router = Router::new().route(
            "/solr/search_core/select",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!({"response": {"numFound": 0, "docs": []}}))
            }),
        );
        let url = spawn_fake_solr(router).await;
        let client = SolrClient::new(&url, Duration::from_millis(200)).unwrap();

        // ACT
        let started = Instant::now();
        let result = client.search(&SelectQuery::match_any_field("cat", 0, 10)).await;
        let elapsed = started.elapsed();

        // ASSERT: bounded by the timeout, not by the engine
        match result {
            Err(BackendError::Transport(e)) => assert!(e.is_timeout(), "not a timeout: {}", e),
            other => panic!("expected transport timeout, got {:?}", other),
        }
        assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_transport_error_details_not_exposed_to_client() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            SolrClient::new(&format!("http://{}/solr/core", addr), Duration::from_secs(2)).unwrap();
        let err = client
            .search(&SelectQuery::match_any_field("cat", 0, 10))
            .await
            .unwrap_err();

        // The internal error names the engine; the client-facing one must not
        assert!(err.to_string().contains("127.0.0.1"));
        let app_err = AppError::from(err);
        assert_eq!(app_err.status(), StatusCode::BAD_GATEWAY);
        assert!(!app_err.public_message().contains("127.0.0.1"));
        assert!(!app_err.public_message().contains("select"));
    }

    #[tokio::test]
    async fn test_ping() {
        let router = Router::new().route(
            "/solr/search_core/admin/ping",
            get(|| async { Json(serde_json::json!({"status": "OK"})) }),
        );
        let url = spawn_fake_solr(router).await;
        let client = SolrClient::new(&url, Duration::from_secs(5)).unwrap();

        assert!(client.ping().await.is_ok());
    }
}
