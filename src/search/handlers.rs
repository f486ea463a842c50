use super::render::{render_landing, render_results};
use super::types::{SearchPage, SearchParams};
use crate::app::AppState;
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::response::Html;

pub async fn handle_landing() -> Html<&'static str> {
    Html(render_landing())
}

pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    let request = match params.validate() {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected search request: {}", e);
            return Err(e);
        }
    };

    let select = request.to_select();
    tracing::debug!(
        "Searching query={:?} page={} start={}",
        request.query,
        request.page,
        select.start
    );

    let outcome = match state.backend.search(&select).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Search for {:?} failed: {}", request.query, e);
            return Err(e.into());
        }
    };

    let page = SearchPage::build(&request, &outcome);
    tracing::debug!(
        "Rendering {} of {} returned docs (numFound={})",
        page.documents.len(),
        outcome.docs.len(),
        outcome.num_found
    );

    Ok(Html(render_results(&page)))
}
