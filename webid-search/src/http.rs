/**
 * SEARCH PAGE SERVER
 *
 * Serves the WebID search page. Each request builds a fresh SearchView,
 * replays what the browser did (initial load with ?q= or a form submission),
 * runs the search against the backend and renders the result.
 *
 * ROUTES:
 * - GET /        search page (?q=..., &submitted=1 for form posts)
 *
 * The API docs modal is a <dialog> toggled in the browser, never a request.
 * - GET /health  liveness
 */

use crate::client::SearchBackend;
use crate::render::render_page;
use crate::view::{SearchView, Submission};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::{routing::get, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

pub struct AppState<B> {
    pub backend: Arc<B>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self { backend: self.backend.clone() }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    q: Option<String>,
    submitted: Option<String>,
}

pub fn build_router<B>(app_state: AppState<B>) -> Router
where
    B: SearchBackend + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(search_page::<B>))
        .route("/health", get(|| async { "ok" }))
        .with_state(app_state)
}

// GET / (search page)
async fn search_page<B>(
    State(app): State<AppState<B>>,
    Query(params): Query<PageParams>,
) -> Result<Html<String>, StatusCode>
where
    B: SearchBackend + Send + Sync + 'static,
{
    let view = page_view(app.backend.as_ref(), params).await;
    render_page(&view).map(Html).map_err(|e| {
        error!("failed to render search page: {e:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Builds the view for one page request
pub async fn page_view<B: SearchBackend>(backend: &B, params: PageParams) -> SearchView {
    let mut view = SearchView::new();

    let ticket = if params.submitted.is_some() {
        view.set_query(params.q.unwrap_or_default());
        match view.submit() {
            Submission::Search(ticket) => Some(ticket),
            Submission::Rejected => None,
        }
    } else {
        view.load(params.q.as_deref())
    };

    if let Some(ticket) = ticket {
        view.run_search(backend, ticket).await;
    }
    view
}
