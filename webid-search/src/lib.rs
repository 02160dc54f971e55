//! WebID search page
//!
//! The view keeps the page state (query, results, loading, error, docs modal)
//! and talks to the external `/api/search` endpoint through [`SearchBackend`].
//! Ranking and matching live behind that endpoint, not here.

pub mod client;
pub mod config;
pub mod http;
pub mod models;
pub mod render;
pub mod view;

pub use client::{HttpSearchClient, SearchBackend, SearchError};
pub use config::{load_config, SearchConfig};
pub use models::{ResponseFormat, SearchResults, WebIdResult};
pub use render::render_page;
pub use view::{SearchTicket, SearchView, Submission};
