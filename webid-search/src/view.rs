//! Search page state
//!
//! Every search gets a [`SearchTicket`] carrying a sequence number. Only the
//! ticket issued last may write results or errors, so an older response that
//! resolves late cannot overwrite a newer one.

use crate::client::{SearchBackend, SearchError};
use crate::models::SearchResults;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank query: error shown, no request issued
    Rejected,
    Search(SearchTicket),
}

#[derive(Debug, Clone)]
pub struct SearchView {
    query: String,
    results: Option<SearchResults>,
    loading: bool,
    error: Option<String>,
    show_info: bool,
    location: String,
    issued: u64,
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchView {
    pub fn new() -> Self {
        Self::with_query("")
    }

    pub fn with_query(initial: &str) -> Self {
        Self {
            query: initial.to_string(),
            results: None,
            loading: false,
            error: None,
            show_info: false,
            location: "/".to_string(),
            issued: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> Option<&SearchResults> {
        self.results.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show_info(&self) -> bool {
        self.show_info
    }

    /// Page URL the browser should display
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn open_info(&mut self) {
        self.show_info = true;
    }

    pub fn close_info(&mut self) {
        self.show_info = false;
    }

    /// Initial page load with the `q` parameter of the page URL, if any
    pub fn load(&mut self, query_param: Option<&str>) -> Option<SearchTicket> {
        let q = query_param.filter(|q| !q.is_empty())?;
        self.query = q.to_string();
        self.location = location_for(q);
        self.begin_search(q)
    }

    /// Form submission
    pub fn submit(&mut self) -> Submission {
        if self.query.trim().is_empty() {
            self.error = Some(EMPTY_QUERY_MESSAGE.to_string());
            self.location = "/".to_string();
            return Submission::Rejected;
        }

        self.location = location_for(&self.query);
        let query = self.query.clone();
        match self.begin_search(&query) {
            Some(ticket) => Submission::Search(ticket),
            None => Submission::Rejected,
        }
    }

    /// Starts a search. A blank query only clears the results.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        if query.trim().is_empty() {
            self.results = None;
            return None;
        }

        self.issued += 1;
        self.loading = true;
        self.error = None;
        Some(SearchTicket {
            seq: self.issued,
            query: query.to_string(),
        })
    }

    /// Applies a search outcome. Returns false, leaving the state untouched,
    /// when a newer search has been started since `ticket` was issued.
    pub fn complete(&mut self, ticket: SearchTicket, outcome: Result<SearchResults, SearchError>) -> bool {
        if ticket.seq != self.issued {
            tracing::debug!(stale = ticket.seq, latest = self.issued, "dropping stale search response");
            return false;
        }

        match outcome {
            Ok(results) => {
                self.results = Some(results);
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.results = None;
            }
        }
        self.loading = false;
        true
    }

    /// Runs the search for `ticket` against `backend` and applies the outcome
    pub async fn run_search<B: SearchBackend>(&mut self, backend: &B, ticket: SearchTicket) -> bool {
        let outcome = backend.search(ticket.query()).await;
        self.complete(ticket, outcome)
    }
}

fn location_for(query: &str) -> String {
    format!("/?q={}", urlencoding::encode(query))
}
