//! The working table and how search outcomes replace it.
//!
//! A table is only ever replaced wholesale by a successful, non-empty search.
//! Failed, empty or malformed searches leave the previous table in place and
//! produce a notice for the user instead.

use crate::apis::SearchClient;
use crate::error::{ErrorKind, FinderError, Result};
use crate::filter::{apply_filters, FilterCriteria};
use crate::table::build_table;
use crate::types::{CandidateTable, SearchRequest};
use std::fmt;
use tracing::{info, warn};

/// User-facing outcome of a search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchNotice {
    Found(usize),
    NoCandidates,
    RequestFailed(String),
    DataError(String),
}

impl fmt::Display for SearchNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchNotice::Found(n) => write!(f, "Candidates found! ({})", n),
            SearchNotice::NoCandidates => write!(f, "Error: No candidates found."),
            SearchNotice::RequestFailed(msg) => {
                write!(f, "An error occurred during the request: {}", msg)
            }
            SearchNotice::DataError(msg) => write!(f, "An error occurred: {}", msg),
        }
    }
}

impl From<&FinderError> for SearchNotice {
    fn from(err: &FinderError) -> Self {
        match err.kind() {
            ErrorKind::EmptyResult => SearchNotice::NoCandidates,
            ErrorKind::DataError => SearchNotice::DataError(err.to_string()),
            _ => SearchNotice::RequestFailed(err.to_string()),
        }
    }
}

/// Owns the current working table, if any
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: Option<CandidateTable>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> Option<&CandidateTable> {
        self.table.as_ref()
    }

    /// Apply a search outcome. Only a non-empty table replaces the current one.
    pub fn apply(&mut self, outcome: Result<CandidateTable>) -> SearchNotice {
        match outcome {
            Ok(table) if table.is_empty() => SearchNotice::NoCandidates,
            Ok(table) => {
                let count = table.len();
                self.table = Some(table);
                info!("Working table replaced with {} candidates", count);
                SearchNotice::Found(count)
            }
            Err(err) => {
                warn!("Search failed, keeping previous table: {}", err);
                SearchNotice::from(&err)
            }
        }
    }

    /// Run a search and apply its outcome
    pub async fn search(&mut self, client: &dyn SearchClient, request: &SearchRequest) -> SearchNotice {
        let outcome = fetch_table(client, request).await;
        self.apply(outcome)
    }

    /// The filtered view of the working table; `None` before the first search
    pub fn view(&self, criteria: &FilterCriteria) -> Option<CandidateTable> {
        self.table.as_ref().map(|table| apply_filters(table, criteria))
    }
}

/// Fetch and normalize one batch of candidates
pub async fn fetch_table(client: &dyn SearchClient, request: &SearchRequest) -> Result<CandidateTable> {
    info!(client = client.client_name(), "Searching for candidates");
    let raw = client.search(request).await?;
    build_table(&raw)
}
