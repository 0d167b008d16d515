//! Screen state machines for the two screens
//!
//! Pure reducer-style state: transitions take user intent, mutate the
//! state, and hand back the request (if any) the caller must perform.
//! Outcomes are folded back in with `apply`. No I/O happens here, which
//! keeps every transition testable without a network.

use serde::Serialize;

use crate::error::OmdbError;
use crate::types::{total_pages, MovieDetails, SearchItem, SearchPage};

/// Validation message for an empty search submit
pub const MSG_EMPTY_QUERY: &str = "Please enter a movie title.";
/// Validation message for a details fetch without an id
pub const MSG_MISSING_ID: &str = "No movie id was provided.";
/// Connectivity message for search transport/decode failures
pub const MSG_SEARCH_CONNECTIVITY: &str = "Search failed. Check your internet connection.";
/// Connectivity message for details transport/decode failures
pub const MSG_DETAILS_CONNECTIVITY: &str = "Loading failed. Check your internet connection.";

/// A search request the caller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Query to search for
    pub query: String,
    /// Page to fetch (1-based)
    pub page: u32,
}

/// State owned by the search screen
///
/// Invariants: `items` is reset and `current_page` returns to 1 whenever
/// a new query is submitted; `items` only grows (append) on load-more,
/// and a failed load-more never discards what is already shown.
#[derive(Debug, Clone, Serialize)]
pub struct SearchState {
    /// Last submitted query
    pub query: String,
    /// Results accumulated across pages of the current query
    pub items: Vec<SearchItem>,
    /// Total match count reported by OMDb
    pub total_results: u32,
    /// Last page that has been applied (1-based)
    pub current_page: u32,
    /// Whether a request is outstanding
    pub in_flight: bool,
    /// User-visible error, if any
    pub error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            items: Vec::new(),
            total_results: 0,
            current_page: 1,
            in_flight: false,
            error: None,
        }
    }
}

impl SearchState {
    /// Submit a new query.
    ///
    /// An empty or whitespace-only query sets the validation error and
    /// produces no request. Otherwise pagination state is reset and a
    /// page-1 request is returned.
    pub fn submit(&mut self, query: &str) -> Option<PageRequest> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.error = Some(MSG_EMPTY_QUERY.to_string());
            return None;
        }

        self.query = trimmed.to_string();
        self.items.clear();
        self.total_results = 0;
        self.current_page = 1;
        self.in_flight = true;
        self.error = None;

        Some(PageRequest {
            query: self.query.clone(),
            page: 1,
        })
    }

    /// Ask for the next page.
    ///
    /// A no-op (no state change, no request) while a request is in
    /// flight or when the last page has already been applied.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.in_flight {
            return None;
        }
        if self.current_page >= total_pages(self.total_results) {
            return None;
        }

        self.in_flight = true;
        self.error = None;

        Some(PageRequest {
            query: self.query.clone(),
            page: self.current_page + 1,
        })
    }

    /// Fold a completed request back into the state.
    ///
    /// Page-1 success replaces the list and records the total; later
    /// pages append in order. The page counter advances only here, so a
    /// failed load-more leaves it addressing the last applied page.
    pub fn apply(&mut self, request: &PageRequest, outcome: Result<SearchPage, OmdbError>) {
        self.in_flight = false;

        match outcome {
            Ok(page) => {
                if request.page == 1 {
                    self.items = page.items;
                    self.total_results = page.total_results;
                    self.current_page = 1;
                } else {
                    self.items.extend(page.items);
                    self.current_page = request.page;
                }
            }
            Err(err) => {
                if request.page == 1 {
                    self.items.clear();
                    self.total_results = 0;
                }
                self.error = Some(search_error_message(&err));
            }
        }
    }

    /// Number of pages covering the reported total
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_results)
    }
}

/// A details request the caller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsRequest {
    /// IMDb id of the title to fetch
    pub imdb_id: String,
}

/// State owned by the details screen, created once per navigation
#[derive(Debug, Clone, Serialize)]
pub struct DetailsState {
    /// Id the screen was opened with
    pub imdb_id: String,
    /// Fetched record, once available
    pub details: Option<MovieDetails>,
    /// Whether the fetch is outstanding
    pub in_flight: bool,
    /// User-visible error, if any
    pub error: Option<String>,
}

impl DetailsState {
    /// Create state for a navigation carrying `imdb_id`
    pub fn new(imdb_id: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            details: None,
            in_flight: false,
            error: None,
        }
    }

    /// Begin the single fetch for this navigation.
    ///
    /// A blank id (malformed navigation) sets the validation error and
    /// produces no request.
    pub fn start(&mut self) -> Option<DetailsRequest> {
        if self.imdb_id.trim().is_empty() {
            self.error = Some(MSG_MISSING_ID.to_string());
            return None;
        }

        self.in_flight = true;
        self.error = None;

        Some(DetailsRequest {
            imdb_id: self.imdb_id.clone(),
        })
    }

    /// Fold the fetch outcome back into the state
    pub fn apply(&mut self, outcome: Result<MovieDetails, OmdbError>) {
        self.in_flight = false;

        match outcome {
            Ok(details) => {
                self.details = Some(details);
            }
            Err(err) => {
                self.error = Some(details_error_message(&err));
            }
        }
    }
}

/// Map an error to the message the search screen shows
fn search_error_message(err: &OmdbError) -> String {
    match err {
        OmdbError::Api(message) => message.clone(),
        OmdbError::EmptyQuery => MSG_EMPTY_QUERY.to_string(),
        _ => MSG_SEARCH_CONNECTIVITY.to_string(),
    }
}

/// Map an error to the message the details screen shows
fn details_error_message(err: &OmdbError) -> String {
    match err {
        OmdbError::Api(message) => message.clone(),
        OmdbError::MissingId => MSG_MISSING_ID.to_string(),
        _ => MSG_DETAILS_CONNECTIVITY.to_string(),
    }
}
