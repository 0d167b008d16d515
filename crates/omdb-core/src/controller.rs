//! Async orchestration for the two screens
//!
//! Controllers drive the pure state machines in `state`: take the
//! reducer-produced request under the lock, perform the network call
//! without holding the lock, then re-acquire and fold the outcome back
//! in. Overlapping submits are sequenced with a monotonically increasing
//! request token so the last submitted query always wins; a response is
//! applied only while its token is still the latest one issued.

use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::api::OmdbApi;
use crate::state::{DetailsState, SearchState};
use crate::types::{MovieDetails, SearchItem};

/// Serializable snapshot of the search screen after an operation
#[derive(Debug, Clone, Serialize)]
pub struct SearchSnapshot {
    /// Last submitted query
    pub query: String,
    /// Results accumulated so far
    pub items: Vec<SearchItem>,
    /// Total match count reported by OMDb
    pub total_results: u32,
    /// Last applied page (1-based)
    pub current_page: u32,
    /// Number of pages covering the total
    pub total_pages: u32,
    /// Whether a request is still outstanding
    pub in_flight: bool,
    /// User-visible error, if any
    pub error: Option<String>,
}

impl SearchSnapshot {
    fn of(state: &SearchState) -> Self {
        Self {
            query: state.query.clone(),
            items: state.items.clone(),
            total_results: state.total_results,
            current_page: state.current_page,
            total_pages: state.total_pages(),
            in_flight: state.in_flight,
            error: state.error.clone(),
        }
    }
}

struct SearchInner {
    state: SearchState,
    /// Token of the most recently issued request for this screen
    latest_token: u64,
}

/// Controller owning the search screen state
///
/// Cheaply cloneable; clones share the same state.
#[derive(Clone)]
pub struct SearchController {
    api: Arc<OmdbApi>,
    inner: Arc<Mutex<SearchInner>>,
}

impl SearchController {
    /// Create a controller over the given API handle
    pub fn new(api: Arc<OmdbApi>) -> Self {
        Self {
            api,
            inner: Arc::new(Mutex::new(SearchInner {
                state: SearchState::default(),
                latest_token: 0,
            })),
        }
    }

    /// Submit a new query and return the resulting screen state.
    ///
    /// An empty query short-circuits with the validation error and no
    /// network call. When submits overlap, the response belonging to the
    /// newest submit wins; older responses are discarded.
    pub async fn submit(&self, query: &str) -> SearchSnapshot {
        let (request, token) = {
            let mut inner = self.inner.lock().await;
            inner.latest_token += 1;
            let token = inner.latest_token;
            match inner.state.submit(query) {
                Some(request) => (request, token),
                None => return SearchSnapshot::of(&inner.state),
            }
        };

        let outcome = self.api.search_page(&request.query, request.page).await;

        let mut inner = self.inner.lock().await;
        if token == inner.latest_token {
            inner.state.apply(&request, outcome);
        } else {
            debug!("discarding stale response for {:?}", request.query);
        }
        SearchSnapshot::of(&inner.state)
    }

    /// Request the next page and return the resulting screen state.
    ///
    /// A no-op while a request is in flight or when the last page has
    /// been applied. The page is dropped if a newer submit supersedes it
    /// while it is in flight.
    pub async fn load_more(&self) -> SearchSnapshot {
        let (request, token) = {
            let mut inner = self.inner.lock().await;
            let token = inner.latest_token;
            match inner.state.load_more() {
                Some(request) => (request, token),
                None => return SearchSnapshot::of(&inner.state),
            }
        };

        let outcome = self.api.search_page(&request.query, request.page).await;

        let mut inner = self.inner.lock().await;
        if token == inner.latest_token {
            inner.state.apply(&request, outcome);
        } else {
            debug!("discarding stale page {} for {:?}", request.page, request.query);
        }
        SearchSnapshot::of(&inner.state)
    }

    /// Snapshot the current screen state without issuing a request
    pub async fn snapshot(&self) -> SearchSnapshot {
        let inner = self.inner.lock().await;
        SearchSnapshot::of(&inner.state)
    }
}

/// Serializable snapshot of the details screen after a fetch
#[derive(Debug, Clone, Serialize)]
pub struct DetailsSnapshot {
    /// Id the fetch was issued for
    pub imdb_id: String,
    /// Fetched record, if the fetch succeeded
    pub details: Option<MovieDetails>,
    /// User-visible error, if any
    pub error: Option<String>,
}

impl DetailsSnapshot {
    fn of(state: &DetailsState) -> Self {
        Self {
            imdb_id: state.imdb_id.clone(),
            details: state.details.clone(),
            error: state.error.clone(),
        }
    }
}

/// Controller for the details screen
///
/// The details screen re-fetches from the id alone on every navigation,
/// so this controller holds no cross-navigation state.
#[derive(Clone)]
pub struct DetailsController {
    api: Arc<OmdbApi>,
}

impl DetailsController {
    /// Create a controller over the given API handle
    pub fn new(api: Arc<OmdbApi>) -> Self {
        Self { api }
    }

    /// Run the one fetch for a navigation carrying `imdb_id`.
    ///
    /// A blank id resolves to the validation error without a network
    /// call.
    pub async fn fetch(&self, imdb_id: &str) -> DetailsSnapshot {
        let mut state = DetailsState::new(imdb_id);

        if let Some(request) = state.start() {
            let outcome = self.api.details(&request.imdb_id).await;
            state.apply(outcome);
        }

        DetailsSnapshot::of(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::state::{MSG_EMPTY_QUERY, MSG_MISSING_ID};

    fn controller() -> SearchController {
        let api = OmdbApi::new(ClientConfig::new("test-key")).unwrap();
        SearchController::new(Arc::new(api))
    }

    #[tokio::test]
    async fn test_submit_empty_query_short_circuits() {
        let controller = controller();
        let snapshot = controller.submit("  ").await;

        assert_eq!(snapshot.error.as_deref(), Some(MSG_EMPTY_QUERY));
        assert!(snapshot.items.is_empty());
        assert!(!snapshot.in_flight);
    }

    #[tokio::test]
    async fn test_load_more_noop_on_fresh_state() {
        let controller = controller();
        let snapshot = controller.load_more().await;

        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.current_page, 1);
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn test_snapshot_reflects_defaults() {
        let controller = controller();
        let snapshot = controller.snapshot().await;

        assert_eq!(snapshot.query, "");
        assert_eq!(snapshot.total_pages, 0);
    }

    #[tokio::test]
    async fn test_details_fetch_blank_id_short_circuits() {
        let api = OmdbApi::new(ClientConfig::new("test-key")).unwrap();
        let controller = DetailsController::new(Arc::new(api));

        let snapshot = controller.fetch("   ").await;
        assert_eq!(snapshot.error.as_deref(), Some(MSG_MISSING_ID));
        assert!(snapshot.details.is_none());
    }
}
