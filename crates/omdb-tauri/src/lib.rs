//! OMDb Browser Tauri Integration
//!
//! This crate provides Tauri commands for the two-screen movie browser:
//! a search screen with incremental pagination and a details screen
//! fetched per navigation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use omdb_tauri::AppState;
//! use tauri::Manager;
//!
//! fn main() {
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             app.manage(AppState::from_env()?);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             omdb_tauri::commands::submit_search,
//!             omdb_tauri::commands::load_more,
//!             omdb_tauri::commands::search_snapshot,
//!             omdb_tauri::commands::fetch_details,
//!             omdb_tauri::commands::navigate_to_details,
//!             omdb_tauri::commands::navigate_back,
//!             omdb_tauri::commands::current_route,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `submit_search` - Run a fresh page-1 search
//! - `load_more` - Append the next page of the current search
//! - `search_snapshot` - Read the search screen state
//! - `fetch_details` - Fetch the full record for one title
//! - `navigate_to_details` / `navigate_back` / `current_route` - Navigator

pub mod commands;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use omdb_core::{ClientConfig, DetailsController, OmdbApi, SearchController};

/// The two screens of the application
///
/// A transition into `Details` carries exactly one piece of state: the
/// selected title's id. The details screen re-fetches everything else
/// from that id, so going back and forth never replays stale payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Route {
    /// Search screen (the start screen; back-navigation unwinds here)
    Search,
    /// Details screen for one title
    Details {
        /// IMDb id of the selected title
        imdb_id: String,
    },
}

/// Application state managed by Tauri
///
/// Holds the controllers for both screens and the current route. Safe to
/// share across concurrently running commands.
pub struct AppState {
    search: SearchController,
    details: DetailsController,
    route: Mutex<Route>,
}

impl AppState {
    /// Create the state with the API key from `OMDB_API_KEY`.
    ///
    /// # Errors
    /// Returns an error string if the key is missing or the HTTP client
    /// cannot be created.
    pub fn from_env() -> Result<Self, String> {
        let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
        let api = OmdbApi::new(config).map_err(|e| e.to_string())?;
        Ok(Self::with_api(api))
    }

    /// Create the state around an existing API handle (used by tests)
    pub fn with_api(api: OmdbApi) -> Self {
        let api = Arc::new(api);
        Self {
            search: SearchController::new(Arc::clone(&api)),
            details: DetailsController::new(api),
            route: Mutex::new(Route::Search),
        }
    }

    /// Controller for the search screen
    pub fn search(&self) -> &SearchController {
        &self.search
    }

    /// Controller for the details screen
    pub fn details(&self) -> &DetailsController {
        &self.details
    }

    /// Transition to the details screen for `imdb_id`
    pub async fn navigate_to_details(&self, imdb_id: impl Into<String>) -> Route {
        let route = Route::Details {
            imdb_id: imdb_id.into(),
        };
        *self.route.lock().await = route.clone();
        route
    }

    /// Unwind to the search screen
    pub async fn navigate_back(&self) -> Route {
        *self.route.lock().await = Route::Search;
        Route::Search
    }

    /// The currently active route
    pub async fn current_route(&self) -> Route {
        self.route.lock().await.clone()
    }
}
