//! Tauri commands for the OMDb movie browser
//!
//! This module contains all Tauri commands that can be invoked from the
//! frontend. Fetch failures do not fail the command: they come back
//! inside the snapshot as the screen's user-visible error, so every
//! screen stays in a recoverable state.

use tauri::State;

use crate::{AppState, Route};
use omdb_core::{DetailsSnapshot, SearchSnapshot};

/// Run a fresh search for `query`.
///
/// Resets pagination to page 1 and replaces the result list. An empty
/// query resolves to a validation error without a network call.
///
/// # Arguments
/// * `query` - Search query string
///
/// # Returns
/// * `Ok(SearchSnapshot)` with the post-search screen state
#[tauri::command]
pub async fn submit_search(
    state: State<'_, AppState>,
    query: String,
) -> Result<SearchSnapshot, String> {
    Ok(state.search().submit(&query).await)
}

/// Append the next page of the current search.
///
/// The frontend calls this when the list scrolls within half a screen of
/// its end. A no-op while a request is in flight or on the last page.
///
/// # Returns
/// * `Ok(SearchSnapshot)` with the post-append screen state
#[tauri::command]
pub async fn load_more(state: State<'_, AppState>) -> Result<SearchSnapshot, String> {
    Ok(state.search().load_more().await)
}

/// Read the current search screen state without issuing a request.
#[tauri::command]
pub async fn search_snapshot(state: State<'_, AppState>) -> Result<SearchSnapshot, String> {
    Ok(state.search().snapshot().await)
}

/// Fetch the full record for one title.
///
/// Runs once per navigation into the details screen. A blank id resolves
/// to a validation error without a network call.
///
/// # Arguments
/// * `imdb_id` - IMDb id of the title
///
/// # Returns
/// * `Ok(DetailsSnapshot)` with the record or the screen's error
#[tauri::command]
pub async fn fetch_details(
    state: State<'_, AppState>,
    imdb_id: String,
) -> Result<DetailsSnapshot, String> {
    Ok(state.details().fetch(&imdb_id).await)
}

/// Transition to the details screen for the selected title.
///
/// Carries only the id; the details screen re-fetches from it.
///
/// # Arguments
/// * `imdb_id` - IMDb id of the selected title
#[tauri::command]
pub async fn navigate_to_details(
    state: State<'_, AppState>,
    imdb_id: String,
) -> Result<Route, String> {
    Ok(state.navigate_to_details(imdb_id).await)
}

/// Unwind back to the search screen.
#[tauri::command]
pub async fn navigate_back(state: State<'_, AppState>) -> Result<Route, String> {
    Ok(state.navigate_back().await)
}

/// The currently active route.
#[tauri::command]
pub async fn current_route(state: State<'_, AppState>) -> Result<Route, String> {
    Ok(state.current_route().await)
}
