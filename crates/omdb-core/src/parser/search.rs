//! Search response decoding
//!
//! Decodes the paged search envelope into a [`SearchPage`], dropping
//! malformed rows and normalizing absent fields.

use serde::Deserialize;

use crate::error::{OmdbError, Result};
use crate::parser::{is_true, na_opt};
use crate::types::{MediaType, SearchItem, SearchPage};

/// Fallback message when OMDb reports failure without an `Error` field
const FALLBACK_SEARCH_ERROR: &str = "No movies found.";

/// Raw search envelope as OMDb sends it
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<RawSearchItem>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Raw result row; every field is optional because malformed rows occur
/// in the wild and are filtered rather than failing the whole page
#[derive(Debug, Deserialize)]
struct RawSearchItem {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Type")]
    media_type: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

/// Parse a search response body into a [`SearchPage`].
///
/// Rows without an IMDb id are dropped: the id is the only key the rest
/// of the application can act on. The page number is stamped by the
/// caller, which knows which page it requested.
///
/// # Arguments
/// * `body` - Raw JSON response body
///
/// # Returns
/// * `Ok(SearchPage)` with the decoded rows and total count
/// * `Err(OmdbError::Api)` if OMDb reported a logical failure
/// * `Err(OmdbError::Decode)` if the body is not a valid envelope
pub fn parse_search_response(body: &str) -> Result<SearchPage> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;

    if !is_true(&envelope.response) {
        return Err(OmdbError::Api(
            envelope
                .error
                .unwrap_or_else(|| FALLBACK_SEARCH_ERROR.to_string()),
        ));
    }

    let items: Vec<SearchItem> = envelope.search.into_iter().filter_map(into_item).collect();

    let total_results = envelope
        .total_results
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(0);

    Ok(SearchPage::new(items, total_results, 1))
}

/// Map a raw row to a [`SearchItem`], or `None` if it has no usable id
fn into_item(raw: RawSearchItem) -> Option<SearchItem> {
    let imdb_id = raw.imdb_id.and_then(na_opt)?;

    Some(SearchItem {
        imdb_id,
        title: raw.title.unwrap_or_default(),
        year: raw.year.and_then(na_opt),
        media_type: MediaType::from_wire(raw.media_type.as_deref().unwrap_or("")),
        poster_url: raw.poster.and_then(na_opt),
    })
}
