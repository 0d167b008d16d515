//! Main OMDb API surface
//!
//! This module provides the high-level API for talking to OMDb. It
//! combines the HTTP client with the wire decoders to offer a simple
//! interface for searching titles and fetching per-title details.

use log::debug;

use crate::client::{ClientConfig, OmdbClient};
use crate::error::{OmdbError, Result};
use crate::parser::{parse_detail_response, parse_search_response};
use crate::types::{MovieDetails, SearchPage};

/// High-level OMDb API
///
/// Provides methods for searching titles and getting full-plot details.
/// All operations are asynchronous.
///
/// # Example
/// ```no_run
/// use omdb_core::{ClientConfig, OmdbApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = OmdbApi::new(ClientConfig::from_env()?)?;
///
///     let results = api.search("batman").await?;
///     println!("Found {} matches", results.total_results);
///
///     Ok(())
/// }
/// ```
pub struct OmdbApi {
    client: OmdbClient,
}

impl OmdbApi {
    /// Create a new API handle from the given configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration has no API key or the HTTP
    /// client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = OmdbClient::new(config)?;
        Ok(Self { client })
    }

    /// Create an API handle around an existing client.
    ///
    /// This is useful for testing or when you need custom client
    /// configuration.
    pub fn with_client(client: OmdbClient) -> Self {
        Self { client }
    }

    /// Search for titles by name.
    ///
    /// Returns the first page of search results. Use `search_page` for
    /// pagination.
    ///
    /// # Arguments
    /// * `query` - Search query string
    ///
    /// # Returns
    /// * `Ok(SearchPage)` with matching titles
    /// * `Err(OmdbError::EmptyQuery)` if the query is empty or
    ///   whitespace-only (no request is made)
    pub async fn search(&self, query: &str) -> Result<SearchPage> {
        self.search_page(query, 1).await
    }

    /// Search for titles by name with pagination.
    ///
    /// # Arguments
    /// * `query` - Search query string
    /// * `page` - Page number (1-based)
    ///
    /// # Returns
    /// * `Ok(SearchPage)` with matching titles, stamped with `page`
    /// * `Err(OmdbError::EmptyQuery)` if the query is empty or
    ///   whitespace-only (no request is made)
    /// * `Err(OmdbError::Api)` if OMDb reports no matches
    pub async fn search_page(&self, query: &str, page: u32) -> Result<SearchPage> {
        // Validate query is not empty or whitespace-only
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(OmdbError::EmptyQuery);
        }

        debug!("searching {:?} page {}", trimmed, page);

        // OMDb defaults to page 1 when the parameter is absent
        let page_value = page.to_string();
        let body = if page > 1 {
            self.client
                .get(&[("s", trimmed), ("page", page_value.as_str())])
                .await?
        } else {
            self.client.get(&[("s", trimmed)]).await?
        };

        let mut result = parse_search_response(&body)?;

        // Stamp the page we actually requested
        result.page = page;

        Ok(result)
    }

    /// Get the full-plot record for a single title.
    ///
    /// # Arguments
    /// * `imdb_id` - IMDb id of the title (e.g. "tt0372784")
    ///
    /// # Returns
    /// * `Ok(MovieDetails)` with the decoded record
    /// * `Err(OmdbError::MissingId)` if the id is empty or
    ///   whitespace-only (no request is made)
    /// * `Err(OmdbError::Api)` if OMDb does not know the id
    pub async fn details(&self, imdb_id: &str) -> Result<MovieDetails> {
        // Validate id
        let trimmed = imdb_id.trim();
        if trimmed.is_empty() {
            return Err(OmdbError::MissingId);
        }

        debug!("fetching details for {}", trimmed);

        let body = self.client.get(&[("i", trimmed), ("plot", "full")]).await?;

        parse_detail_response(&body)
    }
}
