//! Error types for the OMDb client
//!
//! This module defines all error types used throughout the library.
//! OmdbError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for OMDb client operations
///
/// The variants fall into three classes: input validation (`EmptyQuery`,
/// `MissingId`), failures the API reports in its own payload (`Api`), and
/// transport or decoding problems (`Http`, `Decode`, `RateLimited`).
#[derive(Error, Debug)]
pub enum OmdbError {
    /// Search was submitted with an empty or whitespace-only query
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// Details were requested without an IMDb identifier
    #[error("No IMDb id was provided")]
    MissingId,

    /// OMDb answered with `Response: "False"` and an error message
    #[error("OMDb error: {0}")]
    Api(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid OMDb JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field required by the wire format was missing from the payload
    #[error("Response field missing: {0}")]
    MissingField(&'static str),

    /// Rate limited by the server (HTTP 429) after all retries
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// No API key was configured (`OMDB_API_KEY`)
    #[error("OMDb API key is not configured")]
    MissingApiKey,
}

/// Serialize OmdbError as a string for Tauri compatibility
impl Serialize for OmdbError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for OMDb client operations
pub type Result<T> = std::result::Result<T, OmdbError>;
