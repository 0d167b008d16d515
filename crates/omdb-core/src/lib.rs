//! OMDb Browser Core Library
//!
//! This crate provides the core functionality for browsing the OMDb
//! movie database (<https://www.omdbapi.com>).
//!
//! # Features
//! - Search for titles by name with fixed-size (10 item) pages
//! - Fetch full-plot details for a single title by IMDb id
//! - Pure, reducer-style screen state machines for search and details
//! - Rate-limited HTTP client to stay inside the free-tier quota

pub mod api;
pub mod client;
pub mod controller;
pub mod display;
pub mod error;
pub mod parser;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use api::OmdbApi;
pub use client::{ClientConfig, OmdbClient, RateLimiter};
pub use controller::{DetailsController, DetailsSnapshot, SearchController, SearchSnapshot};
pub use display::{display_fields, meta_chips, poster_or_placeholder, DisplayField, PosterSize};
pub use error::{OmdbError, Result};
pub use state::{DetailsRequest, DetailsState, PageRequest, SearchState};
pub use types::{MediaType, MovieDetails, Rating, SearchItem, SearchPage, PAGE_SIZE};
