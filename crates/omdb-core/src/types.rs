//! Data types for the OMDb client
//!
//! This module contains all the core data structures used throughout the
//! library. All types implement Serialize and Deserialize for JSON
//! compatibility with Tauri. Wire-format quirks ("N/A" strings, string
//! numbers) are resolved at decode time, so `None` here always means the
//! upstream record has no value.

use serde::{Deserialize, Serialize};

/// Fixed page size of the OMDb search endpoint
pub const PAGE_SIZE: u32 = 10;

/// Kind of title on OMDb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Feature film
    Movie,
    /// TV series
    Series,
    /// Single episode of a series
    Episode,
    /// Video game
    Game,
    /// Anything OMDb reports that we do not know about
    Other,
}

impl MediaType {
    /// Decode the wire `Type` string ("movie", "series", ...).
    ///
    /// Unknown or missing values map to `Other` rather than failing the
    /// whole result row.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => MediaType::Movie,
            "series" => MediaType::Series,
            "episode" => MediaType::Episode,
            "game" => MediaType::Game,
            _ => MediaType::Other,
        }
    }

    /// Capitalized label for list rows
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Series => "Series",
            MediaType::Episode => "Episode",
            MediaType::Game => "Game",
            MediaType::Other => "Other",
        }
    }
}

/// One row of an OMDb search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    /// Unique, stable IMDb identifier (e.g. "tt0372784")
    pub imdb_id: String,
    /// Display title
    pub title: String,
    /// Year or year range (e.g. "2005" or "2019–2022")
    pub year: Option<String>,
    /// Kind of title
    pub media_type: MediaType,
    /// Poster image URL, if OMDb has one
    pub poster_url: Option<String>,
}

/// One page of search results
///
/// Pages are fixed at [`PAGE_SIZE`] items by the upstream API; the last
/// page may be shorter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    /// Items on this page, in API order
    pub items: Vec<SearchItem>,
    /// Total number of matches reported by OMDb across all pages
    pub total_results: u32,
    /// Page number this batch represents (1-based)
    pub page: u32,
}

impl SearchPage {
    /// Create a new search page
    pub fn new(items: Vec<SearchItem>, total_results: u32, page: u32) -> Self {
        Self {
            items,
            total_results,
            page,
        }
    }

    /// Create an empty first page
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_results: 0,
            page: 1,
        }
    }

    /// Number of pages needed to cover `total_results`
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_results)
    }

    /// Whether another page can be requested after this one
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Ceiling division of a result count into [`PAGE_SIZE`] pages
pub fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}

/// One third-party rating row ("Internet Movie Database" -> "8.5/10")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating source name
    pub source: String,
    /// Rating value in the source's own format
    pub value: String,
}

/// Full record for a single title, fetched by IMDb id with the full plot
///
/// Everything except the id and title is optional: OMDb marks unknown
/// fields with the literal string "N/A", which decodes to `None` here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    /// Unique IMDb identifier
    pub imdb_id: String,
    /// Display title
    pub title: String,
    /// Release year
    pub year: Option<String>,
    /// Age rating (e.g. "PG-13")
    pub rated: Option<String>,
    /// Release date
    pub released: Option<String>,
    /// Runtime (e.g. "140 min")
    pub runtime: Option<String>,
    /// Comma-separated genre list
    pub genre: Option<String>,
    /// Director name(s)
    pub director: Option<String>,
    /// Writer name(s)
    pub writer: Option<String>,
    /// Main cast
    pub actors: Option<String>,
    /// Full plot text
    pub plot: Option<String>,
    /// Spoken languages
    pub language: Option<String>,
    /// Production countries
    pub country: Option<String>,
    /// Awards summary
    pub awards: Option<String>,
    /// Poster image URL
    pub poster_url: Option<String>,
    /// Third-party ratings, in API order
    pub ratings: Vec<Rating>,
    /// Metacritic score
    pub metascore: Option<String>,
    /// IMDb rating (0-10)
    pub imdb_rating: Option<String>,
    /// IMDb vote count
    pub imdb_votes: Option<String>,
    /// Kind of title
    pub media_type: MediaType,
    /// Box office earnings
    pub box_office: Option<String>,
    /// Production company
    pub production: Option<String>,
    /// Official website
    pub website: Option<String>,
}
