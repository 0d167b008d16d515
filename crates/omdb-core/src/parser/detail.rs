//! Detail response decoding
//!
//! Decodes a single full-plot title record into [`MovieDetails`].

use serde::Deserialize;

use crate::error::{OmdbError, Result};
use crate::parser::{is_true, na_opt};
use crate::types::{MediaType, MovieDetails, Rating};

/// Fallback message when OMDb reports failure without an `Error` field
const FALLBACK_DETAIL_ERROR: &str = "Could not load movie details.";

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Rated")]
    rated: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Writer")]
    writer: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Awards")]
    awards: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<RawRating>,
    #[serde(rename = "Metascore")]
    metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
    #[serde(rename = "Type")]
    media_type: Option<String>,
    #[serde(rename = "BoxOffice")]
    box_office: Option<String>,
    #[serde(rename = "Production")]
    production: Option<String>,
    #[serde(rename = "Website")]
    website: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRating {
    #[serde(rename = "Source")]
    source: Option<String>,
    #[serde(rename = "Value")]
    value: Option<String>,
}

/// Parse a detail response body into [`MovieDetails`].
///
/// Every "N/A" field decodes to `None`. The id and title are required:
/// a success envelope without them is malformed.
///
/// # Arguments
/// * `body` - Raw JSON response body
///
/// # Returns
/// * `Ok(MovieDetails)` with the decoded record
/// * `Err(OmdbError::Api)` if OMDb reported a logical failure
/// * `Err(OmdbError::Decode)` if the body is not valid JSON
/// * `Err(OmdbError::MissingField)` if a success payload lacks id or title
pub fn parse_detail_response(body: &str) -> Result<MovieDetails> {
    let envelope: DetailEnvelope = serde_json::from_str(body)?;

    if !is_true(&envelope.response) {
        return Err(OmdbError::Api(
            envelope
                .error
                .unwrap_or_else(|| FALLBACK_DETAIL_ERROR.to_string()),
        ));
    }

    let imdb_id = envelope
        .imdb_id
        .and_then(na_opt)
        .ok_or(OmdbError::MissingField("imdbID"))?;
    let title = envelope
        .title
        .and_then(na_opt)
        .ok_or(OmdbError::MissingField("Title"))?;

    let ratings = envelope
        .ratings
        .into_iter()
        .filter_map(|raw| {
            let source = raw.source.and_then(na_opt)?;
            let value = raw.value.and_then(na_opt)?;
            Some(Rating { source, value })
        })
        .collect();

    Ok(MovieDetails {
        imdb_id,
        title,
        year: envelope.year.and_then(na_opt),
        rated: envelope.rated.and_then(na_opt),
        released: envelope.released.and_then(na_opt),
        runtime: envelope.runtime.and_then(na_opt),
        genre: envelope.genre.and_then(na_opt),
        director: envelope.director.and_then(na_opt),
        writer: envelope.writer.and_then(na_opt),
        actors: envelope.actors.and_then(na_opt),
        plot: envelope.plot.and_then(na_opt),
        language: envelope.language.and_then(na_opt),
        country: envelope.country.and_then(na_opt),
        awards: envelope.awards.and_then(na_opt),
        poster_url: envelope.poster.and_then(na_opt),
        ratings,
        metascore: envelope.metascore.and_then(na_opt),
        imdb_rating: envelope.imdb_rating.and_then(na_opt),
        imdb_votes: envelope.imdb_votes.and_then(na_opt),
        media_type: MediaType::from_wire(envelope.media_type.as_deref().unwrap_or("")),
        box_office: envelope.box_office.and_then(na_opt),
        production: envelope.production.and_then(na_opt),
        website: envelope.website.and_then(na_opt),
    })
}
