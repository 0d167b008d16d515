//! Presentation helpers for the two screens
//!
//! Pure formatting functions: absent fields produce no output at all,
//! so the rendering layer never needs to know about OMDb's "N/A"
//! convention.

use serde::Serialize;

use crate::types::MovieDetails;

/// Placeholder shown for list rows without a poster
const THUMB_PLACEHOLDER: &str = "https://via.placeholder.com/100x150?text=No+Image";
/// Placeholder shown on the details screen without a poster
const FULL_PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Poster rendering context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    /// Small list-row thumbnail
    Thumb,
    /// Full-size details poster
    Full,
}

/// Resolve a poster URL, falling back to the fixed placeholder
pub fn poster_or_placeholder(poster_url: Option<&str>, size: PosterSize) -> String {
    match poster_url {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => match size {
            PosterSize::Thumb => THUMB_PLACEHOLDER.to_string(),
            PosterSize::Full => FULL_PLACEHOLDER.to_string(),
        },
    }
}

/// One labeled row of the details screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayField {
    /// Row label (e.g. "Director")
    pub label: &'static str,
    /// Row value, verbatim from the record
    pub value: String,
}

/// Ordered label/value rows for a details record.
///
/// Fields the record does not carry are skipped entirely; the result
/// contains only rows worth rendering.
pub fn display_fields(details: &MovieDetails) -> Vec<DisplayField> {
    let candidates = [
        ("Director", &details.director),
        ("Actors", &details.actors),
        ("Genre", &details.genre),
        ("Country", &details.country),
        ("Language", &details.language),
        ("Awards", &details.awards),
        ("Box Office", &details.box_office),
        ("Production", &details.production),
    ];

    candidates
        .into_iter()
        .filter_map(|(label, value)| {
            value.as_ref().map(|value| DisplayField {
                label,
                value: value.clone(),
            })
        })
        .collect()
}

/// Short meta chips for the details header: year, runtime, age rating.
///
/// Absent values are omitted rather than rendered as placeholders.
pub fn meta_chips(details: &MovieDetails) -> Vec<String> {
    [&details.year, &details.runtime, &details.rated]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
}
