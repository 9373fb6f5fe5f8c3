//! Adapter layer: Convert Open Library DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if Open Library changes their response
//! format, only this file and dto.rs need to change.

use std::sync::LazyLock;

use regex::Regex;

use super::dto;
use crate::enrichment::domain::EnrichedBook;

/// Cover image URL template; `{id}-L.jpg` is the large rendition.
const COVER_URL_BASE: &str = "https://covers.openlibrary.org/b/id";

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("valid year regex"));

/// Convert an Open Library edition response to an [`EnrichedBook`].
pub fn to_enriched(edition: dto::EditionResponse) -> EnrichedBook {
    let published_year = edition.publish_date.as_deref().and_then(parse_year);

    let cover_url = edition
        .covers
        .first()
        .map(|id| format!("{COVER_URL_BASE}/{id}-L.jpg"));

    // Only entries with a resolved display name; key-only references are
    // silently dropped.
    let authors = edition
        .authors
        .into_iter()
        .filter_map(|a| a.name)
        .filter(|name| !name.is_empty())
        .collect();

    EnrichedBook {
        title: edition.title,
        subtitle: edition.subtitle,
        published_year,
        page_count: edition.number_of_pages,
        cover_url,
        authors,
    }
}

/// Best-effort extraction of a four-digit year from a free-text publish
/// date. First match wins; no match means no year rather than a failure.
fn parse_year(date: &str) -> Option<i32> {
    YEAR_RE.find(date).and_then(|m| m.as_str().parse().ok())
}
