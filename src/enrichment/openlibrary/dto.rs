//! Open Library API Data Transfer Objects
//!
//! These types match EXACTLY what the Open Library edition endpoint returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the openlibrary module - convert to domain
//! types via the adapter.
//!
//! API Reference: https://openlibrary.org/dev/docs/api/books
//!
//! We use the /isbn/{isbn}.json endpoint, which redirects to the edition
//! record for that ISBN.

use serde::Deserialize;

/// Edition lookup response for `/isbn/{isbn}.json`.
///
/// Every field is optional on the wire; editions are crowd-sourced and
/// frequently sparse.
#[derive(Debug, Clone, Deserialize)]
pub struct EditionResponse {
    /// Edition title
    pub title: Option<String>,
    /// Edition subtitle
    pub subtitle: Option<String>,
    /// Page count
    pub number_of_pages: Option<i32>,
    /// Free-text publish date, e.g. "2017", "Oct 31, 1975", "2017-03-01"
    pub publish_date: Option<String>,
    /// Numeric cover image ids; the first one is the primary cover
    #[serde(default)]
    pub covers: Vec<i64>,
    /// Author entries; often just a key reference without a name
    #[serde(default)]
    pub authors: Vec<AuthorEntry>,
}

/// Author entry on an edition.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorEntry {
    /// Resolved display name; present on some records, absent on most
    pub name: Option<String>,
    /// Reference like "/authors/OL123A"; unused, kept for contract fidelity
    pub key: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
