//! Core data models for the book catalog.
//!
//! Defines the primary entities: [`Book`], its [`EnrichmentMeta`], and the
//! query/result types used by the store ([`ListQuery`], [`Page`]).
//! These are OUR types - wire formats (HTTP DTOs, Open Library responses)
//! are converted to and from them at the edges.

use chrono::{DateTime, Utc};

/// A book record in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Opaque unique identifier, generated at creation, immutable
    pub id: String,
    /// ISBN as supplied by the caller; unique after normalization
    pub isbn: Option<String>,
    /// Title (empty string until enrichment fills it, see catalog rules)
    pub title: String,
    /// Subtitle, if any
    pub subtitle: Option<String>,
    /// Year of publication
    pub published_year: Option<i32>,
    /// Number of pages
    pub page_count: Option<i32>,
    /// Cover image URL
    pub cover_url: Option<String>,
    /// Free-form tags; order and duplicates preserved as given
    pub tags: Vec<String>,
    /// Author names only; no author entity
    pub authors: Vec<String>,
    /// What enrichment was attempted and how it went
    pub enrichment: EnrichmentMeta,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Set at creation; never advanced (no update operation exists)
    pub updated_at: DateTime<Utc>,
}

/// Outcome of an enrichment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentStatus {
    /// Enrichment was not requested for this record
    NotRequested,
    /// Lookup succeeded and was merged
    Ok,
    /// Lookup was attempted but failed; record holds caller data only
    Partial,
}

impl EnrichmentStatus {
    /// Wire representation used by the API layer.
    pub fn as_str(self) -> &'static str {
        match self {
            EnrichmentStatus::NotRequested => "not_requested",
            EnrichmentStatus::Ok => "ok",
            EnrichmentStatus::Partial => "partial",
        }
    }
}

/// Enrichment bookkeeping attached to every [`Book`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentMeta {
    /// Whether a lookup was actually invoked
    pub attempted: bool,
    /// Origin tag, e.g. "openlibrary"; empty when not attempted
    pub source: String,
    pub status: EnrichmentStatus,
    /// The ISBN value sent to the lookup, kept even when the lookup failed
    pub looked_up_isbn: Option<String>,
}

impl Default for EnrichmentMeta {
    fn default() -> Self {
        Self {
            attempted: false,
            source: String::new(),
            status: EnrichmentStatus::NotRequested,
            looked_up_isbn: None,
        }
    }
}

/// Input for creating a book through the catalog service.
#[derive(Debug, Clone, Default)]
pub struct CreateBookInput {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub published_year: Option<i32>,
    pub page_count: Option<i32>,
    pub cover_url: Option<String>,
    pub tags: Vec<String>,
    pub authors: Vec<String>,
    /// Look up the ISBN on the external source and fill missing fields
    pub enrich: bool,
    /// Fail the whole creation if the lookup fails
    pub require_enrichment: bool,
}

/// Fields a list query may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    PublishedYear,
    CreatedAt,
    UpdatedAt,
}

impl std::str::FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "published_year" => Ok(SortField::PublishedYear),
            "created_at" => Ok(SortField::CreatedAt),
            "updated_at" => Ok(SortField::UpdatedAt),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

/// Error for a sort field outside the whitelist.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown sort field: {0}")]
pub struct UnknownSortField(pub String);

/// One sort criterion: a whitelisted field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub desc: bool,
}

/// Filter + sort + page specification for listing books.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Case-insensitive substring match against title or subtitle
    pub q: Option<String>,
    /// Case-insensitive substring match against any author name
    pub author: Option<String>,
    /// Exact match against the published year
    pub year: Option<i32>,
    /// Exact match against any tag
    pub tag: Option<String>,
    /// Applied left-to-right; empty means created_at descending
    pub sort: Vec<SortKey>,
    pub page: i64,
    pub page_size: i64,
}

impl ListQuery {
    /// Parse the wire form of the sort parameter: comma-separated field
    /// names, `-` prefix for descending (e.g. `"title,-published_year"`).
    /// Empty segments are skipped; an unknown field is an error.
    pub fn parse_sort(s: &str) -> Result<Vec<SortKey>, UnknownSortField> {
        let mut keys = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (name, desc) = match part.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (part, false),
            };
            keys.push(SortKey {
                field: name.parse()?,
                desc,
            });
        }
        Ok(keys)
    }
}

/// One page of results plus the pre-pagination total.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The slice of items for the requested page
    pub data: Vec<T>,
    /// Effective page number (after clamping)
    pub page: i64,
    /// Effective page size (after clamping)
    pub page_size: i64,
    /// Count of items matching the filter, before pagination
    pub total: i64,
}
