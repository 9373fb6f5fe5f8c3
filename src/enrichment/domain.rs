//! Internal domain models for bibliographic enrichment.
//!
//! These types are OUR types - they don't change when the external API
//! changes. Open Library responses get converted into them via the adapter.

use crate::model::Book;

/// Bibliographic fields obtained from an external lookup.
///
/// Never persisted directly; only merged into a [`Book`] by the catalog
/// service under the caller-wins policy.
#[derive(Debug, Clone, Default)]
pub struct EnrichedBook {
    /// Edition title
    pub title: Option<String>,
    /// Edition subtitle
    pub subtitle: Option<String>,
    /// Year of publication
    pub published_year: Option<i32>,
    /// Number of pages
    pub page_count: Option<i32>,
    /// Cover image URL
    pub cover_url: Option<String>,
    /// Author display names (nameless entries are dropped upstream)
    pub authors: Vec<String>,
}

impl EnrichedBook {
    /// Fill only the fields the caller left empty; caller-supplied values
    /// are never overwritten.
    pub fn fill_missing(&self, book: &mut Book) {
        if book.title.is_empty()
            && let Some(title) = &self.title
        {
            book.title = title.clone();
        }
        if book.subtitle.is_none() {
            book.subtitle = self.subtitle.clone();
        }
        if book.published_year.is_none() {
            book.published_year = self.published_year;
        }
        if book.page_count.is_none() {
            book.page_count = self.page_count;
        }
        if book.cover_url.is_none() {
            book.cover_url = self.cover_url.clone();
        }
        if book.authors.is_empty() && !self.authors.is_empty() {
            book.authors = self.authors.clone();
        }
    }
}

/// Errors that can occur during an enrichment lookup.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    /// The source has no edition for this ISBN; terminal, never retried
    #[error("no edition found for this ISBN")]
    NotFound,

    #[error("network error: {0}")]
    Network(String),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Parse(String),
}
