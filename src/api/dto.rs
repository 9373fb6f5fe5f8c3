//! Wire DTOs for the HTTP API.
//!
//! Domain types never cross the HTTP boundary directly; they are mapped to
//! and from these shapes at the handler edge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Book, CreateBookInput, EnrichmentMeta, ListQuery, Page};

/// A book as returned by the API.
#[derive(Debug, Serialize)]
pub struct BookDto {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub tags: Vec<String>,
    pub authors: Vec<String>,
    pub enrichment: EnrichmentMetaDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Enrichment bookkeeping as returned by the API.
#[derive(Debug, Serialize)]
pub struct EnrichmentMetaDto {
    pub attempted: bool,
    /// Omitted when enrichment was never attempted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub looked_up_isbn: Option<String>,
}

impl From<EnrichmentMeta> for EnrichmentMetaDto {
    fn from(meta: EnrichmentMeta) -> Self {
        Self {
            attempted: meta.attempted,
            source: Some(meta.source).filter(|s| !s.is_empty()),
            status: meta.status.as_str(),
            looked_up_isbn: meta.looked_up_isbn,
        }
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            isbn: book.isbn,
            title: book.title,
            subtitle: book.subtitle,
            published_year: book.published_year,
            page_count: book.page_count,
            cover_url: book.cover_url,
            tags: book.tags,
            authors: book.authors,
            enrichment: book.enrichment.into(),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Request body for creating a book.
#[derive(Debug, Deserialize, Default)]
pub struct CreateBookRequest {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub published_year: Option<i32>,
    pub page_count: Option<i32>,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
}

impl CreateBookRequest {
    /// Combine the body with the enrichment query flags into the domain
    /// input.
    pub fn into_input(self, enrich: bool, require_enrichment: bool) -> CreateBookInput {
        CreateBookInput {
            isbn: self.isbn,
            title: self.title.filter(|t| !t.is_empty()),
            subtitle: self.subtitle,
            published_year: self.published_year,
            page_count: self.page_count,
            cover_url: self.cover_url,
            tags: self.tags,
            authors: self.authors,
            enrich,
            require_enrichment,
        }
    }
}

/// Query parameters for the create endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct CreateParams {
    #[serde(default)]
    pub enrich: bool,
    #[serde(default)]
    pub require_enrichment: bool,
}

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub q: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub tag: Option<String>,
    /// Comma-separated sort fields, `-` prefix for descending
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListParams {
    /// Build the domain query; fails on a sort field outside the whitelist.
    pub fn into_query(self) -> Result<ListQuery, crate::model::UnknownSortField> {
        let sort = match self.sort.as_deref() {
            Some(s) => ListQuery::parse_sort(s)?,
            None => Vec::new(),
        };
        Ok(ListQuery {
            q: self.q,
            author: self.author,
            year: self.year,
            tag: self.tag,
            sort,
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(20),
        })
    }
}

/// Paginated response envelope.
#[derive(Debug, Serialize)]
pub struct PageDto<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

impl From<Page<Book>> for PageDto<BookDto> {
    fn from(page: Page<Book>) -> Self {
        Self {
            data: page.data.into_iter().map(BookDto::from).collect(),
            page: page.page,
            page_size: page.page_size,
            total: page.total,
        }
    }
}
