//! Catalog service - orchestrates book creation and catalog queries.
//!
//! This is the high-level API over the store and the enrichment lookup:
//! 1. Validate the creation input
//! 2. Optionally enrich from the external source (caller wins on merge)
//! 3. Enforce ISBN uniqueness and insert
//!
//! List/get/delete are thin passthroughs with error normalization.

use std::sync::Arc;

use uuid::Uuid;

use crate::enrichment::BookLookup;
use crate::error::{CatalogError, Result};
use crate::model::{Book, CreateBookInput, EnrichmentStatus, ListQuery, Page};
use crate::store::BookStore;

/// Origin tag recorded on every enrichment attempt.
pub const ENRICHMENT_SOURCE: &str = "openlibrary";

/// Published years are accepted from movable type to the far future.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1450..=3000;

/// Service for creating, querying, and deleting catalog records.
pub struct CatalogService {
    store: Arc<BookStore>,
    lookup: Arc<dyn BookLookup>,
}

impl CatalogService {
    /// Create a new service over the given store and lookup port.
    pub fn new(store: Arc<BookStore>, lookup: Arc<dyn BookLookup>) -> Self {
        Self { store, lookup }
    }

    /// Validate, optionally enrich, and insert a new book.
    ///
    /// The title may be omitted only when enrichment is requested together
    /// with an ISBN - the lookup is then expected to supply it. A failed
    /// lookup aborts the creation only when `require_enrichment` is set;
    /// otherwise the record persists with caller data and `partial` status.
    pub async fn create_book(&self, input: CreateBookInput) -> Result<Book> {
        // basic validation: the title may come from enrichment later, but
        // only when an ISBN to look up was supplied
        if (!input.enrich || input.isbn.is_none())
            && input.title.as_deref().unwrap_or("").is_empty()
        {
            return Err(CatalogError::validation("title is required"));
        }
        if let Some(pages) = input.page_count
            && pages < 1
        {
            return Err(CatalogError::validation("page_count must be >= 1"));
        }
        if let Some(year) = input.published_year
            && !YEAR_RANGE.contains(&year)
        {
            return Err(CatalogError::validation(
                "published_year must be between 1450 and 3000",
            ));
        }

        let now = chrono::Utc::now();
        let mut book = Book {
            id: Uuid::new_v4().to_string(),
            isbn: input.isbn,
            title: input.title.unwrap_or_default(),
            subtitle: input.subtitle,
            published_year: input.published_year,
            page_count: input.page_count,
            cover_url: input.cover_url,
            tags: input.tags,
            authors: input.authors,
            enrichment: Default::default(),
            created_at: now,
            updated_at: now,
        };

        // optional enrichment
        if input.enrich
            && let Some(isbn) = book.isbn.clone().filter(|s| !s.is_empty())
        {
            book.enrichment.attempted = true;
            book.enrichment.source = ENRICHMENT_SOURCE.to_string();
            book.enrichment.looked_up_isbn = Some(isbn.clone());

            match self.lookup.fetch_by_isbn(&isbn).await {
                Ok(enriched) => {
                    // fill only missing fields; caller wins
                    enriched.fill_missing(&mut book);
                    book.enrichment.status = EnrichmentStatus::Ok;
                }
                Err(err) => {
                    if input.require_enrichment {
                        return Err(CatalogError::Upstream(err));
                    }
                    tracing::warn!(isbn = %isbn, error = %err, "enrichment failed; keeping caller data");
                    book.enrichment.status = EnrichmentStatus::Partial;
                }
            }
        }

        // Early exit on a duplicate ISBN. The store re-checks under its
        // exclusive section, which remains the authoritative guard against
        // racing creates.
        if let Some(isbn) = book.isbn.as_deref().filter(|s| !s.is_empty())
            && self.store.get_by_isbn(isbn).is_ok()
        {
            return Err(CatalogError::Conflict);
        }

        Ok(self.store.create(book)?)
    }

    /// List books matching the query.
    pub fn list_books(&self, query: &ListQuery) -> Page<Book> {
        self.store.list(query)
    }

    /// Fetch a book by identifier.
    pub fn get_book(&self, id: &str) -> Result<Book> {
        self.store.get_by_id(id).map_err(|_| CatalogError::NotFound)
    }

    /// Delete a book by identifier.
    pub fn delete_book(&self, id: &str) -> Result<()> {
        self.store.delete(id).map_err(|_| CatalogError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::traits::mocks::MockLookup;

    fn service(lookup: MockLookup) -> CatalogService {
        CatalogService::new(Arc::new(BookStore::new()), Arc::new(lookup))
    }

    fn input(title: Option<&str>) -> CreateBookInput {
        CreateBookInput {
            title: title.map(String::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_no_enrich() {
        let svc = service(MockLookup::miss());
        let out = svc.create_book(input(Some("My Book"))).await.unwrap();
        assert_eq!(out.title, "My Book");
        assert!(!out.enrichment.attempted);
        assert_eq!(out.enrichment.status, EnrichmentStatus::NotRequested);
        assert!(!out.id.is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_title_without_enrichment() {
        let svc = service(MockLookup::hit());
        let err = svc.create_book(input(None)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = svc.create_book(input(Some(""))).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_validates_page_count() {
        let svc = service(MockLookup::miss());
        let mut bad = input(Some("T"));
        bad.page_count = Some(0);
        let err = svc.create_book(bad).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_validates_year_range() {
        let svc = service(MockLookup::miss());
        for year in [1449, 3001] {
            let mut bad = input(Some("T"));
            bad.published_year = Some(year);
            let err = svc.create_book(bad).await.unwrap_err();
            assert!(matches!(err, CatalogError::Validation(_)), "year {year}");
        }
        for year in [1450, 3000] {
            let mut ok = input(Some("T"));
            ok.published_year = Some(year);
            svc.create_book(ok).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_create_enrich_hit_merges() {
        let svc = service(MockLookup::hit());
        let out = svc
            .create_book(CreateBookInput {
                isbn: Some("9780134494166".to_string()),
                enrich: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(out.enrichment.attempted);
        assert_eq!(out.enrichment.status, EnrichmentStatus::Ok);
        assert_eq!(out.enrichment.source, ENRICHMENT_SOURCE);
        assert_eq!(
            out.enrichment.looked_up_isbn.as_deref(),
            Some("9780134494166")
        );
        assert_eq!(out.title, "Clean Architecture");
        assert_eq!(out.published_year, Some(2017));
        assert_eq!(out.authors, vec!["Robert C. Martin".to_string()]);
    }

    #[tokio::test]
    async fn test_create_enrich_caller_wins_over_successful_lookup() {
        let svc = service(MockLookup::hit());
        let out = svc
            .create_book(CreateBookInput {
                isbn: Some("9780134494166".to_string()),
                title: Some("Fallback Title".to_string()),
                enrich: true,
                ..Default::default()
            })
            .await
            .unwrap();

        // The lookup succeeded, but the caller-supplied title is kept
        assert_eq!(out.title, "Fallback Title");
        assert_eq!(out.enrichment.status, EnrichmentStatus::Ok);
        // Fields the caller left empty are filled
        assert_eq!(out.page_count, Some(432));
    }

    #[tokio::test]
    async fn test_create_enrich_miss_optional_degrades_to_partial() {
        let svc = service(MockLookup::miss());
        let out = svc
            .create_book(CreateBookInput {
                isbn: Some("9780134494166".to_string()),
                title: Some("Fallback Title".to_string()),
                enrich: true,
                require_enrichment: false,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(out.enrichment.status, EnrichmentStatus::Partial);
        assert!(out.enrichment.attempted);
        assert_eq!(out.title, "Fallback Title");
    }

    #[tokio::test]
    async fn test_create_enrich_miss_required_fails_and_persists_nothing() {
        let store = Arc::new(BookStore::new());
        let svc = CatalogService::new(store.clone(), Arc::new(MockLookup::miss()));

        let err = svc
            .create_book(CreateBookInput {
                isbn: Some("9780134494166".to_string()),
                enrich: true,
                require_enrichment: true,
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Upstream(_)));
        assert_eq!(store.list(&ListQuery::default()).total, 0);
    }

    #[tokio::test]
    async fn test_create_enrich_not_found_required_fails() {
        let svc = service(MockLookup::not_found());
        let err = svc
            .create_book(CreateBookInput {
                isbn: Some("0000000000".to_string()),
                enrich: true,
                require_enrichment: true,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_create_enrich_with_empty_isbn_skips_lookup() {
        // An empty (but supplied) ISBN passes the title exemption yet never
        // reaches the lookup
        let svc = service(MockLookup::miss());
        let out = svc
            .create_book(CreateBookInput {
                isbn: Some(String::new()),
                enrich: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(!out.enrichment.attempted);
        assert_eq!(out.enrichment.status, EnrichmentStatus::NotRequested);
        assert!(out.title.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_isbn_fails() {
        let store = Arc::new(BookStore::new());
        let svc = CatalogService::new(store, Arc::new(MockLookup::miss()));

        let mut first = input(Some("T"));
        first.isbn = Some("9780000000000".to_string());
        svc.create_book(first).await.unwrap();

        // Same key after normalization
        let mut second = input(Some("T"));
        second.isbn = Some("978-0-00-000000-0".to_string());
        let err = svc.create_book(second).await.unwrap_err();
        assert!(matches!(err, CatalogError::Conflict));
    }

    #[tokio::test]
    async fn test_get_and_delete_lifecycle() {
        let svc = service(MockLookup::miss());
        let mut with_isbn = input(Some("X"));
        with_isbn.isbn = Some("9780123456789".to_string());
        let created = svc.create_book(with_isbn).await.unwrap();

        let got = svc.get_book(&created.id).unwrap();
        assert_eq!(got.id, created.id);

        svc.delete_book(&created.id).unwrap();
        assert!(matches!(
            svc.get_book(&created.id),
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            svc.delete_book(&created.id),
            Err(CatalogError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_passthrough() {
        let svc = service(MockLookup::miss());
        svc.create_book(input(Some("A"))).await.unwrap();
        svc.create_book(input(Some("B"))).await.unwrap();

        let page = svc.list_books(&ListQuery::default());
        assert_eq!(page.total, 2);
    }
}
