//! Trait definitions for external lookup clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real Open Library client, while tests
//! substitute mock implementations.

use async_trait::async_trait;

use super::domain::{EnrichedBook, EnrichmentError};

/// Trait for ISBN-keyed bibliographic lookup.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait BookLookup: Send + Sync {
    /// Fetch externally-sourced fields for an ISBN.
    async fn fetch_by_isbn(&self, isbn: &str) -> Result<EnrichedBook, EnrichmentError>;
}

#[async_trait]
impl BookLookup for super::openlibrary::OpenLibraryClient {
    async fn fetch_by_isbn(&self, isbn: &str) -> Result<EnrichedBook, EnrichmentError> {
        self.fetch_by_isbn(isbn).await
    }
}

/// Mock lookup clients for testing.
#[cfg(test)]
pub mod mocks {
    use super::*;

    /// Mock lookup that returns a predefined result.
    pub struct MockLookup {
        /// Result to return from fetch_by_isbn
        pub result: Option<EnrichedBook>,
        /// Error to return (takes precedence over result)
        pub error: Option<EnrichmentError>,
    }

    impl MockLookup {
        /// Create a mock that returns a populated edition.
        pub fn hit() -> Self {
            Self {
                result: Some(EnrichedBook {
                    title: Some("Clean Architecture".to_string()),
                    subtitle: None,
                    published_year: Some(2017),
                    page_count: Some(432),
                    cover_url: None,
                    authors: vec!["Robert C. Martin".to_string()],
                }),
                error: None,
            }
        }

        /// Create a mock that fails with a transient network error.
        pub fn miss() -> Self {
            Self {
                result: None,
                error: Some(EnrichmentError::Network("connection refused".to_string())),
            }
        }

        /// Create a mock that fails with the terminal not-found outcome.
        pub fn not_found() -> Self {
            Self {
                result: None,
                error: Some(EnrichmentError::NotFound),
            }
        }

        /// Create a mock with a custom result.
        pub fn with_result(result: EnrichedBook) -> Self {
            Self {
                result: Some(result),
                error: None,
            }
        }
    }

    #[async_trait]
    impl BookLookup for MockLookup {
        async fn fetch_by_isbn(&self, _isbn: &str) -> Result<EnrichedBook, EnrichmentError> {
            if let Some(err) = &self.error {
                return Err(err.clone());
            }
            self.result.clone().ok_or(EnrichmentError::NotFound)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_hit() {
            let mock = MockLookup::hit();
            let enriched = mock.fetch_by_isbn("9780134494166").await.unwrap();
            assert_eq!(enriched.title.as_deref(), Some("Clean Architecture"));
            assert_eq!(enriched.published_year, Some(2017));
        }

        #[tokio::test]
        async fn test_mock_miss() {
            let mock = MockLookup::miss();
            let result = mock.fetch_by_isbn("9780134494166").await;
            assert!(matches!(result, Err(EnrichmentError::Network(_))));
        }

        #[tokio::test]
        async fn test_mock_not_found() {
            let mock = MockLookup::not_found();
            let result = mock.fetch_by_isbn("9780134494166").await;
            assert!(matches!(result, Err(EnrichmentError::NotFound)));
        }
    }
}
