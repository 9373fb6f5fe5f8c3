//! Bibliographic enrichment - fetches book metadata from external sources.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`openlibrary/dto.rs`) - Exact API response shapes
//! - **Adapter** - Converts DTOs to domain models
//! - **Client** - HTTP client with retry/backoff for the Open Library API
//! - **Traits** - The `BookLookup` port the catalog service depends on
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. We can swap providers without changing business logic

pub mod domain;
pub mod openlibrary;
pub mod traits;

pub use domain::{EnrichedBook, EnrichmentError};
pub use openlibrary::OpenLibraryClient;
pub use traits::BookLookup;
