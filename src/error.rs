//! Domain error taxonomy for the catalog.
//!
//! The store raises only [`StoreError`](crate::store::StoreError) values;
//! the catalog service translates those and introduces `Validation` and
//! `Upstream` itself. Nothing here is fatal to the process - every failure
//! is a value returned to the caller, and the API layer maps each variant
//! to a status code.

use crate::enrichment::EnrichmentError;
use crate::store::StoreError;

/// Result type for catalog service operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors surfaced by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Malformed or out-of-range input; the caller must fix the request
    #[error("validation: {0}")]
    Validation(String),

    /// Identifier or ISBN collision
    #[error("conflict")]
    Conflict,

    /// Referenced record does not exist
    #[error("not found")]
    NotFound,

    /// Enrichment lookup failed and enrichment was mandatory
    #[error("upstream enrichment failed: {0}")]
    Upstream(#[source] EnrichmentError),
}

impl CatalogError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => CatalogError::Conflict,
            StoreError::NotFound => CatalogError::NotFound,
        }
    }
}
