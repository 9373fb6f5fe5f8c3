//! Open Library API integration
//!
//! Provides bibliographic enrichment by looking up editions by ISBN.
//!
//! API docs: https://openlibrary.org/dev/docs/api/books

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_enriched;
pub use client::{DEFAULT_BASE_URL, OpenLibraryClient};
