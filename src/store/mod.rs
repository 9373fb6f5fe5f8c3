//! In-memory book store with identifier and ISBN indexes.
//!
//! Both indexes live behind a single [`RwLock`] and are always mutated
//! together under the same guard. Reads (`get_by_id`, `get_by_isbn`, the
//! snapshot phase of `list`) run concurrently; writes (`create`, `delete`)
//! are exclusive. Listing filters, sorts, and paginates on a private
//! snapshot outside the lock, so long queries never block writers longer
//! than the copy itself.
//!
//! The store persists whatever it is given - business validation lives in
//! the catalog service.

use std::cmp::Ordering;
use std::collections::HashMap;

use parking_lot::RwLock;

use crate::model::{Book, ListQuery, Page, SortField, SortKey};

/// Page size used when the query asks for less than one item per page.
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Errors raised by store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Identifier already present, identifier empty, or ISBN already indexed
    #[error("conflict")]
    Conflict,

    /// No record under the given identifier or ISBN
    #[error("not found")]
    NotFound,
}

/// Both indexes, guarded as one unit.
#[derive(Default)]
struct Indexes {
    by_id: HashMap<String, Book>,
    /// Normalized ISBN -> record identifier
    by_isbn: HashMap<String, String>,
}

/// Concurrency-safe in-memory collection of book records.
pub struct BookStore {
    inner: RwLock<Indexes>,
}

impl BookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Indexes::default()),
        }
    }

    /// Store a book under its identifier.
    ///
    /// The identifier-presence check, the ISBN-index check, and both
    /// insertions happen under one exclusive lock acquisition, so no
    /// interleaved create can produce two records sharing an ISBN.
    pub fn create(&self, book: Book) -> Result<Book, StoreError> {
        let mut inner = self.inner.write();

        if book.id.is_empty() || inner.by_id.contains_key(&book.id) {
            return Err(StoreError::Conflict);
        }

        let isbn_key = book
            .isbn
            .as_deref()
            .map(normalize_isbn)
            .filter(|key| !key.is_empty());
        if let Some(key) = isbn_key {
            if inner.by_isbn.contains_key(&key) {
                return Err(StoreError::Conflict);
            }
            inner.by_isbn.insert(key, book.id.clone());
        }

        let stored = book.clone();
        inner.by_id.insert(book.id.clone(), book);
        Ok(stored)
    }

    /// Look up a record by identifier.
    pub fn get_by_id(&self, id: &str) -> Result<Book, StoreError> {
        let inner = self.inner.read();
        inner.by_id.get(id).cloned().ok_or(StoreError::NotFound)
    }

    /// Look up a record through the ISBN index.
    ///
    /// The input is normalized first. An index entry whose target record is
    /// missing reports not-found rather than a fatal inconsistency.
    pub fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        let inner = self.inner.read();
        let key = normalize_isbn(isbn);
        let id = inner.by_isbn.get(&key).ok_or(StoreError::NotFound)?;
        inner.by_id.get(id).cloned().ok_or(StoreError::NotFound)
    }

    /// Return a paginated slice of books matching the query.
    ///
    /// The flow is:
    ///
    ///  1. Snapshot all books under a read lock (released before step 2).
    ///  2. Apply filters (title/subtitle text, author, tag, year).
    ///  3. Sort by the provided sort keys (multi-field, ASC/DESC);
    ///     defaults to created_at DESC.
    ///  4. Apply pagination (page / page_size).
    pub fn list(&self, query: &ListQuery) -> Page<Book> {
        let mut items: Vec<Book> = {
            let inner = self.inner.read();
            inner.by_id.values().cloned().collect()
        };

        items.retain(|book| matches_filters(book, query));
        sort_books(&mut items, &query.sort);

        let page = query.page.max(1);
        let size = if query.page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            query.page_size
        };
        let total = items.len() as i64;
        let start = (page - 1).saturating_mul(size).clamp(0, total);
        let end = start.saturating_add(size).min(total);
        let data = items[start as usize..end as usize].to_vec();

        Page {
            data,
            page,
            page_size: size,
            total,
        }
    }

    /// Remove a record and, if it carried an ISBN, its index entry.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let book = inner.by_id.remove(id).ok_or(StoreError::NotFound)?;
        if let Some(isbn) = &book.isbn {
            let key = normalize_isbn(isbn);
            inner.by_isbn.remove(&key);
        }
        Ok(())
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip hyphens and spaces so differently-formatted ISBNs collide on the
/// same index key.
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

/// A record is retained only if it satisfies every provided predicate.
fn matches_filters(book: &Book, query: &ListQuery) -> bool {
    // q: title or subtitle contains (case-insensitive)
    if let Some(q) = &query.q {
        let needle = q.to_lowercase();
        let title_hit = book.title.to_lowercase().contains(&needle);
        let subtitle_hit = book
            .subtitle
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(&needle);
        if !title_hit && !subtitle_hit {
            return false;
        }
    }

    // author: any author contains (case-insensitive)
    if let Some(author) = &query.author {
        let needle = author.to_lowercase();
        if !book
            .authors
            .iter()
            .any(|a| a.to_lowercase().contains(&needle))
        {
            return false;
        }
    }

    // tag: exact match
    if let Some(tag) = &query.tag
        && !book.tags.iter().any(|t| t == tag)
    {
        return false;
    }

    // year: exact; an absent year never matches
    if let Some(year) = query.year
        && book.published_year != Some(year)
    {
        return false;
    }

    true
}

/// Sort books in place by the provided keys, left-to-right as tie-breakers.
/// No keys means created_at descending. Identifier ascending breaks any
/// remaining tie, guaranteeing a total order.
fn sort_books(books: &mut [Book], keys: &[SortKey]) {
    const DEFAULT_SORT: [SortKey; 1] = [SortKey {
        field: SortField::CreatedAt,
        desc: true,
    }];
    let keys = if keys.is_empty() { &DEFAULT_SORT } else { keys };

    books.sort_by(|a, b| {
        for key in keys {
            let ord = match key.field {
                SortField::Title => a.title.cmp(&b.title),
                // Option::cmp orders None before Some, so an absent year
                // sorts below any present year; desc reverses the result.
                SortField::PublishedYear => a.published_year.cmp(&b.published_year),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            };
            let ord = if key.desc { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.id.cmp(&b.id)
    });
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalization is idempotent and never leaves separators behind
        #[test]
        fn normalize_is_idempotent(input in "[0-9Xx \\-]{0,20}") {
            let once = normalize_isbn(&input);
            prop_assert!(!once.contains('-') && !once.contains(' '));
            prop_assert_eq!(normalize_isbn(&once), once);
        }

        /// Any page/page_size combination yields a slice within bounds and
        /// reports the true total
        #[test]
        fn pagination_never_panics(page in -5i64..50, size in -5i64..50, n in 0usize..30) {
            let store = BookStore::new();
            for i in 0..n {
                let mut b = tests::book(&format!("b{i}"), "T");
                b.created_at = chrono::Utc::now();
                b.updated_at = b.created_at;
                store.create(b).unwrap();
            }
            let out = store.list(&ListQuery { page, page_size: size, ..Default::default() });
            prop_assert_eq!(out.total, n as i64);
            prop_assert!(out.data.len() as i64 <= out.page_size);
            prop_assert!(out.page >= 1);
        }
    }
}
