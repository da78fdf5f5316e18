//! Store trait for collection-scoped document persistence

use crate::core::document::Document;
use crate::core::query::Filter;
use anyhow::Result;
use async_trait::async_trait;

/// Collection-scoped document store
///
/// One store instance serves one collection (`T::collection()`). Every
/// operation is a single round-trip against the backend; errors are backend
/// failures and propagate unchanged to the caller.
///
/// Listing methods return documents in insertion order, which is also
/// ascending code order because codes are auto-incremented.
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    /// Insert a new document, assigning the next code
    async fn insert(&self, document: T) -> Result<T>;

    /// Get a document by code
    async fn find(&self, code: i64) -> Result<Option<T>>;

    /// Get every document matching the filter
    async fn find_by(&self, filter: &Filter) -> Result<Vec<T>>;

    /// Get one window of the documents matching the filter
    async fn find_page(&self, filter: &Filter, skip: u64, limit: u64) -> Result<Vec<T>>;

    /// Count documents matching the filter
    async fn count(&self, filter: &Filter) -> Result<u64>;

    /// Replace an existing document, keyed by its code
    ///
    /// Returns `None` if no document has that code.
    async fn replace(&self, document: T) -> Result<Option<T>>;

    /// Delete a document by code, returning whether it existed
    async fn delete(&self, code: i64) -> Result<bool>;

    /// Delete every document matching the filter, returning how many were removed
    async fn delete_by(&self, filter: &Filter) -> Result<u64>;

    /// Get the first document matching the filter
    async fn find_one_by(&self, filter: &Filter) -> Result<Option<T>> {
        Ok(self.find_page(filter, 0, 1).await?.into_iter().next())
    }
}
