//! Book repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Book, BookTitle};

/// Repository interface for the local book store.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Select `id, title` for every book whose id equals `id`, ordered by id.
    ///
    /// Returns all matching rows; enforcing "exactly one" is the caller's job.
    async fn find_title_by_id(&self, id: i64) -> DomainResult<Vec<BookTitle>>;

    /// Select `id, title` for every book whose id is in `ids`, ordered by id,
    /// in a single query.
    async fn find_titles_by_ids(&self, ids: &[i64]) -> DomainResult<Vec<BookTitle>>;

    /// Get a book by id.
    async fn get(&self, id: i64) -> DomainResult<Option<Book>>;

    /// List all books ordered by id.
    async fn list(&self) -> DomainResult<Vec<Book>>;

    /// Set the stock of a book and return the updated row.
    async fn update_stock(&self, id: i64, stock: i64) -> DomainResult<Book>;
}
