//! Catalog service over the local book store.

use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Book;
use crate::domain::ports::BookRepository;

pub struct CatalogService<R: BookRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: BookRepository + ?Sized> CatalogService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List all books.
    pub async fn list_books(&self) -> DomainResult<Vec<Book>> {
        self.repository.list().await
    }

    /// Get a book by id.
    pub async fn get_book(&self, id: i64) -> DomainResult<Book> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Books", id))
    }

    /// Set the stock of a book.
    pub async fn update_stock(&self, id: i64, stock: i64) -> DomainResult<Book> {
        Book::validate_stock(stock).map_err(DomainError::ValidationFailed)?;

        let book = self.repository.update_stock(id, stock).await?;
        info!(book_id = id, stock, "book stock updated");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteBookRepository};

    async fn setup_service() -> CatalogService<SqliteBookRepository> {
        let pool = create_migrated_test_pool().await.unwrap();
        CatalogService::new(Arc::new(SqliteBookRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_list_books_returns_seed_data() {
        let service = setup_service().await;

        let books = service.list_books().await.unwrap();

        let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_get_missing_book() {
        let service = setup_service().await;

        let err = service.get_book(2).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_stock() {
        let service = setup_service().await;

        let book = service.update_stock(1, 40).await.unwrap();
        assert_eq!(book.stock, 40);
        assert_eq!(service.get_book(1).await.unwrap().stock, 40);
    }

    #[tokio::test]
    async fn test_update_stock_rejects_negative() {
        let service = setup_service().await;

        let err = service.update_stock(1, -3).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
        assert_eq!(service.get_book(1).await.unwrap().stock, 12);
    }

    #[tokio::test]
    async fn test_update_stock_of_missing_book() {
        let service = setup_service().await;

        let err = service.update_stock(2, 1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
