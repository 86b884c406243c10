//! SQLite implementation of the BookRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Book, BookTitle};
use crate::domain::ports::BookRepository;

#[derive(Clone)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn find_title_by_id(&self, id: i64) -> DomainResult<Vec<BookTitle>> {
        let rows: Vec<BookTitle> = sqlx::query_as("SELECT id, title FROM books WHERE id = ? ORDER BY id")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn find_titles_by_ids(&self, ids: &[i64]) -> DomainResult<Vec<BookTitle>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!("SELECT id, title FROM books WHERE id IN ({placeholders}) ORDER BY id");

        let mut q = sqlx::query_as::<_, BookTitle>(&query);
        for id in ids {
            q = q.bind(id);
        }

        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Book>> {
        let row: Option<Book> = sqlx::query_as("SELECT id, title, stock FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn list(&self) -> DomainResult<Vec<Book>> {
        let rows: Vec<Book> = sqlx::query_as("SELECT id, title, stock FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn update_stock(&self, id: i64, stock: i64) -> DomainResult<Book> {
        let row: Option<Book> =
            sqlx::query_as("UPDATE books SET stock = ? WHERE id = ? RETURNING id, title, stock")
                .bind(stock)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.ok_or_else(|| DomainError::not_found("Books", id))
    }
}
