//! Book domain model.
//!
//! Books live in the local store. The blend handlers only ever read the
//! `id`/`title` projection; the catalog also exposes stock.

use serde::{Deserialize, Serialize};

/// A row of the local `books` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub stock: i64,
}

impl Book {
    pub fn new(id: i64, title: impl Into<String>, stock: i64) -> Self {
        Self {
            id,
            title: title.into(),
            stock,
        }
    }

    /// Reject values the catalog must never persist.
    pub fn validate_stock(stock: i64) -> Result<(), String> {
        if stock < 0 {
            return Err(format!("stock must not be negative, got {stock}"));
        }
        Ok(())
    }
}

/// The two-column projection selected when correlating books with products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookTitle {
    pub id: i64,
    pub title: String,
}

impl From<Book> for BookTitle {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
        }
    }
}
