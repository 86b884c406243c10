//! Port trait definitions (Hexagonal Architecture)
//!
//! - BookRepository: the local book store
//! - ProductSource: the remote product system

pub mod book_repository;
pub mod product_source;

pub use book_repository::BookRepository;
pub use product_source::ProductSource;
