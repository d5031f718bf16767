//! Repository layer for book storage

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, NewBook, UpdateBook},
};

pub use books::BooksRepository;
pub use memory::MemoryBooksRepository;

/// Storage operations on books.
///
/// Title-addressed operations act on the first matching book in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books in insertion order
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// First book with the given title, if any
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>>;

    /// Persist a validated book; a duplicate `code` yields `AppError::Conflict`
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    /// Overwrite fields of the first book with the given title and return its new state
    async fn update_by_title(&self, title: &str, changes: &UpdateBook) -> AppResult<Option<Book>>;

    /// Remove the first book with the given title and return it
    async fn delete_by_title(&self, title: &str) -> AppResult<Option<Book>>;

    /// Check that the backend is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the storage handle
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_store(Arc::new(BooksRepository::new(pool)))
    }

    /// Create a repository backed by process memory
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryBooksRepository::new()))
    }

    pub fn with_store(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}
