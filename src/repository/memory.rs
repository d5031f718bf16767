//! In-process books repository.
//!
//! Keeps books in insertion order behind a single lock so every operation is
//! atomic with respect to the others, including the `code` uniqueness check.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook, UpdateBook},
};

#[derive(Default)]
pub struct MemoryBooksRepository {
    books: RwLock<Vec<Book>>,
}

impl MemoryBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_code(code: &str) -> AppError {
    AppError::Conflict(format!("Book code {} already exists", code))
}

#[async_trait]
impl BookStore for MemoryBooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.title == title).cloned())
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.code == book.code) {
            return Err(duplicate_code(&book.code));
        }
        let stored = book.clone().into_book(Uuid::new_v4());
        books.push(stored.clone());
        Ok(stored)
    }

    async fn update_by_title(&self, title: &str, changes: &UpdateBook) -> AppResult<Option<Book>> {
        let mut books = self.books.write().await;
        let Some(pos) = books.iter().position(|b| b.title == title) else {
            return Ok(None);
        };

        if let Some(ref code) = changes.code {
            let taken = books
                .iter()
                .enumerate()
                .any(|(i, b)| i != pos && &b.code == code);
            if taken {
                return Err(duplicate_code(code));
            }
        }

        let book = &mut books[pos];
        changes.apply_to(book);
        Ok(Some(book.clone()))
    }

    async fn delete_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let mut books = self.books.write().await;
        let pos = books.iter().position(|b| b.title == title);
        Ok(pos.map(|pos| books.remove(pos)))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
