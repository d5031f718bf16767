//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// First book with the given title, `None` when nothing matches
    pub async fn get_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        self.repository.books.find_by_title(title).await
    }

    /// Validate against the book schema, then persist
    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        let book = data.into_new_book()?;
        self.repository.books.insert(&book).await
    }

    /// Update the first book with the given title
    pub async fn update_by_title(&self, title: &str, data: UpdateBook) -> AppResult<Book> {
        let changes = data.normalized()?;
        self.repository
            .books
            .update_by_title(title, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", title)))
    }

    /// Delete the first book with the given title, returning it if one existed
    pub async fn delete_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        self.repository.books.delete_by_title(title).await
    }

    /// Storage reachability, for readiness checks
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}
