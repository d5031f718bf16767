//! Book model and the write-time schema rules for it.
//!
//! A persisted book carries a unique `code`, a `title` and an `author`. All three
//! are required; `title` and `author` are trimmed before they are written. The
//! request shapes keep every field optional so that a missing field is reported
//! by [`CreateBook::into_new_book`] instead of failing inside the JSON extractor.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[schema(example = json!({
    "id": "7c1f4c8e-2b4e-4f57-9a51-0f4a3c7d2e11",
    "code": "d5fE_asz",
    "title": "The New Turing Omnibus",
    "author": "Alexander K. Dewdney"
}))]
pub struct Book {
    /// Generated identifier
    pub id: Uuid,
    /// The unique code of the book
    pub code: String,
    /// The book title
    pub title: String,
    /// The book author
    pub author: String,
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "code": "d5fE_asz",
    "title": "The New Turing Omnibus",
    "author": "Alexander K. Dewdney"
}))]
pub struct CreateBook {
    /// The unique code of the book
    #[validate(required(message = "code is required"), length(min = 1, message = "code is required"))]
    pub code: Option<String>,
    /// The book title
    #[validate(required(message = "title is required"), length(min = 1, message = "title is required"))]
    pub title: Option<String>,
    /// The book author
    #[validate(required(message = "author is required"), length(min = 1, message = "author is required"))]
    pub author: Option<String>,
}

/// Partial update request; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: Option<String>,
}

/// Validated book ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub code: String,
    pub title: String,
    pub author: String,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

impl CreateBook {
    /// Apply trimming and required-field rules
    pub fn into_new_book(self) -> AppResult<NewBook> {
        let book = CreateBook {
            code: self.code,
            title: trimmed(self.title),
            author: trimmed(self.author),
        };
        book.validate()?;

        match (book.code, book.title, book.author) {
            (Some(code), Some(title), Some(author)) => Ok(NewBook { code, title, author }),
            // validate() rejects any missing field above
            _ => Err(crate::error::AppError::Validation("missing book field".to_string())),
        }
    }
}

impl UpdateBook {
    /// Apply trimming and reject fields that would become empty
    pub fn normalized(self) -> AppResult<UpdateBook> {
        let changes = UpdateBook {
            code: self.code,
            title: trimmed(self.title),
            author: trimmed(self.author),
        };
        changes.validate()?;
        Ok(changes)
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.title.is_none() && self.author.is_none()
    }

    /// Overwrite the provided fields of `book`
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(ref code) = self.code {
            book.code = code.clone();
        }
        if let Some(ref title) = self.title {
            book.title = title.clone();
        }
        if let Some(ref author) = self.author {
            book.author = author.clone();
        }
    }
}

impl NewBook {
    pub fn into_book(self, id: Uuid) -> Book {
        Book {
            id,
            code: self.code,
            title: self.title,
            author: self.author,
        }
    }
}
