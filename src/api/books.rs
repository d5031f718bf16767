//! Book API endpoints
//!
//! Each handler issues a single service call. Failures never leak the internal
//! error taxonomy: they collapse into a fixed plain-text message per endpoint.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppError,
    models::book::{Book, CreateBook, UpdateBook},
    AppState,
};

/// Fixed-text failure returned by the book endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookRouteError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl BookRouteError {
    const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

pub const BOOKS_NOT_FOUND: BookRouteError =
    BookRouteError::new(StatusCode::NOT_FOUND, "Books not found");
pub const BOOK_NOT_FOUND: BookRouteError =
    BookRouteError::new(StatusCode::NOT_FOUND, "Book not found");
pub const BOOK_NOT_CREATED: BookRouteError =
    BookRouteError::new(StatusCode::INTERNAL_SERVER_ERROR, "Book not created");
pub const UPDATE_FAILED: BookRouteError =
    BookRouteError::new(StatusCode::INTERNAL_SERVER_ERROR, "Some error happened");
pub const DELETE_FAILED: BookRouteError =
    BookRouteError::new(StatusCode::NOT_FOUND, "The book was not found");

impl IntoResponse for BookRouteError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

type BookResult<T> = Result<T, BookRouteError>;

/// Returns the list of all the books
#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    responses(
        (status = 200, description = "The list of the books", body = Vec<Book>),
        (status = 404, description = "Books not found", body = String, content_type = "text/plain")
    )
)]
pub async fn list_books(State(state): State<AppState>) -> BookResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await.map_err(|e| {
        tracing::error!("Failed to list books: {}", e);
        BOOKS_NOT_FOUND
    })?;
    Ok(Json(books))
}

/// Get the book by title
#[utoipa::path(
    get,
    path = "/book/{title}",
    tag = "Books",
    params(("title" = String, Path, description = "The book title")),
    responses(
        (status = 200, description = "The book description by title, null when no book matches", body = Option<Book>),
        (status = 404, description = "Book not found", body = String, content_type = "text/plain")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> BookResult<Json<Option<Book>>> {
    let book = state.services.books.get_by_title(&title).await.map_err(|e| {
        tracing::error!("Failed to get book {:?}: {}", title, e);
        BOOK_NOT_FOUND
    })?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/book",
    tag = "Books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "The book was successfully created", body = Book),
        (status = 400, description = "Bad Request - Invalid or missing data"),
        (status = 401, description = "Unauthorized - Authentication required"),
        (status = 403, description = "Forbidden - Insufficient permissions"),
        (status = 500, description = "Book not created", body = String, content_type = "text/plain")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<CreateBook>, JsonRejection>,
) -> BookResult<(StatusCode, Json<Book>)> {
    let Json(data) = body.map_err(|rejection| {
        tracing::error!("Unreadable book body: {}", rejection);
        BOOK_NOT_CREATED
    })?;

    let book = state.services.books.create(data).await.map_err(|e| {
        tracing::error!("Book not created: {}", e);
        BOOK_NOT_CREATED
    })?;

    tracing::info!("Created book {} ({})", book.id, book.code);
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update the book by the title
#[utoipa::path(
    patch,
    path = "/book/{title}",
    tag = "Books",
    params(("title" = String, Path, description = "The book title")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "The book was updated", body = Book),
        (status = 404, description = "Book not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Some error happened", body = String, content_type = "text/plain")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(title): Path<String>,
    body: Result<Json<UpdateBook>, JsonRejection>,
) -> BookResult<Json<Book>> {
    tracing::debug!("Updating book with title {:?}", title);

    // No JSON body means no changes
    let data = match body {
        Ok(Json(data)) => data,
        Err(JsonRejection::MissingJsonContentType(_)) => UpdateBook::default(),
        Err(rejection) => {
            tracing::error!("Some error happened: {}", rejection);
            return Err(UPDATE_FAILED);
        }
    };

    match state.services.books.update_by_title(&title, data).await {
        Ok(book) => {
            tracing::debug!("Updated book: {:?}", book);
            Ok(Json(book))
        }
        Err(AppError::NotFound(_)) => {
            tracing::info!("Book not found: {:?}", title);
            Err(BOOK_NOT_FOUND)
        }
        Err(e) => {
            tracing::error!("Some error happened: {}", e);
            Err(UPDATE_FAILED)
        }
    }
}

/// Remove the book by title
#[utoipa::path(
    delete,
    path = "/book/{title}",
    tag = "Books",
    params(("title" = String, Path, description = "The book title")),
    responses(
        (status = 200, description = "The book was deleted, null when no book matches", body = Option<Book>),
        (status = 404, description = "The book was not found", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> BookResult<Json<Option<Book>>> {
    let book = state.services.books.delete_by_title(&title).await.map_err(|e| {
        tracing::error!("Failed to delete book {:?}: {}", title, e);
        DELETE_FAILED
    })?;
    Ok(Json(book))
}
