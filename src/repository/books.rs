//! PostgreSQL books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook, UpdateBook},
};

const BOOK_COLUMNS: &str = "id, code, title, author";

/// Picks the first book with title $1 in insertion order
const FIRST_BY_TITLE: &str =
    "SELECT id FROM books WHERE title = $1 ORDER BY crea_date, id LIMIT 1";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY crea_date, id", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE title = $1 ORDER BY crea_date, id LIMIT 1",
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let query = format!(
            "INSERT INTO books (id, code, title, author) VALUES ($1, $2, $3, $4) RETURNING {}",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(Uuid::new_v4())
            .bind(&book.code)
            .bind(&book.title)
            .bind(&book.author)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_sqlx)
    }

    async fn update_by_title(&self, title: &str, changes: &UpdateBook) -> AppResult<Option<Book>> {
        if changes.is_empty() {
            return self.find_by_title(title).await;
        }

        let mut sets = vec!["modif_date = NOW()".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(changes.code, "code");
        add_field!(changes.title, "title");
        add_field!(changes.author, "author");

        let query = format!(
            "UPDATE books SET {} WHERE id = ({}) RETURNING {}",
            sets.join(", "),
            FIRST_BY_TITLE,
            BOOK_COLUMNS
        );

        let mut builder = sqlx::query_as::<_, Book>(&query).bind(title);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(changes.code);
        bind_field!(changes.title);
        bind_field!(changes.author);

        builder
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_sqlx)
    }

    async fn delete_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let query = format!(
            "DELETE FROM books WHERE id = ({}) RETURNING {}",
            FIRST_BY_TITLE, BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(code: &str, title: &str) -> NewBook {
        NewBook {
            code: code.into(),
            title: title.into(),
            author: "Author".into(),
        }
    }

    // Needs a PostgreSQL server: DATABASE_URL=... cargo test -- --ignored
    #[sqlx::test(migrations = "./migrations")]
    #[ignore]
    async fn update_binds_every_field_combination(pool: Pool<Postgres>) {
        let repo = BooksRepository::new(pool);
        let mut current = repo.insert(&new_book("c-0", "Title 0")).await.unwrap();

        for mask in 0u8..8 {
            let changes = UpdateBook {
                code: (mask & 1 != 0).then(|| format!("c-{}", mask + 1)),
                title: (mask & 2 != 0).then(|| format!("Title {}", mask + 1)),
                author: (mask & 4 != 0).then(|| format!("Author {}", mask + 1)),
            };

            let updated = repo
                .update_by_title(&current.title, &changes)
                .await
                .unwrap()
                .expect("book should still be addressable by its current title");

            let mut expected = current.clone();
            changes.apply_to(&mut expected);
            assert_eq!(updated, expected, "field mask {:03b}", mask);
            current = updated;
        }

        assert_eq!(repo.list().await.unwrap(), vec![current]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore]
    async fn duplicate_code_is_a_conflict(pool: Pool<Postgres>) {
        let repo = BooksRepository::new(pool);
        repo.insert(&new_book("same", "One")).await.unwrap();

        let err = repo.insert(&new_book("same", "Two")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let changes = UpdateBook {
            code: Some("same".into()),
            ..Default::default()
        };
        repo.insert(&new_book("other", "Three")).await.unwrap();
        let err = repo.update_by_title("Three", &changes).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore]
    async fn title_operations_hit_first_inserted(pool: Pool<Postgres>) {
        let repo = BooksRepository::new(pool);
        let first = repo.insert(&new_book("a", "Same")).await.unwrap();
        let second = repo.insert(&new_book("b", "Same")).await.unwrap();

        assert_eq!(repo.find_by_title("Same").await.unwrap(), Some(first.clone()));
        assert_eq!(repo.delete_by_title("Same").await.unwrap(), Some(first));
        assert_eq!(repo.find_by_title("Same").await.unwrap(), Some(second));
        assert_eq!(repo.delete_by_title("Missing").await.unwrap(), None);
    }
}
