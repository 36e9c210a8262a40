//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
    repository::duplicate_aware,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find book by ID
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    /// List all books in insertion order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    /// Insert a new book. The unique index on isbn rejects duplicates.
    pub async fn insert(&self, book: &CreateBook, added_by: Uuid) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, genre, published_year, pages, description, price, added_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.genre)
        .bind(book.published_year)
        .bind(book.pages)
        .bind(&book.description)
        .bind(book.price)
        .bind(added_by)
        .fetch_one(&self.pool)
        .await
        .map_err(duplicate_aware)?;

        Ok(book)
    }

    /// Apply a partial update: only supplied fields change, updated_at is
    /// refreshed. Returns None when no book has the given id.
    pub async fn apply_partial_update(
        &self,
        id: Uuid,
        book: &UpdateBook,
    ) -> AppResult<Option<Book>> {
        let now = Utc::now();

        // Build dynamic update query
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut param_idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(book.title, "title");
        add_field!(book.author, "author");
        add_field!(book.isbn, "isbn");
        add_field!(book.genre, "genre");
        add_field!(book.published_year, "published_year");
        add_field!(book.pages, "pages");
        add_field!(book.description, "description");
        add_field!(book.price, "price");

        let query = format!(
            "UPDATE books SET {} WHERE id = ${}",
            sets.join(", "),
            param_idx
        );

        let mut builder = sqlx::query(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(book.title);
        bind_field!(book.author);
        bind_field!(book.isbn);
        bind_field!(book.genre);
        bind_field!(book.published_year);
        bind_field!(book.pages);
        bind_field!(book.description);
        bind_field!(book.price);

        let result = builder
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(duplicate_aware)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Delete a book. Returns false when no book has the given id.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
