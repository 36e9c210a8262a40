//! Catalog management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{validate_published_year, Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book owned by the given user
    pub async fn create(&self, book: CreateBook, added_by: Uuid) -> AppResult<Book> {
        validate_published_year(book.published_year)?;

        let created = self.repository.books.insert(&book, added_by).await?;
        tracing::info!(book_id = %created.id, "Book created");
        Ok(created)
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Apply a partial update to a book
    pub async fn update(&self, id: Uuid, update: UpdateBook) -> AppResult<Book> {
        if let Some(year) = update.published_year {
            validate_published_year(year)?;
        }

        self.repository
            .books
            .apply_partial_update(id, &update)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Delete a book
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.repository.books.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}
