//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

use super::map_constraint;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a new book. A dangling `author_id` surfaces as Conflict.
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, description, available_copies, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.available_copies)
        .bind(book.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint(e, "Book could not be created"))
    }

    /// Get a page of books ordered by insertion
    pub async fn get_all(&self, skip: i64, limit: i64) -> AppResult<Vec<Book>> {
        let books =
            sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(skip)
                .fetch_all(&self.pool)
                .await?;

        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Update an existing book; only supplied fields are written.
    /// `available_copies` here is an administrative override and is not
    /// checked against active borrows.
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        // Build dynamic update query
        let mut sets = Vec::new();
        let mut param_idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(book.title, "title");
        add_field!(book.description, "description");
        add_field!(book.available_copies, "available_copies");
        add_field!(book.author_id, "author_id");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE books SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            param_idx
        );

        let mut builder = sqlx::query_as::<_, Book>(&query);

        if let Some(ref val) = book.title {
            builder = builder.bind(val);
        }
        // Double option: Some(None) binds NULL and clears the description
        if let Some(ref val) = book.description {
            builder = builder.bind(val.clone());
        }
        if let Some(val) = book.available_copies {
            builder = builder.bind(val);
        }
        if let Some(val) = book.author_id {
            builder = builder.bind(val);
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint(e, "Book could not be updated"))?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book. Fails with Conflict while borrow records still
    /// reference the book.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_constraint(e, "Book still has borrow records"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}
