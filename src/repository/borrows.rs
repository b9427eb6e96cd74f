//! Borrows repository: the lending state machine.
//!
//! A borrow is Active while `return_date` is null and Returned once it is
//! set; the transition is one-way. Every operation that touches both a
//! book and a borrow runs in a single transaction so `available_copies`
//! always equals total copies minus active borrows.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrow::{Borrow, CreateBorrow},
};

use super::map_constraint;

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Borrow a book: atomically take one copy off the shelf and insert
    /// the lending record.
    ///
    /// The conditional decrement carries the availability check, so
    /// concurrent borrows against the same book serialize on the book
    /// row and can never drive `available_copies` negative.
    pub async fn create(&self, borrow: &CreateBorrow) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let decremented = sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies - 1
            WHERE id = $1 AND available_copies > 0
            "#,
        )
        .bind(borrow.book_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            // Zero rows: the book is either missing or out of copies
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                    .bind(borrow.book_id)
                    .fetch_one(&mut *tx)
                    .await?;

            return Err(if exists {
                AppError::BusinessRule("No available copies of this book".to_string())
            } else {
                AppError::NotFound(format!("Book with id {} not found", borrow.book_id))
            });
        }

        let created = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (book_id, reader_name, borrow_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(borrow.book_id)
        .bind(&borrow.reader_name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_constraint(e, "Borrow could not be created"))?;

        // Dropping the transaction without commit rolls the decrement back
        tx.commit().await?;

        Ok(created)
    }

    /// Get a page of borrows ordered by insertion
    pub async fn get_all(&self, skip: i64, limit: i64) -> AppResult<Vec<Borrow>> {
        let borrows =
            sqlx::query_as::<_, Borrow>("SELECT * FROM borrows ORDER BY id LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(skip)
                .fetch_all(&self.pool)
                .await?;

        Ok(borrows)
    }

    /// Get borrow by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Borrow> {
        sqlx::query_as::<_, Borrow>("SELECT * FROM borrows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))
    }

    /// Return a borrowed book: close the lending record and put the copy
    /// back on the shelf, atomically.
    ///
    /// Returning twice is an error, not a no-op: the second call fails
    /// and leaves the book's availability unchanged.
    pub async fn return_book(&self, id: i32) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let returned = sqlx::query_as::<_, Borrow>(
            r#"
            UPDATE borrows
            SET return_date = $1
            WHERE id = $2 AND return_date IS NULL
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let borrow = match returned {
            Some(borrow) => borrow,
            None => {
                // Zero rows: the record is either missing or already closed
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM borrows WHERE id = $1)")
                        .bind(id)
                        .fetch_one(&mut *tx)
                        .await?;

                return Err(if exists {
                    AppError::BusinessRule("Book already returned".to_string())
                } else {
                    AppError::NotFound(format!("Borrow record with id {} not found", id))
                });
            }
        };

        sqlx::query("UPDATE books SET available_copies = available_copies + 1 WHERE id = $1")
            .bind(borrow.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(borrow)
    }
}
