//! Borrow (lending record) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Lending record from database.
///
/// A borrow is active while `return_date` is null; setting it is a
/// one-way transition performed by the return operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrow {
    pub id: i32,
    pub book_id: i32,
    pub reader_name: String,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl Borrow {
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Create borrow request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrow {
    pub book_id: i32,
    #[validate(length(min = 2, max = 100))]
    pub reader_name: String,
}
