//! Lending service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{Borrow, CreateBorrow},
        Pagination,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book
    pub async fn create(&self, borrow: CreateBorrow) -> AppResult<Borrow> {
        borrow
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.borrows.create(&borrow).await
    }

    /// List borrow records with pagination
    pub async fn get_all(&self, pagination: &Pagination) -> AppResult<Vec<Borrow>> {
        self.repository
            .borrows
            .get_all(pagination.skip(), pagination.limit())
            .await
    }

    /// Get borrow record by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Borrow> {
        self.repository.borrows.get_by_id(id).await
    }

    /// Return a borrowed book
    pub async fn return_book(&self, id: i32) -> AppResult<Borrow> {
        self.repository.borrows.return_book(id).await
    }
}
