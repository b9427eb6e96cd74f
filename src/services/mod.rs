//! Business logic services

pub mod authors;
pub mod books;
pub mod borrows;

use sqlx::{Pool, Postgres};

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub borrows: borrows::BorrowsService,
    pool: Pool<Postgres>,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            borrows: borrows::BorrowsService::new(repository.clone()),
            pool: repository.pool,
        }
    }

    /// Database pool handle, used by the readiness probe
    pub fn pool(&self) -> Pool<Postgres> {
        self.pool.clone()
    }
}
