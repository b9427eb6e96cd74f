//! API handlers for Biblio REST endpoints

pub mod authors;
pub mod books;
pub mod borrows;
pub mod health;
pub mod openapi;

use serde::Serialize;
use utoipa::ToSchema;

/// Response body for delete operations
#[derive(Serialize, ToSchema)]
pub struct DetailResponse {
    pub detail: String,
}
