//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Copies currently on the shelf; never negative
    pub available_copies: i32,
    pub author_id: i32,
}

fn default_copies() -> i32 {
    1
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default = "default_copies")]
    #[validate(range(min = 0))]
    pub available_copies: i32,
    pub author_id: i32,
}

/// Update book request; only supplied fields are applied.
/// Setting `available_copies` here is an administrative override and
/// bypasses the lending state machine.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(range(min = 0))]
    pub available_copies: Option<i32>,
    pub author_id: Option<i32>,
}
