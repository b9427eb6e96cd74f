//! Lending endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        borrow::{Borrow, CreateBorrow},
        Pagination,
    },
};

/// List borrow records with pagination
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    params(Pagination),
    responses(
        (status = 200, description = "List of borrow records", body = Vec<Borrow>)
    )
)]
pub async fn list_borrows(
    State(state): State<crate::AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<Borrow>>> {
    let borrows = state.services.borrows.get_all(&pagination).await?;
    Ok(Json(borrows))
}

/// Get borrow record by ID
#[utoipa::path(
    get,
    path = "/borrows/{id}",
    tag = "borrows",
    params(
        ("id" = i32, Path, description = "Borrow ID")
    ),
    responses(
        (status = 200, description = "Borrow record", body = Borrow),
        (status = 404, description = "Borrow record not found")
    )
)]
pub async fn get_borrow(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Borrow>> {
    let borrow = state.services.borrows.get_by_id(id).await?;
    Ok(Json(borrow))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Borrow created", body = Borrow),
        (status = 400, description = "No copies available"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn create_borrow(
    State(state): State<crate::AppState>,
    Json(borrow): Json<CreateBorrow>,
) -> AppResult<(StatusCode, Json<Borrow>)> {
    let created = state.services.borrows.create(borrow).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Return a borrowed book
#[utoipa::path(
    patch,
    path = "/borrows/{id}/return",
    tag = "borrows",
    params(
        ("id" = i32, Path, description = "Borrow ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = Borrow),
        (status = 400, description = "Book already returned"),
        (status = 404, description = "Borrow record not found")
    )
)]
pub async fn return_borrow(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Borrow>> {
    let returned = state.services.borrows.return_book(id).await?;
    Ok(Json(returned))
}
